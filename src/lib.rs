// eglx/src/lib.rs
//
//! Safe, low-level bindings to EGL with minimal X11 interop.
//!
//! This crate wraps the EGL native-platform graphics interface: opening a
//! display connection, negotiating a pixel-format configuration, creating
//! off-screen (pbuffer) and pixmap-backed surfaces and rendering contexts,
//! making them current, and swapping or copying pixel buffers. Every
//! operation forwards to the corresponding native call and translates the
//! EGL error code on failure. Native handles are cleaned up with `Drop`
//! rather than explicit destroy calls.
//!
//! The only window-system interop provided is Xlib: a display can be opened
//! on a named X server, and the contents of a surface can be read back
//! through an X pixmap into an owned RGBA image. This crate does not load GL
//! functions, manage windows, or add anything the native library doesn't
//! already provide.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;

pub mod error;
pub use crate::error::{Error, WindowingApiError};

mod api;
pub use crate::api::{bind_api, query_api, wait_client, Api};

pub mod attrib;
pub use crate::attrib::{AttribList, RenderableTypeFlags, StringAttribute, SurfaceTypeFlags};

mod display;
pub use crate::display::{Config, Display};

mod context;
pub use crate::context::{Context, CurrentContextGuard};

mod surface;
pub use crate::surface::{Image, Surface, SurfaceKind};

mod ffi;

pub use crate::egl::types::{EGLenum, EGLint};

#[allow(non_camel_case_types)]
mod egl {
    use std::os::raw::{c_long, c_void};
    pub type khronos_utime_nanoseconds_t = khronos_uint64_t;
    pub type khronos_uint64_t = u64;
    pub type khronos_ssize_t = c_long;
    pub type EGLint = i32;
    pub type EGLNativeDisplayType = *const c_void;
    pub type EGLNativePixmapType = *const c_void;
    pub type EGLNativeWindowType = *const c_void;
    pub type NativeDisplayType = EGLNativeDisplayType;
    pub type NativePixmapType = EGLNativePixmapType;
    pub type NativeWindowType = EGLNativeWindowType;
    include!(concat!(env!("OUT_DIR"), "/egl_bindings.rs"));
}

#[cfg(test)]
mod tests;
