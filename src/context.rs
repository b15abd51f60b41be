// eglx/src/context.rs
//
//! EGL rendering contexts.

use crate::display::DisplayHandle;
use crate::egl;
use crate::egl::types::{EGLContext, EGLDisplay, EGLSurface, EGLint};
use crate::error::{Error, ToWindowingApiError};
use crate::ffi::EGL_FUNCTIONS;
use crate::surface::Surface;

use log::warn;
use std::fmt;
use std::sync::Arc;

/// An EGL rendering context.
///
/// The context keeps its display connection alive; it is destroyed with
/// `eglDestroyContext` when dropped.
pub struct Context {
    pub(crate) egl_context: EGLContext,
    pub(crate) display: Arc<DisplayHandle>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Context({:x})", self.egl_context as usize)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.DestroyContext(self.display.egl_display, self.egl_context);
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                warn!("eglDestroyContext failed: {:?}", err);
            }
            self.egl_context = egl::NO_CONTEXT;
        })
    }
}

impl Context {
    pub(crate) fn new(display: Arc<DisplayHandle>, egl_context: EGLContext) -> Context {
        Context {
            egl_context,
            display,
        }
    }

    /// Makes this context current for the calling thread, drawing to `draw`
    /// and reading from `read`.
    ///
    /// `None` stands for `EGL_NO_SURFACE`, for contexts that render without
    /// a surface attachment.
    pub fn make_current(&self, draw: Option<&Surface>, read: Option<&Surface>) -> Result<(), Error> {
        let egl_draw = draw.map_or(egl::NO_SURFACE, |surface| surface.egl_surface);
        let egl_read = read.map_or(egl::NO_SURFACE, |surface| surface.egl_surface);

        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.MakeCurrent(
                self.display.egl_display,
                egl_draw,
                egl_read,
                self.egl_context,
            );
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::MakeCurrentFailed(err));
            }
            Ok(())
        })
    }

    /// Makes this context current like [`Context::make_current`], and
    /// restores whatever was current before when the returned guard drops.
    pub fn make_current_scoped(
        &self,
        draw: Option<&Surface>,
        read: Option<&Surface>,
    ) -> Result<CurrentContextGuard, Error> {
        let guard = CurrentContextGuard::new();
        self.make_current(draw, read)?;
        Ok(guard)
    }
}

/// Restores the previously current context and surfaces on drop.
#[must_use]
pub struct CurrentContextGuard {
    egl_display: EGLDisplay,
    old_egl_draw_surface: EGLSurface,
    old_egl_read_surface: EGLSurface,
    old_egl_context: EGLContext,
}

impl CurrentContextGuard {
    pub(crate) fn new() -> CurrentContextGuard {
        EGL_FUNCTIONS.with(|egl| unsafe {
            CurrentContextGuard {
                egl_display: egl.GetCurrentDisplay(),
                old_egl_draw_surface: egl.GetCurrentSurface(egl::DRAW as EGLint),
                old_egl_read_surface: egl.GetCurrentSurface(egl::READ as EGLint),
                old_egl_context: egl.GetCurrentContext(),
            }
        })
    }
}

impl Drop for CurrentContextGuard {
    fn drop(&mut self) {
        EGL_FUNCTIONS.with(|egl| unsafe {
            if self.egl_display != egl::NO_DISPLAY {
                egl.MakeCurrent(
                    self.egl_display,
                    self.old_egl_draw_surface,
                    self.old_egl_read_surface,
                    self.old_egl_context,
                );
            }
        })
    }
}
