// eglx/src/error.rs
//
//! Various errors that methods can produce, and translation of native EGL
//! error codes into them.

use crate::egl;
use crate::egl::types::{EGLenum, EGLint};

/// Various errors that methods can produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// A connection to the display server could not be opened, or EGL
    /// refused to provide a display for it.
    ConnectionFailed,
    /// The system EGL library couldn't be located.
    NoEGLLibraryFound,
    /// The EGL display couldn't be initialized.
    InitializationFailed(WindowingApiError),
    /// Querying a string, a config attribute, or a surface attribute failed.
    QueryFailed(WindowingApiError),
    /// Enumerating or choosing pixel-format configurations failed.
    PixelFormatSelectionFailed(WindowingApiError),
    /// No pixel-format configuration matched the requested attributes.
    NoPixelFormatFound,
    /// The system couldn't create a surface.
    SurfaceCreationFailed(WindowingApiError),
    /// The system couldn't create a rendering context.
    ContextCreationFailed(WindowingApiError),
    /// The system couldn't make the rendering context current or not
    /// current.
    MakeCurrentFailed(WindowingApiError),
    /// Presenting the surface via `eglSwapBuffers` failed.
    PresentFailed(WindowingApiError),
    /// Binding a client rendering API for the calling thread failed.
    ApiBindingFailed(WindowingApiError),
    /// Waiting for native rendering to complete failed.
    WaitFailed(WindowingApiError),
    /// Copying the surface contents out through a native pixmap failed.
    ReadbackFailed(WindowingApiError),
    /// The operation needs an X11 connection, but the display was opened
    /// without one.
    NoX11Connection,
}

/// The errors that the native EGL API reports.
///
/// The doc comment of each variant carries the meaning the EGL specification
/// assigns to the corresponding error code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowingApiError {
    /// Miscellaneous error, or an error code this binding doesn't know.
    Failed,
    /// EGL is not initialized, or could not be initialized, for the
    /// specified display.
    NotInitialized,
    /// EGL cannot access a requested resource (for example a context is
    /// bound in another thread).
    BadAccess,
    /// EGL failed to allocate resources for the requested operation.
    BadAlloc,
    /// An unrecognized attribute or attribute value was passed in an
    /// attribute list.
    BadAttribute,
    /// An `EGLConfig` argument does not name a valid configuration.
    BadConfig,
    /// An `EGLContext` argument does not name a valid rendering context.
    BadContext,
    /// The current surface of the calling thread is a window, pbuffer, or
    /// pixmap that is no longer valid.
    BadCurrentSurface,
    /// An `EGLDisplay` argument does not name a valid display connection.
    BadDisplay,
    /// An `EGLSurface` argument does not name a valid surface (window,
    /// pbuffer, or pixmap) configured for rendering.
    BadSurface,
    /// Arguments are inconsistent; for example, an otherwise valid context
    /// requires buffers (e.g. depth or stencil) not allocated by an
    /// otherwise valid surface.
    BadMatch,
    /// One or more argument values are invalid.
    BadParameter,
    /// A native pixmap argument does not refer to a valid native pixmap.
    BadNativePixmap,
    /// A native window argument does not refer to a valid native window.
    BadNativeWindow,
    /// A power management event has occurred. The application must destroy
    /// all contexts and reinitialize client API state and objects to
    /// continue rendering.
    ContextLost,
}

pub(crate) trait ToWindowingApiError {
    fn to_windowing_api_error(self) -> WindowingApiError;
}

impl ToWindowingApiError for EGLint {
    fn to_windowing_api_error(self) -> WindowingApiError {
        match self as EGLenum {
            egl::NOT_INITIALIZED => WindowingApiError::NotInitialized,
            egl::BAD_ACCESS => WindowingApiError::BadAccess,
            egl::BAD_ALLOC => WindowingApiError::BadAlloc,
            egl::BAD_ATTRIBUTE => WindowingApiError::BadAttribute,
            egl::BAD_CONFIG => WindowingApiError::BadConfig,
            egl::BAD_CONTEXT => WindowingApiError::BadContext,
            egl::BAD_CURRENT_SURFACE => WindowingApiError::BadCurrentSurface,
            egl::BAD_DISPLAY => WindowingApiError::BadDisplay,
            egl::BAD_SURFACE => WindowingApiError::BadSurface,
            egl::BAD_MATCH => WindowingApiError::BadMatch,
            egl::BAD_PARAMETER => WindowingApiError::BadParameter,
            egl::BAD_NATIVE_PIXMAP => WindowingApiError::BadNativePixmap,
            egl::BAD_NATIVE_WINDOW => WindowingApiError::BadNativeWindow,
            egl::CONTEXT_LOST => WindowingApiError::ContextLost,
            _ => WindowingApiError::Failed,
        }
    }
}
