// eglx/src/api.rs
//
//! Process-wide EGL calls: client API binding and synchronization.

use crate::egl;
use crate::egl::types::EGLenum;
use crate::error::{Error, ToWindowingApiError};
use crate::ffi::EGL_FUNCTIONS;

/// A client rendering API that EGL can bind for the current thread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Api {
    OpenGl,
    OpenGlEs,
    OpenVg,
}

impl Api {
    fn as_egl(self) -> EGLenum {
        match self {
            Api::OpenGl => egl::OPENGL_API,
            Api::OpenGlEs => egl::OPENGL_ES_API,
            Api::OpenVg => egl::OPENVG_API,
        }
    }

    fn from_egl(api: EGLenum) -> Option<Api> {
        match api {
            egl::OPENGL_API => Some(Api::OpenGl),
            egl::OPENGL_ES_API => Some(Api::OpenGlEs),
            egl::OPENVG_API => Some(Api::OpenVg),
            _ => None,
        }
    }
}

/// Binds `api` as the current rendering API for the calling thread.
pub fn bind_api(api: Api) -> Result<(), Error> {
    EGL_FUNCTIONS.with(|egl| unsafe {
        let result = egl.BindAPI(api.as_egl());
        if result == egl::FALSE {
            let err = egl.GetError().to_windowing_api_error();
            return Err(Error::ApiBindingFailed(err));
        }
        Ok(())
    })
}

/// Returns the rendering API currently bound for the calling thread, or
/// `None` if no API is bound.
pub fn query_api() -> Option<Api> {
    EGL_FUNCTIONS.with(|egl| unsafe { Api::from_egl(egl.QueryAPI()) })
}

/// Blocks until all native rendering for the currently bound API has
/// completed.
pub fn wait_client() -> Result<(), Error> {
    EGL_FUNCTIONS.with(|egl| unsafe {
        let result = egl.WaitClient();
        if result == egl::FALSE {
            let err = egl.GetError().to_windowing_api_error();
            return Err(Error::WaitFailed(err));
        }
        Ok(())
    })
}
