// eglx/src/ffi.rs
//
//! Loading of the native EGL function table.

use crate::egl::Egl;

use libc::{dlopen, dlsym, RTLD_LAZY};
use std::ffi::CString;
use std::os::raw::c_void;

thread_local! {
    pub(crate) static EGL_FUNCTIONS: Egl = Egl::load_with(get_proc_address);
}

struct EGLLibrary(*mut c_void);

unsafe impl Send for EGLLibrary {}
unsafe impl Sync for EGLLibrary {}

lazy_static! {
    static ref EGL_LIBRARY: EGLLibrary = {
        unsafe { EGLLibrary(dlopen(b"libEGL.so.1\0".as_ptr() as *const _, RTLD_LAZY)) }
    };
}

fn get_proc_address(symbol_name: &str) -> *const c_void {
    if EGL_LIBRARY.0.is_null() {
        return std::ptr::null();
    }
    unsafe {
        // `symbol_name` comes from the generated bindings and never contains
        // a NUL byte.
        let symbol_name = match CString::new(symbol_name) {
            Ok(symbol_name) => symbol_name,
            Err(_) => return std::ptr::null(),
        };
        dlsym(EGL_LIBRARY.0, symbol_name.as_ptr()) as *const c_void
    }
}
