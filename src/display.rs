// eglx/src/display.rs
//
//! Wrappers around EGL display connections.
//!
//! A [`Display`] is where everything starts: it owns the connection to the
//! native display (optionally an X server), negotiates pixel-format
//! configurations, and creates surfaces and contexts. The underlying native
//! handles are shared with the surfaces and contexts created from the
//! display, so the connection stays open until the last of them goes away.

use crate::attrib::{AttribList, StringAttribute, CONFIG_ATTRIBUTES};
use crate::attrib::describe_attrib;
use crate::context::Context;
use crate::egl;
use crate::egl::types::{EGLConfig, EGLDisplay, EGLenum, EGLint};
use crate::egl::{EGLNativeDisplayType, EGLNativePixmapType};
use crate::error::{Error, ToWindowingApiError};
use crate::ffi::EGL_FUNCTIONS;
use crate::surface::{Surface, SurfaceKind};

use log::warn;
use std::ffi::{CStr, CString};
use std::fmt;
use std::fmt::Write;
use std::ptr;
use std::sync::Arc;
use x11::xlib;

/// An EGL pixel-format configuration.
///
/// Configs are plain handles, only meaningful to the display that produced
/// them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config(pub(crate) EGLConfig);

/// The native handles behind a `Display`, shared with every surface and
/// context created from it.
pub(crate) struct DisplayHandle {
    pub(crate) egl_display: EGLDisplay,
    pub(crate) x_display: *mut xlib::Display,
}

unsafe impl Send for DisplayHandle {}
unsafe impl Sync for DisplayHandle {}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.Terminate(self.egl_display);
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                warn!("eglTerminate failed: {:?}", err);
            }
            self.egl_display = egl::NO_DISPLAY;
        });
        if !self.x_display.is_null() {
            unsafe {
                xlib::XCloseDisplay(self.x_display);
            }
            self.x_display = ptr::null_mut();
        }
    }
}

/// An initialized EGL display connection.
pub struct Display {
    pub(crate) handle: Arc<DisplayHandle>,
    version: (i32, i32),
}

impl Display {
    /// Opens and initializes the default EGL display.
    #[inline]
    pub fn open() -> Result<Display, Error> {
        unsafe { Display::from_native(ptr::null_mut()) }
    }

    /// Connects to the X server named by `name` (`$DISPLAY` if `None`) and
    /// opens and initializes the EGL display for it.
    ///
    /// Only displays opened this way can service the pixmap readback path
    /// ([`Surface::copy_to_image`]).
    pub fn open_x11(name: Option<&str>) -> Result<Display, Error> {
        let name = match name {
            None => None,
            Some(name) => Some(CString::new(name).map_err(|_| Error::ConnectionFailed)?),
        };
        let name_ptr = name.as_ref().map_or(ptr::null(), |name| name.as_ptr());
        unsafe {
            let x_display = xlib::XOpenDisplay(name_ptr);
            if x_display.is_null() {
                return Err(Error::ConnectionFailed);
            }
            Display::from_native(x_display)
        }
    }

    unsafe fn from_native(x_display: *mut xlib::Display) -> Result<Display, Error> {
        let close_x_display = |x_display: *mut xlib::Display| {
            if !x_display.is_null() {
                xlib::XCloseDisplay(x_display);
            }
        };

        EGL_FUNCTIONS.with(|egl| {
            if !egl.GetDisplay.is_loaded() {
                close_x_display(x_display);
                return Err(Error::NoEGLLibraryFound);
            }

            let egl_display = egl.GetDisplay(x_display as EGLNativeDisplayType);
            if egl_display == egl::NO_DISPLAY {
                close_x_display(x_display);
                return Err(Error::ConnectionFailed);
            }

            let (mut major, mut minor) = (0, 0);
            let result = egl.Initialize(egl_display, &mut major, &mut minor);
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                close_x_display(x_display);
                return Err(Error::InitializationFailed(err));
            }

            Ok(Display {
                handle: Arc::new(DisplayHandle {
                    egl_display,
                    x_display,
                }),
                version: (major as i32, minor as i32),
            })
        })
    }

    /// The `(major, minor)` EGL version negotiated at initialization.
    #[inline]
    pub fn version(&self) -> (i32, i32) {
        self.version
    }

    /// Whether this display was opened on an X server.
    #[inline]
    pub fn has_x11_connection(&self) -> bool {
        !self.handle.x_display.is_null()
    }

    /// Queries one of the display strings (vendor, version, extensions, or
    /// client APIs).
    pub fn query_string(&self, attribute: StringAttribute) -> Result<String, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let string = egl.QueryString(self.handle.egl_display, attribute.as_egl());
            if string.is_null() {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::QueryFailed(err));
            }
            Ok(CStr::from_ptr(string).to_string_lossy().into_owned())
        })
    }

    /// Enumerates every config the display supports.
    pub fn configs(&self) -> Result<Vec<Config>, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let mut config_count = 0;
            let result =
                egl.GetConfigs(self.handle.egl_display, ptr::null_mut(), 0, &mut config_count);
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::PixelFormatSelectionFailed(err));
            }

            let mut configs: Vec<EGLConfig> = vec![ptr::null(); config_count as usize];
            if config_count > 0 {
                let result = egl.GetConfigs(
                    self.handle.egl_display,
                    configs.as_mut_ptr(),
                    config_count,
                    &mut config_count,
                );
                if result == egl::FALSE {
                    let err = egl.GetError().to_windowing_api_error();
                    return Err(Error::PixelFormatSelectionFailed(err));
                }
                configs.truncate(config_count as usize);
            }

            Ok(configs.into_iter().map(Config).collect())
        })
    }

    /// Returns every config matching `attribs`, best first, in the native
    /// API's sort order.
    ///
    /// No matches is an empty vector, not an error.
    pub fn choose_configs(&self, attribs: &AttribList) -> Result<Vec<Config>, Error> {
        let requested = attribs.terminated();

        EGL_FUNCTIONS.with(|egl| unsafe {
            // See how many applicable configs there are.
            let mut config_count = 0;
            let result = egl.ChooseConfig(
                self.handle.egl_display,
                requested.as_ptr(),
                ptr::null_mut(),
                0,
                &mut config_count,
            );
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::PixelFormatSelectionFailed(err));
            }
            if config_count == 0 {
                return Ok(vec![]);
            }

            // Enumerate all those configs.
            let mut configs: Vec<EGLConfig> = vec![ptr::null(); config_count as usize];
            let mut real_config_count = config_count;
            let result = egl.ChooseConfig(
                self.handle.egl_display,
                requested.as_ptr(),
                configs.as_mut_ptr(),
                config_count,
                &mut real_config_count,
            );
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::PixelFormatSelectionFailed(err));
            }
            configs.truncate(real_config_count as usize);

            Ok(configs.into_iter().map(Config).collect())
        })
    }

    /// Returns the best config matching `attribs`, or `NoPixelFormatFound`
    /// when nothing matches.
    pub fn choose_config(&self, attribs: &AttribList) -> Result<Config, Error> {
        match self.choose_configs(attribs)?.into_iter().next() {
            Some(config) => Ok(config),
            None => Err(Error::NoPixelFormatFound),
        }
    }

    /// Queries a single attribute of a config.
    pub fn config_attrib(&self, config: Config, name: EGLenum) -> Result<EGLint, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let mut value = 0;
            let result = egl.GetConfigAttrib(
                self.handle.egl_display,
                config.0,
                name as EGLint,
                &mut value,
            );
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::QueryFailed(err));
            }
            Ok(value)
        })
    }

    /// Renders a one-attribute-per-line dump of a config. Attributes that
    /// can't be queried render as `?`.
    pub fn describe_config(&self, config: Config) -> String {
        let mut summary = String::new();
        for &name in CONFIG_ATTRIBUTES.iter() {
            match self.config_attrib(config, name) {
                Ok(value) => {
                    let _ = writeln!(summary, "{}: {}", describe_attrib(name), value);
                }
                Err(_) => {
                    let _ = writeln!(summary, "{}: ?", describe_attrib(name));
                }
            }
        }
        summary
    }

    /// Renders a dump of several configs, one line per attribute with the
    /// values of all configs side by side.
    pub fn describe_configs(&self, configs: &[Config]) -> String {
        let mut summary = String::new();
        let _ = writeln!(summary, "got {} configs:", configs.len());
        for &name in CONFIG_ATTRIBUTES.iter() {
            let _ = write!(summary, "\t{}:\n\t", describe_attrib(name));
            for &config in configs {
                match self.config_attrib(config, name) {
                    Ok(value) => {
                        let _ = write!(summary, "{} ", value);
                    }
                    Err(_) => {
                        let _ = write!(summary, "? ");
                    }
                }
            }
            let _ = writeln!(summary);
        }
        summary
    }

    /// Creates an off-screen pbuffer surface.
    pub fn create_pbuffer_surface(
        &self,
        config: Config,
        attribs: &AttribList,
    ) -> Result<Surface, Error> {
        let attribs = attribs.terminated();
        EGL_FUNCTIONS.with(|egl| unsafe {
            let egl_surface =
                egl.CreatePbufferSurface(self.handle.egl_display, config.0, attribs.as_ptr());
            if egl_surface == egl::NO_SURFACE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::SurfaceCreationFailed(err));
            }
            Ok(Surface::new(self.handle.clone(), egl_surface, SurfaceKind::Pbuffer))
        })
    }

    /// Creates a surface backed by an existing X pixmap.
    ///
    /// The config's `SURFACE_TYPE` must include `PIXMAP`, and the pixmap's
    /// depth must match the config.
    pub fn create_pixmap_surface(
        &self,
        config: Config,
        pixmap: xlib::Pixmap,
        attribs: &AttribList,
    ) -> Result<Surface, Error> {
        if !self.has_x11_connection() {
            return Err(Error::NoX11Connection);
        }
        let attribs = attribs.terminated();
        EGL_FUNCTIONS.with(|egl| unsafe {
            let egl_surface = egl.CreatePixmapSurface(
                self.handle.egl_display,
                config.0,
                pixmap as usize as EGLNativePixmapType,
                attribs.as_ptr(),
            );
            if egl_surface == egl::NO_SURFACE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::SurfaceCreationFailed(err));
            }
            Ok(Surface::new(self.handle.clone(), egl_surface, SurfaceKind::Pixmap))
        })
    }

    /// Creates a rendering context, optionally sharing objects with
    /// `share_context`.
    pub fn create_context(
        &self,
        config: Config,
        share_context: Option<&Context>,
        attribs: &AttribList,
    ) -> Result<Context, Error> {
        let egl_share_context = match share_context {
            None => egl::NO_CONTEXT,
            Some(context) => context.egl_context,
        };
        let attribs = attribs.terminated();

        EGL_FUNCTIONS.with(|egl| unsafe {
            let egl_context = egl.CreateContext(
                self.handle.egl_display,
                config.0,
                egl_share_context,
                attribs.as_ptr(),
            );
            if egl_context == egl::NO_CONTEXT {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::ContextCreationFailed(err));
            }
            Ok(Context::new(self.handle.clone(), egl_context))
        })
    }

    /// Releases the current context and surfaces for the calling thread.
    ///
    /// Mesa releases before version 9 violate the EGL specification here and
    /// reject the release with `BAD_MATCH`.
    pub fn release_current(&self) -> Result<(), Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.MakeCurrent(
                self.handle.egl_display,
                egl::NO_SURFACE,
                egl::NO_SURFACE,
                egl::NO_CONTEXT,
            );
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::MakeCurrentFailed(err));
            }
            Ok(())
        })
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        static LINES: [(StringAttribute, &str); 4] = [
            (StringAttribute::Vendor, "vendor"),
            (StringAttribute::Version, "version"),
            (StringAttribute::Extensions, "extensions"),
            (StringAttribute::ClientApis, "client APIs"),
        ];
        for &(attribute, label) in LINES.iter() {
            match self.query_string(attribute) {
                Ok(value) => writeln!(f, "{}:\n\t{}", label, value)?,
                Err(_) => writeln!(f, "couldn't query {}", label)?,
            }
        }
        Ok(())
    }
}
