// eglx/src/surface.rs
//
//! EGL rendering surfaces, and readback of their contents through an X
//! pixmap.

use crate::display::DisplayHandle;
use crate::egl;
use crate::egl::types::{EGLSurface, EGLenum, EGLint};
use crate::egl::EGLNativePixmapType;
use crate::error::{Error, ToWindowingApiError, WindowingApiError};
use crate::ffi::EGL_FUNCTIONS;

use euclid::default::Size2D;
use log::warn;
use std::fmt;
use std::os::raw::c_uint;
use std::slice;
use std::sync::Arc;
use x11::xlib;

const BYTES_PER_PIXEL: usize = 4;
const READBACK_PIXMAP_DEPTH: c_uint = 32;

/// What kind of surface this is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceKind {
    /// An off-screen pixel buffer.
    Pbuffer,
    /// A surface rendering into a native X pixmap.
    Pixmap,
}

/// An EGL rendering surface.
///
/// The surface keeps its display connection alive; it is destroyed with
/// `eglDestroySurface` when dropped.
pub struct Surface {
    pub(crate) egl_surface: EGLSurface,
    pub(crate) display: Arc<DisplayHandle>,
    kind: SurfaceKind,
}

unsafe impl Send for Surface {}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Surface({:x})", self.egl_surface as usize)
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.DestroySurface(self.display.egl_display, self.egl_surface);
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                warn!("eglDestroySurface failed: {:?}", err);
            }
            self.egl_surface = egl::NO_SURFACE;
        })
    }
}

/// A tightly packed 32-bit-per-pixel image read back from a surface.
///
/// Rows are `size.width * 4` bytes with no padding; the channel order is
/// whatever the X server stores, typically BGRA on little-endian servers.
#[derive(Clone, Debug)]
pub struct Image {
    pub size: Size2D<i32>,
    pub pixels: Vec<u8>,
}

impl Image {
    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.size.width as usize * BYTES_PER_PIXEL
    }
}

impl Surface {
    pub(crate) fn new(
        display: Arc<DisplayHandle>,
        egl_surface: EGLSurface,
        kind: SurfaceKind,
    ) -> Surface {
        Surface {
            egl_surface,
            display,
            kind,
        }
    }

    #[inline]
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Queries a single surface attribute.
    pub fn query(&self, name: EGLenum) -> Result<EGLint, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let mut value = 0;
            let result = egl.QuerySurface(
                self.display.egl_display,
                self.egl_surface,
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

    /// The surface size, via width/height queries.
    pub fn size(&self) -> Result<Size2D<i32>, Error> {
        let width = self.query(egl::WIDTH)?;
        let height = self.query(egl::HEIGHT)?;
        Ok(Size2D::new(width, height))
    }

    /// Posts the surface's back buffer.
    pub fn swap_buffers(&self) -> Result<(), Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.SwapBuffers(self.display.egl_display, self.egl_surface);
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::PresentFailed(err));
            }
            Ok(())
        })
    }

    /// Reads the surface's color buffer back into an owned image.
    ///
    /// This is `eglCopyBuffers` into a scratch X pixmap, followed by
    /// `XGetImage` and a row-by-row repack from the server's row pitch to a
    /// tight stride. The surface's display must have been opened with
    /// [`crate::Display::open_x11`].
    pub fn copy_to_image(&self) -> Result<Image, Error> {
        let size = self.size()?;
        let x_display = self.display.x_display;
        if x_display.is_null() {
            return Err(Error::NoX11Connection);
        }

        unsafe {
            let root = xlib::XDefaultRootWindow(x_display);
            let pixmap = xlib::XCreatePixmap(
                x_display,
                root,
                size.width as c_uint,
                size.height as c_uint,
                READBACK_PIXMAP_DEPTH,
            );
            if pixmap == 0 {
                return Err(Error::ReadbackFailed(WindowingApiError::Failed));
            }

            let result = EGL_FUNCTIONS.with(|egl| {
                let result = egl.CopyBuffers(
                    self.display.egl_display,
                    self.egl_surface,
                    pixmap as usize as EGLNativePixmapType,
                );
                if result == egl::FALSE {
                    Err(egl.GetError().to_windowing_api_error())
                } else {
                    Ok(())
                }
            });
            if let Err(err) = result {
                xlib::XFreePixmap(x_display, pixmap);
                return Err(Error::ReadbackFailed(err));
            }

            let x_image = xlib::XGetImage(
                x_display,
                pixmap,
                0,
                0,
                size.width as c_uint,
                size.height as c_uint,
                xlib::XAllPlanes(),
                xlib::ZPixmap,
            );
            if x_image.is_null() {
                xlib::XFreePixmap(x_display, pixmap);
                return Err(Error::ReadbackFailed(WindowingApiError::Failed));
            }

            let width = (*x_image).width as usize;
            let height = (*x_image).height as usize;
            let bytes_per_line = (*x_image).bytes_per_line as usize;
            let data = slice::from_raw_parts((*x_image).data as *const u8, bytes_per_line * height);
            let pixels = repack_rows(data, bytes_per_line, width, height);

            xlib::XDestroyImage(x_image);
            xlib::XFreePixmap(x_display, pixmap);

            match pixels {
                Some(pixels) => Ok(Image {
                    size: Size2D::new(width as i32, height as i32),
                    pixels,
                }),
                // The server handed back rows shorter than 32 bits per
                // pixel.
                None => Err(Error::ReadbackFailed(WindowingApiError::Failed)),
            }
        }
    }
}

/// Copies `height` rows of `width` pixels out of a buffer with a row pitch
/// of `bytes_per_line` into a tightly packed one.
///
/// Returns `None` when the pitch is too short to hold a row of pixels, or
/// the buffer is too short to hold every row.
pub(crate) fn repack_rows(
    data: &[u8],
    bytes_per_line: usize,
    width: usize,
    height: usize,
) -> Option<Vec<u8>> {
    let row_bytes = width * BYTES_PER_PIXEL;
    if bytes_per_line < row_bytes || data.len() < bytes_per_line * height {
        return None;
    }

    let mut pixels = vec![0; row_bytes * height];
    for y in 0..height {
        let src_row = &data[y * bytes_per_line..][..row_bytes];
        pixels[y * row_bytes..][..row_bytes].copy_from_slice(src_row);
    }
    Some(pixels)
}
