// eglx/src/attrib.rs
//
//! EGL attribute names, attribute lists, and the bit masks that go in them.
//!
//! Attribute names are the raw EGL tokens re-exported from the generated
//! bindings; an [`AttribList`] is the name/value pair list that config,
//! surface, and context creation take, always terminated with `EGL_NONE`.

use crate::egl;
use crate::egl::types::{EGLenum, EGLint};

// Config attributes.
pub use crate::egl::{
    ALPHA_MASK_SIZE, ALPHA_SIZE, BIND_TO_TEXTURE_RGB, BIND_TO_TEXTURE_RGBA, BLUE_SIZE,
    BUFFER_SIZE, COLOR_BUFFER_TYPE, CONFIG_CAVEAT, CONFIG_ID, CONFORMANT, DEPTH_SIZE, GREEN_SIZE,
    LEVEL, LUMINANCE_SIZE, MATCH_NATIVE_PIXMAP, MAX_PBUFFER_HEIGHT, MAX_PBUFFER_PIXELS,
    MAX_PBUFFER_WIDTH, MAX_SWAP_INTERVAL, MIN_SWAP_INTERVAL, NATIVE_RENDERABLE, NATIVE_VISUAL_ID,
    NATIVE_VISUAL_TYPE, RED_SIZE, RENDERABLE_TYPE, SAMPLES, SAMPLE_BUFFERS, STENCIL_SIZE,
    SURFACE_TYPE, TRANSPARENT_BLUE_VALUE, TRANSPARENT_GREEN_VALUE, TRANSPARENT_RED_VALUE,
    TRANSPARENT_TYPE,
};

// Surface attributes.
pub use crate::egl::{
    HEIGHT, HORIZONTAL_RESOLUTION, LARGEST_PBUFFER, MIPMAP_LEVEL, MIPMAP_TEXTURE,
    MULTISAMPLE_RESOLVE, PIXEL_ASPECT_RATIO, RENDER_BUFFER, SWAP_BEHAVIOR, TEXTURE_FORMAT,
    TEXTURE_TARGET, VERTICAL_RESOLUTION, VG_ALPHA_FORMAT, VG_COLORSPACE, WIDTH,
};

// Context attributes and the list terminator.
pub use crate::egl::{CONTEXT_CLIENT_VERSION, NONE};

/// The out-of-band "don't care" attribute value.
pub const DONT_CARE: EGLint = -1;

/// The config attributes worth dumping, in the order `describe_config`
/// reports them.
///
/// `MATCH_NATIVE_PIXMAP` is not queryable and always renders as `?`.
pub static CONFIG_ATTRIBUTES: [EGLenum; 33] = [
    BUFFER_SIZE,
    ALPHA_SIZE,
    BLUE_SIZE,
    GREEN_SIZE,
    RED_SIZE,
    DEPTH_SIZE,
    STENCIL_SIZE,
    CONFIG_CAVEAT,
    CONFIG_ID,
    LEVEL,
    MAX_PBUFFER_HEIGHT,
    MAX_PBUFFER_PIXELS,
    MAX_PBUFFER_WIDTH,
    NATIVE_RENDERABLE,
    NATIVE_VISUAL_ID,
    NATIVE_VISUAL_TYPE,
    SAMPLES,
    SAMPLE_BUFFERS,
    SURFACE_TYPE,
    TRANSPARENT_TYPE,
    TRANSPARENT_BLUE_VALUE,
    TRANSPARENT_GREEN_VALUE,
    TRANSPARENT_RED_VALUE,
    BIND_TO_TEXTURE_RGB,
    BIND_TO_TEXTURE_RGBA,
    MIN_SWAP_INTERVAL,
    MAX_SWAP_INTERVAL,
    LUMINANCE_SIZE,
    ALPHA_MASK_SIZE,
    COLOR_BUFFER_TYPE,
    RENDERABLE_TYPE,
    MATCH_NATIVE_PIXMAP,
    CONFORMANT,
];

bitflags! {
    /// The surface kinds a config supports (`EGL_SURFACE_TYPE`).
    pub struct SurfaceTypeFlags: EGLint {
        const PBUFFER                 = egl::PBUFFER_BIT as EGLint;
        const PIXMAP                  = egl::PIXMAP_BIT as EGLint;
        const WINDOW                  = egl::WINDOW_BIT as EGLint;
        const VG_COLORSPACE_LINEAR    = egl::VG_COLORSPACE_LINEAR_BIT as EGLint;
        const VG_ALPHA_FORMAT_PRE     = egl::VG_ALPHA_FORMAT_PRE_BIT as EGLint;
        const MULTISAMPLE_RESOLVE_BOX = egl::MULTISAMPLE_RESOLVE_BOX_BIT as EGLint;
        const SWAP_BEHAVIOR_PRESERVED = egl::SWAP_BEHAVIOR_PRESERVED_BIT as EGLint;
    }
}

bitflags! {
    /// The client APIs a config can render (`EGL_RENDERABLE_TYPE`).
    pub struct RenderableTypeFlags: EGLint {
        const OPENGL_ES  = egl::OPENGL_ES_BIT as EGLint;
        const OPENVG     = egl::OPENVG_BIT as EGLint;
        const OPENGL_ES2 = egl::OPENGL_ES2_BIT as EGLint;
        const OPENGL     = egl::OPENGL_BIT as EGLint;
        const OPENGL_ES3 = egl::OPENGL_ES3_BIT as EGLint;
    }
}

/// The queryable display strings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StringAttribute {
    Vendor,
    Version,
    Extensions,
    ClientApis,
}

impl StringAttribute {
    pub(crate) fn as_egl(self) -> EGLint {
        let name = match self {
            StringAttribute::Vendor => egl::VENDOR,
            StringAttribute::Version => egl::VERSION,
            StringAttribute::Extensions => egl::EXTENSIONS,
            StringAttribute::ClientApis => egl::CLIENT_APIS,
        };
        name as EGLint
    }
}

/// A list of EGL attribute name/value pairs.
///
/// The `EGL_NONE` terminator is appended automatically when the list is
/// handed to the native API, so an empty list is valid and means "defaults".
#[derive(Clone, Debug, Default)]
pub struct AttribList {
    attribs: Vec<EGLint>,
}

impl AttribList {
    #[inline]
    pub fn new() -> AttribList {
        AttribList { attribs: vec![] }
    }

    /// Appends a name/value pair.
    pub fn with(mut self, name: EGLenum, value: EGLint) -> AttribList {
        self.attribs.push(name as EGLint);
        self.attribs.push(value);
        self
    }

    /// Appends an `EGL_SURFACE_TYPE` requirement.
    #[inline]
    pub fn with_surface_type(self, flags: SurfaceTypeFlags) -> AttribList {
        self.with(SURFACE_TYPE, flags.bits())
    }

    /// Appends an `EGL_RENDERABLE_TYPE` requirement.
    #[inline]
    pub fn with_renderable_type(self, flags: RenderableTypeFlags) -> AttribList {
        self.with(RENDERABLE_TYPE, flags.bits())
    }

    /// The number of name/value pairs in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.attribs.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attribs.is_empty()
    }

    /// The list in the form the native API takes, with the terminator
    /// appended.
    pub(crate) fn terminated(&self) -> Vec<EGLint> {
        let mut attribs = self.attribs.clone();
        // Include some extra zeroes to work around broken implementations.
        attribs.extend_from_slice(&[NONE as EGLint, 0, 0, 0]);
        attribs
    }
}

/// Returns a short human-readable description of a config or surface
/// attribute name.
pub fn describe_attrib(name: EGLenum) -> &'static str {
    match name {
        // Config attributes.
        BUFFER_SIZE => "total color component bits in the color buffer",
        RED_SIZE => "bits of Red in the color buffer",
        GREEN_SIZE => "bits of Green in the color buffer",
        BLUE_SIZE => "bits of Blue in the color buffer",
        LUMINANCE_SIZE => "bits of Luminance in the color buffer",
        ALPHA_SIZE => "bits of Alpha in the color buffer",
        ALPHA_MASK_SIZE => "bits of Alpha in the alpha mask buffer",
        BIND_TO_TEXTURE_RGB => "true if bindable to RGB textures",
        BIND_TO_TEXTURE_RGBA => "true if bindable to RGBA textures",
        COLOR_BUFFER_TYPE => "color buffer type",
        CONFIG_CAVEAT => "any caveats for the configuration",
        CONFIG_ID => "unique EGLConfig identifier",
        CONFORMANT => "whether contexts created with this config are conformant",
        DEPTH_SIZE => "bits of Z in the depth buffer",
        LEVEL => "frame buffer level",
        MATCH_NATIVE_PIXMAP => "native pixmap the config must match",
        MAX_PBUFFER_WIDTH => "maximum width of pbuffer",
        MAX_PBUFFER_HEIGHT => "maximum height of pbuffer",
        MAX_PBUFFER_PIXELS => "maximum size of pbuffer",
        MAX_SWAP_INTERVAL => "maximum swap interval",
        MIN_SWAP_INTERVAL => "minimum swap interval",
        NATIVE_RENDERABLE => "true if native rendering APIs can render to surface",
        NATIVE_VISUAL_ID => "handle of corresponding native visual",
        NATIVE_VISUAL_TYPE => "native visual type of the associated visual",
        RENDERABLE_TYPE => "which client APIs are supported",
        SAMPLE_BUFFERS => "number of multisample buffers",
        SAMPLES => "number of samples per pixel",
        STENCIL_SIZE => "bits of Stencil in the stencil buffer",
        SURFACE_TYPE => "which types of EGL surfaces are supported",
        TRANSPARENT_TYPE => "type of transparency supported",
        TRANSPARENT_RED_VALUE => "transparent red value",
        TRANSPARENT_GREEN_VALUE => "transparent green value",
        TRANSPARENT_BLUE_VALUE => "transparent blue value",

        // Surface attributes.
        VG_ALPHA_FORMAT => "alpha format for OpenVG",
        VG_COLORSPACE => "color space for OpenVG",
        HEIGHT => "height of surface",
        HORIZONTAL_RESOLUTION => "horizontal dot pitch",
        LARGEST_PBUFFER => "if true, create largest pbuffer possible",
        MIPMAP_TEXTURE => "true if texture has mipmaps",
        MIPMAP_LEVEL => "mipmap level to render to",
        MULTISAMPLE_RESOLVE => "multisample resolve behavior",
        PIXEL_ASPECT_RATIO => "display aspect ratio",
        RENDER_BUFFER => "render buffer",
        SWAP_BEHAVIOR => "buffer swap behavior",
        TEXTURE_FORMAT => "format of texture",
        TEXTURE_TARGET => "type of texture",
        VERTICAL_RESOLUTION => "vertical dot pitch",
        WIDTH => "width of surface",

        _ => "unknown EGL attribute",
    }
}
