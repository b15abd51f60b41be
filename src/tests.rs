// eglx/src/tests.rs
//
//! Unit tests.
//!
//! The tests that talk to a real EGL implementation open the default X
//! display and skip themselves when there isn't one (or no EGL library is
//! installed), so the suite passes on headless machines.

use crate::attrib::{self, describe_attrib, AttribList, StringAttribute, SurfaceTypeFlags};
use crate::attrib::CONFIG_ATTRIBUTES;
use crate::egl;
use crate::egl::types::EGLint;
use crate::error::{Error, ToWindowingApiError, WindowingApiError};
use crate::surface::repack_rows;
use crate::{bind_api, query_api, Api, Display};

use serial_test::serial;

fn open_test_display() -> Option<Display> {
    Display::open_x11(None).ok()
}

#[test]
fn test_attrib_list_is_always_terminated() {
    let attribs = AttribList::new();
    assert!(attribs.is_empty());
    assert_eq!(attribs.terminated()[0], attrib::NONE as EGLint);

    let attribs = AttribList::new()
        .with(attrib::RED_SIZE, 8)
        .with(attrib::DEPTH_SIZE, 24);
    assert_eq!(attribs.len(), 2);
    let raw = attribs.terminated();
    assert_eq!(
        &raw[..4],
        &[
            attrib::RED_SIZE as EGLint,
            8,
            attrib::DEPTH_SIZE as EGLint,
            24,
        ],
    );
    assert_eq!(raw[4], attrib::NONE as EGLint);
}

#[test]
fn test_attrib_list_flag_helpers() {
    let flags = SurfaceTypeFlags::PBUFFER | SurfaceTypeFlags::PIXMAP;
    let raw = AttribList::new().with_surface_type(flags).terminated();
    assert_eq!(raw[0], attrib::SURFACE_TYPE as EGLint);
    assert_eq!(raw[1], flags.bits());
    assert_ne!(raw[1] & SurfaceTypeFlags::PBUFFER.bits(), 0);
}

#[test]
fn test_attrib_descriptions() {
    assert_eq!(
        describe_attrib(attrib::RED_SIZE),
        "bits of Red in the color buffer"
    );
    assert_eq!(describe_attrib(attrib::WIDTH), "width of surface");
    assert_eq!(describe_attrib(0x0000), "unknown EGL attribute");

    // Every attribute in the dump table has a real description.
    for &name in CONFIG_ATTRIBUTES.iter() {
        assert_ne!(describe_attrib(name), "unknown EGL attribute");
    }
}

#[test]
fn test_error_code_translation() {
    let cases = [
        (egl::NOT_INITIALIZED, WindowingApiError::NotInitialized),
        (egl::BAD_ACCESS, WindowingApiError::BadAccess),
        (egl::BAD_ALLOC, WindowingApiError::BadAlloc),
        (egl::BAD_ATTRIBUTE, WindowingApiError::BadAttribute),
        (egl::BAD_CONFIG, WindowingApiError::BadConfig),
        (egl::BAD_CONTEXT, WindowingApiError::BadContext),
        (egl::BAD_CURRENT_SURFACE, WindowingApiError::BadCurrentSurface),
        (egl::BAD_DISPLAY, WindowingApiError::BadDisplay),
        (egl::BAD_SURFACE, WindowingApiError::BadSurface),
        (egl::BAD_MATCH, WindowingApiError::BadMatch),
        (egl::BAD_PARAMETER, WindowingApiError::BadParameter),
        (egl::BAD_NATIVE_PIXMAP, WindowingApiError::BadNativePixmap),
        (egl::BAD_NATIVE_WINDOW, WindowingApiError::BadNativeWindow),
        (egl::CONTEXT_LOST, WindowingApiError::ContextLost),
    ];
    for &(code, expected) in cases.iter() {
        assert_eq!((code as EGLint).to_windowing_api_error(), expected);
    }

    // Unknown codes collapse to `Failed`.
    assert_eq!(0x9999.to_windowing_api_error(), WindowingApiError::Failed);
}

#[test]
fn test_repack_rows_strips_row_padding() {
    // 2x3 image. With a pitch of exactly 8 bytes the repack is the identity.
    let tight: Vec<u8> = (0..24).collect();
    assert_eq!(repack_rows(&tight, 8, 2, 3).unwrap(), tight);

    // Same pixels with 4 bytes of padding per row.
    let mut padded = vec![];
    for row in tight.chunks(8) {
        padded.extend_from_slice(row);
        padded.extend_from_slice(&[0xaa; 4]);
    }
    assert_eq!(repack_rows(&padded, 12, 2, 3).unwrap(), tight);
}

#[test]
fn test_repack_rows_rejects_short_rows() {
    let data = vec![0; 24];
    // A pitch shorter than a row of pixels can't be repacked.
    assert_eq!(repack_rows(&data, 4, 2, 3), None);
    // Neither can a buffer shorter than `height` full rows.
    assert_eq!(repack_rows(&data, 8, 2, 4), None);
}

#[test]
#[serial]
fn test_display_open_and_query() {
    let display = match open_test_display() {
        Some(display) => display,
        None => return,
    };

    let (major, minor) = display.version();
    assert!(major >= 1);
    assert!(minor >= 0);
    assert!(display.has_x11_connection());

    let version = display.query_string(StringAttribute::Version).unwrap();
    assert!(!version.is_empty());
    drop(display.query_string(StringAttribute::Vendor).unwrap());
    drop(display.query_string(StringAttribute::Extensions).unwrap());

    // The formatted summary queries all four strings.
    assert!(format!("{}", display).contains("version"));
}

#[test]
#[serial]
fn test_config_enumeration_and_negotiation() {
    let display = match open_test_display() {
        Some(display) => display,
        None => return,
    };

    let configs = display.configs().unwrap();
    assert!(!configs.is_empty());

    // Every config has a config ID, and the dump covers every attribute.
    let config_id = display.config_attrib(configs[0], attrib::CONFIG_ID).unwrap();
    assert!(config_id > 0);
    let summary = display.describe_config(configs[0]);
    assert_eq!(summary.lines().count(), CONFIG_ATTRIBUTES.len());
    assert!(!display.describe_configs(&configs).is_empty());

    // Negotiating an RGB888 pbuffer-capable config matches the request.
    let attribs = AttribList::new()
        .with(attrib::RED_SIZE, 8)
        .with(attrib::GREEN_SIZE, 8)
        .with(attrib::BLUE_SIZE, 8)
        .with_surface_type(SurfaceTypeFlags::PBUFFER);
    match display.choose_config(&attribs) {
        Ok(config) => {
            assert!(display.config_attrib(config, attrib::RED_SIZE).unwrap() >= 8);
            let surface_type = display.config_attrib(config, attrib::SURFACE_TYPE).unwrap();
            assert_ne!(surface_type & SurfaceTypeFlags::PBUFFER.bits(), 0);
        }
        Err(Error::NoPixelFormatFound) => {}
        Err(err) => panic!("choose_config failed: {:?}", err),
    }

    // An impossible request is not an error, just empty.
    let impossible = AttribList::new().with(attrib::RED_SIZE, 1024);
    assert!(display.choose_configs(&impossible).unwrap().is_empty());
}

#[test]
#[serial]
fn test_pbuffer_context_and_readback() {
    let display = match open_test_display() {
        Some(display) => display,
        None => return,
    };

    let attribs = AttribList::new()
        .with(attrib::RED_SIZE, 8)
        .with(attrib::GREEN_SIZE, 8)
        .with(attrib::BLUE_SIZE, 8)
        .with_surface_type(SurfaceTypeFlags::PBUFFER);
    let config = match display.choose_config(&attribs) {
        Ok(config) => config,
        Err(Error::NoPixelFormatFound) => return,
        Err(err) => panic!("choose_config failed: {:?}", err),
    };

    let surface_attribs = AttribList::new()
        .with(attrib::WIDTH, 64)
        .with(attrib::HEIGHT, 64);
    let surface = display.create_pbuffer_surface(config, &surface_attribs).unwrap();
    assert_eq!(surface.kind(), crate::SurfaceKind::Pbuffer);
    let size = surface.size().unwrap();
    assert_eq!((size.width, size.height), (64, 64));

    // Failures out of the process-wide calls carry the translated native
    // code.
    match bind_api(Api::OpenGlEs) {
        Ok(()) => assert_eq!(query_api(), Some(Api::OpenGlEs)),
        Err(Error::ApiBindingFailed(_)) => return,
        Err(err) => panic!("bind_api failed: {:?}", err),
    }

    let context = match display.create_context(config, None, &AttribList::new()) {
        Ok(context) => context,
        // The driver may not offer a client API at the default version.
        Err(Error::ContextCreationFailed(_)) => return,
        Err(err) => panic!("create_context failed: {:?}", err),
    };

    {
        let _guard = match context.make_current_scoped(Some(&surface), Some(&surface)) {
            Ok(guard) => guard,
            Err(Error::MakeCurrentFailed(_)) => return,
            Err(err) => panic!("make_current failed: {:?}", err),
        };
        match crate::wait_client() {
            Ok(()) | Err(Error::WaitFailed(_)) => {}
            Err(err) => panic!("wait_client failed: {:?}", err),
        }
        surface.swap_buffers().unwrap();

        match surface.copy_to_image() {
            Ok(image) => {
                assert_eq!((image.size.width, image.size.height), (64, 64));
                assert_eq!(image.pixels.len(), image.stride() * 64);
            }
            // Not every implementation can `eglCopyBuffers` out of a
            // pbuffer.
            Err(Error::ReadbackFailed(_)) => {}
            Err(err) => panic!("copy_to_image failed: {:?}", err),
        }
    }

    display.release_current().ok();
}

#[test]
#[serial]
fn test_default_display_has_no_x11_interop() {
    // The default display never carries an X connection, so everything that
    // needs one reports `NoX11Connection`.
    let display = match Display::open() {
        Ok(display) => display,
        Err(_) => return,
    };
    assert!(!display.has_x11_connection());

    let configs = display.configs().unwrap();
    assert!(!configs.is_empty());
    match display.create_pixmap_surface(configs[0], 0, &AttribList::new()) {
        Err(Error::NoX11Connection) => {}
        _ => panic!(),
    }

    let attribs = AttribList::new().with_surface_type(SurfaceTypeFlags::PBUFFER);
    let config = match display.choose_config(&attribs) {
        Ok(config) => config,
        Err(Error::NoPixelFormatFound) => return,
        Err(err) => panic!("choose_config failed: {:?}", err),
    };
    let surface_attribs = AttribList::new()
        .with(attrib::WIDTH, 16)
        .with(attrib::HEIGHT, 16);
    let surface = match display.create_pbuffer_surface(config, &surface_attribs) {
        Ok(surface) => surface,
        Err(Error::SurfaceCreationFailed(_)) => return,
        Err(err) => panic!("create_pbuffer_surface failed: {:?}", err),
    };
    match surface.copy_to_image() {
        Err(Error::NoX11Connection) => {}
        _ => panic!(),
    }
}

#[test]
#[serial]
fn test_shared_context_creation() {
    let display = match open_test_display() {
        Some(display) => display,
        None => return,
    };

    let attribs = AttribList::new().with_surface_type(SurfaceTypeFlags::PBUFFER);
    let config = match display.choose_config(&attribs) {
        Ok(config) => config,
        Err(Error::NoPixelFormatFound) => return,
        Err(err) => panic!("choose_config failed: {:?}", err),
    };

    let first = match display.create_context(config, None, &AttribList::new()) {
        Ok(context) => context,
        Err(Error::ContextCreationFailed(_)) => return,
        Err(err) => panic!("create_context failed: {:?}", err),
    };
    let second = display
        .create_context(config, Some(&first), &AttribList::new())
        .unwrap();
    drop(second);
    drop(first);
}
