use super::*;

fn frame(px: [u8; 4], w: u32, h: u32) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn png_keeps_size_and_unpremultiplies() {
    let bytes = encode_frame(&frame([64, 0, 0, 128], 7, 3), RasterFormat::Png).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (7, 3));
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
}

#[test]
fn jpeg_is_opaque_over_black() {
    let bytes = encode_frame(&frame([0, 0, 0, 0], 8, 8), RasterFormat::Jpeg).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (8, 8));
    let p = img.get_pixel(3, 3).0;
    assert!(p[0] < 4 && p[3] == 255, "{p:?}");
}

#[test]
fn rejects_short_buffer() {
    let mut f = frame([0, 0, 0, 255], 2, 2);
    f.data.pop();
    assert!(matches!(
        encode_frame(&f, RasterFormat::Png),
        Err(PostkitError::Encode(_))
    ));
}

#[test]
fn format_extensions() {
    assert_eq!(RasterFormat::Png.extension(), "png");
    assert_eq!(RasterFormat::Jpeg.extension(), "jpg");
    assert_eq!(RasterFormat::from_extension("JPEG"), Some(RasterFormat::Jpeg));
    assert_eq!(RasterFormat::from_extension("gif"), None);
}
