use super::*;
use crate::foundation::core::CanvasSize;
use crate::headless::sink::{DirBatchSink, InMemoryBatchSink};

fn png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn scene() -> SceneDescription {
    SceneDescription {
        canvas: CanvasSize::new(20, 20).unwrap(),
        bg_color: "#000000".into(),
        ..SceneDescription::default()
    }
}

fn headless() -> HeadlessRenderer {
    HeadlessRenderer::new(FontBook::new(), RenderSettings::default(), None)
}

#[test]
fn names_are_one_based_and_skip_failures() {
    let inputs = vec![
        png(30, 10, [255, 0, 0, 255]),
        b"not an image".to_vec(),
        png(10, 30, [0, 255, 0, 255]),
    ];
    let mut sink = InMemoryBatchSink::new();
    let report = headless()
        .render_batch(&scene(), &inputs, RasterFormat::Png, &mut sink)
        .unwrap();

    assert_eq!(report.rendered, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 1);
    let names: Vec<&str> = sink.images().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["post-1.png", "post-3.png"]);
    assert!(sink.is_finished());
    assert_eq!(sink.config().map(|c| c.items), Some(3));
}

#[test]
fn every_output_is_canvas_sized_and_covered() {
    let inputs = [png(30, 10, [255, 0, 0, 255])];
    let mut sink = InMemoryBatchSink::new();
    headless()
        .render_batch(&scene(), &inputs, RasterFormat::Png, &mut sink)
        .unwrap();
    let img = image::load_from_memory(&sink.images()[0].1)
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (20, 20));
    let p = img.get_pixel(0, 19).0;
    assert!(p[0] > 250 && p[1] < 5 && p[2] < 5, "{p:?}");
}

#[test]
fn jpeg_batch_uses_jpg_extension() {
    let inputs = [png(4, 4, [0, 0, 255, 255])];
    let mut sink = InMemoryBatchSink::new();
    headless()
        .render_batch(&scene(), &inputs, RasterFormat::Jpeg, &mut sink)
        .unwrap();
    assert_eq!(sink.images()[0].0, "post-1.jpg");
    assert_eq!(&sink.images()[0].1[..2], &[0xFF, 0xD8]);
}

#[test]
fn invalid_scene_aborts_before_sink() {
    let mut bad = scene();
    bad.text_layers.clear();
    let mut sink = InMemoryBatchSink::new();
    let inputs: [Vec<u8>; 0] = [];
    assert!(headless()
        .render_batch(&bad, &inputs, RasterFormat::Png, &mut sink)
        .is_err());
    assert!(sink.config().is_none());
}

#[test]
fn dir_sink_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut sink = DirBatchSink::new(&out);
    let inputs = [png(4, 4, [0, 0, 255, 255]), png(4, 4, [0, 0, 0, 255])];
    headless()
        .render_batch(&scene(), &inputs, RasterFormat::Png, &mut sink)
        .unwrap();
    assert_eq!(sink.written().len(), 2);
    assert!(out.join("post-2.png").is_file());
}
