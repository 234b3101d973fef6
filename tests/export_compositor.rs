use egui::{Color32, pos2};
use sketchpad::{
    Drawable, ExportCompositor, ExportError, InputEvent, Renderer, RotationSampler, SketchConfig,
    Sketchpad, StampChoice, Stroke,
};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn diagonal() -> Vec<Drawable> {
    vec![Drawable::Stroke(Stroke::from_points(
        vec![pos2(0.0, 0.0), pos2(10.0, 10.0)],
        2.0,
        None,
    )
    .unwrap())]
}

fn new_sketchpad() -> Sketchpad {
    Sketchpad::new(&SketchConfig::default()).unwrap()
}

#[test]
fn test_export_is_four_times_canvas_size() {
    let compositor = ExportCompositor::new(256, 256, 4.0);
    let output = compositor.compose(&Renderer::default(), &[]).unwrap();
    assert_eq!(output.pixel_width(), 1024);
    assert_eq!(output.pixel_height(), 1024);
}

#[test]
fn test_export_scales_geometry() {
    let renderer = Renderer::default();
    let compositor = ExportCompositor::new(256, 256, 4.0);
    let output = compositor.compose(&renderer, &diagonal()).unwrap();

    let bounds = output
        .painted_bounds(renderer.background())
        .expect("the stroke is visible");
    assert!(bounds.min.x >= 0.0 && bounds.min.y >= 0.0);
    assert!(bounds.max.x >= 40.0 && bounds.max.x <= 44.0, "{bounds:?}");
    assert!(bounds.max.y >= 40.0 && bounds.max.y <= 44.0, "{bounds:?}");

    // Pixels along the scaled diagonal are inked
    assert_eq!(output.pixel(20, 20), Some(Color32::BLACK));
    assert_eq!(output.pixel(100, 100), Some(renderer.background()));
}

#[test]
fn test_export_matches_screen_at_scale_one() {
    let renderer = Renderer::default();
    let screen = ExportCompositor::new(64, 64, 1.0)
        .compose(&renderer, &diagonal())
        .unwrap();
    let bounds = screen.painted_bounds(renderer.background()).unwrap();
    assert!(bounds.max.x <= 11.0, "{bounds:?}");
}

#[test]
fn test_export_ignores_preview_and_in_progress_stroke() {
    let mut sketchpad = new_sketchpad().with_rotation_sampler(RotationSampler::fixed(0.0));
    sketchpad.handle(InputEvent::PointerDown { position: pos2(10.0, 10.0) }).unwrap();
    sketchpad.handle(InputEvent::PointerMove { position: pos2(60.0, 10.0) }).unwrap();
    sketchpad.handle(InputEvent::PointerUp).unwrap();
    let committed_only = sketchpad.export_surface().unwrap().to_image();

    // Open a second stroke and leave it unfinished
    sketchpad.handle(InputEvent::PointerDown { position: pos2(10.0, 100.0) }).unwrap();
    sketchpad.handle(InputEvent::PointerMove { position: pos2(90.0, 100.0) }).unwrap();
    assert_eq!(sketchpad.export_surface().unwrap().to_image(), committed_only);

    // Finish nothing, switch to a stamp and hover so a preview is showing
    sketchpad.handle(InputEvent::PointerLeave).unwrap();
    sketchpad
        .handle(InputEvent::SelectStamp(StampChoice::new("★").unwrap()))
        .unwrap();
    sketchpad.handle(InputEvent::PointerMove { position: pos2(128.0, 128.0) }).unwrap();
    assert!(sketchpad.controller().preview().is_some());
    assert_eq!(sketchpad.export_surface().unwrap().to_image(), committed_only);
}

#[test]
fn test_export_does_not_touch_screen_surface() {
    let mut sketchpad = new_sketchpad();
    sketchpad.handle(InputEvent::PointerMove { position: pos2(30.0, 30.0) }).unwrap();
    let before = sketchpad.surface().to_image();
    let revision = sketchpad.revision();

    let png = sketchpad.handle(InputEvent::Export).unwrap().expect("export returns bytes");
    assert_eq!(&png[..8], &PNG_SIGNATURE);
    assert_eq!(sketchpad.surface().to_image(), before);
    assert_eq!(sketchpad.revision(), revision);
}

#[test]
fn test_exported_png_decodes_at_export_size() {
    let mut sketchpad = new_sketchpad();
    sketchpad.handle(InputEvent::PointerDown { position: pos2(0.0, 0.0) }).unwrap();
    sketchpad.handle(InputEvent::PointerMove { position: pos2(10.0, 10.0) }).unwrap();
    sketchpad.handle(InputEvent::PointerUp).unwrap();

    let png = sketchpad.export_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (1024, 1024));
    assert_eq!(decoded, sketchpad.export_surface().unwrap().to_image());
}

#[test]
fn test_oversized_export_is_an_error() {
    let renderer = Renderer::default();
    for scale in [1e9, 65.0, f32::INFINITY] {
        let result = ExportCompositor::new(256, 256, scale).export_png(&renderer, &diagonal());
        assert!(matches!(result, Err(ExportError::TooLarge { width: 256, height: 256, .. })));
    }
}

#[test]
fn test_oversized_export_scale_is_rejected_by_config() {
    let config = SketchConfig {
        export_scale: 1e9,
        ..SketchConfig::default()
    };
    assert!(Sketchpad::new(&config).is_err());
}
