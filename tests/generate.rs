//! End-to-end generation scenarios.

use std::f64::consts::TAU;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use quotewall::{
    QuoteSource, QuoteStore, RenderOpts, Rgb, Typeface, WallpaperRenderer, DEFAULT_QUOTE,
    WAVE_LAYERS,
};

fn missing_store() -> QuoteStore {
    QuoteStore::new("does/not/exist/quotes.json")
}

#[test]
fn full_canvas_compose_with_zero_phases() {
    // Scenario A: base #E57373, all phases 0, the default quotation.
    let renderer = WallpaperRenderer::new(RenderOpts::default());
    let face = Typeface::fallback(80.0);
    let base = Rgb::parse_hex("#E57373").unwrap();

    let layers = quotewall::WaveLayer::stack(base, 1440, &[0.0; WAVE_LAYERS]);
    for x in (0..=2560).step_by(6) {
        let x = f64::from(x as u32);
        let expected = 1440.0 - 460.8 - 52.0 * (TAU * x / 420.0).sin();
        assert!((layers[0].surface_y(x) - expected).abs() < 1e-9);
    }

    let img = renderer
        .compose(base, &[0.0; WAVE_LAYERS], DEFAULT_QUOTE, &face)
        .unwrap();
    assert_eq!(img.dimensions(), (2560, 1440));

    // With all phases 0, every layer's surface at x=0 sits on its baseline,
    // so layer 0 starts filling column 0 at ceil(1440 - 460.8) = 980 and the
    // next layer not before 1030. Just below the layer-0 waterline the
    // background must have been tinted; well above every band and the text
    // block it must be untouched.
    let background = image::Rgb([0xE6, 0xE6, 0xE6]);
    assert_ne!(*img.get_pixel(0, 985), background);
    assert_eq!(*img.get_pixel(0, 100), background);
}

#[test]
fn empty_quote_source_falls_back_to_the_default() {
    // Scenario B: the source never raises and never returns empty.
    let mut rng = StdRng::seed_from_u64(11);
    let text = missing_store().pick_text(&mut rng);
    assert_eq!(text, DEFAULT_QUOTE);
}

#[test]
fn missing_font_still_generates_a_valid_image() {
    // Scenario C: a nonexistent font path downgrades, never fails.
    let face = Typeface::open_or_fallback(Path::new("no/such/font.ttf"), 80.0);
    let renderer = WallpaperRenderer::new(RenderOpts {
        width: 320,
        height: 180,
        ..RenderOpts::default()
    });
    let mut rng = StdRng::seed_from_u64(3);
    let img = renderer.generate(&mut rng, &missing_store(), &face).unwrap();
    assert_eq!(img.dimensions(), (320, 180));
}

#[test]
fn identically_seeded_runs_are_byte_identical() {
    let renderer = WallpaperRenderer::new(RenderOpts {
        width: 320,
        height: 180,
        ..RenderOpts::default()
    });
    let face = Typeface::fallback(80.0);
    let store = missing_store();

    let run = || {
        let mut rng = StdRng::seed_from_u64(42);
        let img = renderer.generate(&mut rng, &store, &face).unwrap();
        renderer.encode_jpeg(&img).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn differently_seeded_runs_differ() {
    let renderer = WallpaperRenderer::new(RenderOpts {
        width: 320,
        height: 180,
        ..RenderOpts::default()
    });
    let face = Typeface::fallback(80.0);
    let store = missing_store();

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let img = renderer.generate(&mut rng, &store, &face).unwrap();
        img.as_raw().clone()
    };
    assert_ne!(run(1), run(2));
}
