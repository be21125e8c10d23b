//! The layered-horizon background: six translucent sine-wave bands derived
//! from a single base color, painted lightest/most-transparent first so the
//! darker, more opaque bands in front partially occlude the ones behind.

use crate::foundation::color::{adjust_brightness, Rgb};
use image::{Pixel, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Number of wave bands per image.
pub const WAVE_LAYERS: usize = 6;

const BASE_WAVELENGTH: f64 = 420.0;
const BASE_AMPLITUDE: f64 = 52.0;
/// Layer 0's undisturbed waterline, as a fraction of canvas height from the
/// bottom edge.
const BASELINE_FRAC: f64 = 0.32;
/// Waterline rise per layer, as a fraction of canvas height.
const GAP_FRAC: f64 = 0.035;
/// Horizontal waveform sampling step in pixels.
const SAMPLE_STEP: u32 = 6;

/// One translucent sine-wave band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveLayer {
    /// Brightness-adjusted derivative of the base color.
    pub tint: Rgb,
    /// Source alpha for the fill.
    pub alpha: u8,
    /// Horizontal period in pixels, always positive.
    pub wavelength: f64,
    /// Peak displacement from the waterline in pixels.
    pub amplitude: f64,
    /// Phase offset in radians, drawn fresh per layer per image.
    pub phase: f64,
    /// Undisturbed waterline in canvas coordinates (y grows downward).
    pub baseline: f64,
}

impl WaveLayer {
    /// Derive the full six-band stack for one image.
    ///
    /// Index 0 is the lightest and most transparent band with the lowest
    /// waterline; index 5 the darkest and most opaque with the highest.
    pub fn stack(base: Rgb, canvas_height: u32, phases: &[f64; WAVE_LAYERS]) -> [Self; WAVE_LAYERS] {
        let h = f64::from(canvas_height);
        std::array::from_fn(|i| {
            let fi = i as f64;
            Self {
                tint: adjust_brightness(base, 1.0 - 0.06 * fi),
                alpha: layer_alpha(i),
                wavelength: BASE_WAVELENGTH * (1.0 + 0.03 * fi),
                amplitude: BASE_AMPLITUDE * (1.0 + 0.05 * fi),
                phase: phases[i],
                baseline: h - (h * BASELINE_FRAC - fi * h * GAP_FRAC),
            }
        })
    }

    /// Waveform height at horizontal position `x`:
    /// `baseline - amplitude * sin(2*pi*x / wavelength + phase)`.
    pub fn surface_y(&self, x: f64) -> f64 {
        self.baseline - self.amplitude * (TAU * x / self.wavelength + self.phase).sin()
    }
}

/// `min(255, 25 + 38*i)`: progressively more opaque with depth. The clamp is
/// kept verbatim even though it only triggers from index 7 up, past the fixed
/// six-layer count.
fn layer_alpha(i: usize) -> u8 {
    255u32.min(25 + 38 * i as u32) as u8
}

/// Paint every band onto `canvas` in index order 0..5 with source-over
/// compositing, so later bands paint over earlier ones.
pub fn draw_wave_layers(canvas: &mut RgbaImage, layers: &[WaveLayer]) {
    for layer in layers {
        fill_wave(canvas, layer);
    }
}

/// Fill the closed polygon under one waveform.
///
/// The surface is sampled every [`SAMPLE_STEP`] px from x=0 through the first
/// sample at or past the right edge, and the shape closes through the
/// bottom-right and bottom-left corners. Each pixel column therefore fills
/// from the linearly interpolated surface straight down to the bottom edge,
/// blended over whatever is already on the canvas.
fn fill_wave(canvas: &mut RgbaImage, layer: &WaveLayer) {
    let (width, height) = canvas.dimensions();
    let fill = Rgba([layer.tint.r, layer.tint.g, layer.tint.b, layer.alpha]);

    let mut samples = Vec::with_capacity((width / SAMPLE_STEP + 2) as usize);
    let mut x = 0u32;
    loop {
        samples.push(layer.surface_y(f64::from(x)));
        if x >= width {
            break;
        }
        x += SAMPLE_STEP;
    }

    for col in 0..width {
        let seg = (col / SAMPLE_STEP) as usize;
        let x0 = f64::from(seg as u32 * SAMPLE_STEP);
        let t = (f64::from(col) - x0) / f64::from(SAMPLE_STEP);
        let surface = samples[seg] + (samples[seg + 1] - samples[seg]) * t;

        let top = surface.ceil().max(0.0) as u32;
        for row in top..height {
            canvas.get_pixel_mut(col, row).blend(&fill);
        }
    }
}
