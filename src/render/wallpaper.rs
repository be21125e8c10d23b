//! Orchestration of one full wallpaper generation: canvas creation, the wave
//! stack, quote layout and drawing, flattening and JPEG encoding.

use crate::foundation::color::{Rgb, PALETTE};
use crate::foundation::error::{QuotewallError, QuotewallResult};
use crate::quotes::store::QuoteSource;
use crate::render::text::{layout_quote, Typeface};
use crate::render::waves::{draw_wave_layers, WaveLayer, WAVE_LAYERS};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageEncoder, RgbImage, Rgba, RgbaImage};
use rand::Rng;
use std::f64::consts::TAU;

/// Immutable generation configuration, captured by the renderer at
/// construction. [`Default`] is the canonical 2560x1440 setup.
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Flat neutral background the canvas starts from.
    pub background: Rgb,
    /// Candidate base colors, picked from uniformly per generation.
    pub palette: Vec<Rgb>,
    /// Font size for the quotation, in pixels.
    pub font_px: f32,
    /// Text lines must fit within this fraction of the canvas width.
    pub text_width_frac: f64,
    /// Upward shift of the centered text block, as a fraction of height.
    pub text_lift_frac: f64,
    /// JPEG encoder quality.
    pub jpeg_quality: u8,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            width: 2560,
            height: 1440,
            background: Rgb::new(0xE6, 0xE6, 0xE6),
            palette: PALETTE.to_vec(),
            font_px: 80.0,
            text_width_frac: 0.8,
            text_lift_frac: 0.20,
            jpeg_quality: 95,
        }
    }
}

/// Composes wallpaper images. Stateless apart from the captured
/// [`RenderOpts`]; every call builds a fresh canvas.
#[derive(Clone, Debug, Default)]
pub struct WallpaperRenderer {
    opts: RenderOpts,
}

impl WallpaperRenderer {
    /// Build a renderer over the given configuration.
    pub fn new(opts: RenderOpts) -> Self {
        Self { opts }
    }

    /// The captured configuration.
    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    /// Generate one wallpaper: pick a base color and per-layer phases from
    /// `rng`, obtain a quotation from `source`, then compose.
    ///
    /// Only canvas or layout-level failures propagate; font and quote
    /// trouble has already been absorbed by the collaborators.
    #[tracing::instrument(skip_all)]
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
        source: &impl QuoteSource,
        face: &Typeface,
    ) -> QuotewallResult<RgbImage> {
        if self.opts.palette.is_empty() {
            return Err(QuotewallError::layout("palette must not be empty"));
        }
        let base = self.opts.palette[rng.random_range(0..self.opts.palette.len())];
        let mut phases = [0.0; WAVE_LAYERS];
        for phase in &mut phases {
            *phase = rng.random_range(0.0..TAU);
        }
        let quote = source.pick_text(rng);
        tracing::debug!(base = %base.to_hex(), quote_chars = quote.chars().count(), "composing wallpaper");
        self.compose(base, &phases, &quote, face)
    }

    /// Deterministic composition core: every random decision has already
    /// been made by the caller.
    pub fn compose(
        &self,
        base: Rgb,
        phases: &[f64; WAVE_LAYERS],
        quote: &str,
        face: &Typeface,
    ) -> QuotewallResult<RgbImage> {
        let width = self.opts.width;
        let height = self.opts.height;
        if width == 0 || height == 0 {
            return Err(QuotewallError::layout("canvas dimensions must be non-zero"));
        }

        let bg = Rgba([
            self.opts.background.r,
            self.opts.background.g,
            self.opts.background.b,
            255,
        ]);
        let mut canvas = RgbaImage::from_pixel(width, height, bg);

        let layers = WaveLayer::stack(base, height, phases);
        draw_wave_layers(&mut canvas, &layers);

        let max_width = (f64::from(width) * self.opts.text_width_frac) as u32;
        let layout = layout_quote(face, quote, max_width);

        // Center the text block vertically, then lift it by a fraction of
        // the canvas height. Floor division keeps oversized blocks stable.
        let total_h = layout.lines.len() as i64 * i64::from(layout.line_height);
        let lift = (f64::from(height) * self.opts.text_lift_frac) as i64;
        let mut y = (i64::from(height) - total_h).div_euclid(2) - lift;

        let ink = Rgba([0, 0, 0, 255]);
        for line in &layout.lines {
            let x = (i64::from(width) - i64::from(face.measure(line))).div_euclid(2);
            face.draw(&mut canvas, x as i32, y as i32, ink, line);
            y += i64::from(layout.line_height);
        }

        // The background is opaque and everything was composited over it,
        // so flattening just drops the alpha channel.
        Ok(image::DynamicImage::ImageRgba8(canvas).to_rgb8())
    }

    /// Serialize to JPEG at the configured quality. Failures are fatal;
    /// nothing partial is emitted.
    pub fn encode_jpeg(&self, img: &RgbImage) -> QuotewallResult<Vec<u8>> {
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, self.opts.jpeg_quality)
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|err| QuotewallError::encode(format!("jpeg encode failed: {err}")))?;
        Ok(out)
    }
}
