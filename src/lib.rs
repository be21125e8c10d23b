//! Quotewall procedurally generates desktop wallpapers: a layered,
//! semi-transparent sine-wave horizon in a randomly chosen color family,
//! overlaid with a quotation rendered centered in a large font.
//!
//! The public API is value-oriented and synchronous:
//!
//! - Build a [`WallpaperRenderer`] (the [`Default`] config is 2560x1440)
//! - Call [`WallpaperRenderer::generate`] with an injected random source,
//!   a [`QuoteSource`] and a [`Typeface`]
//! - Encode the result with [`WallpaperRenderer::encode_jpeg`]
//!
//! All randomness flows through the caller-supplied `Rng`, so seeded runs
//! reproduce byte-identical images.
#![forbid(unsafe_code)]

mod foundation;

pub mod quotes;
pub mod render;
pub mod resources;

pub use crate::foundation::color::{adjust_brightness, Rgb, PALETTE, PALETTE_HEX};
pub use crate::foundation::error::{QuotewallError, QuotewallResult};

pub use crate::quotes::store::{QuoteSource, QuoteStore, DEFAULT_QUOTE};
pub use crate::render::text::{layout_quote, wrap_text, LineLayout, Typeface};
pub use crate::render::wallpaper::{RenderOpts, WallpaperRenderer};
pub use crate::render::waves::{draw_wave_layers, WaveLayer, WAVE_LAYERS};
