use crate::foundation::error::{QuotewallError, QuotewallResult};
use serde::{Deserialize, Serialize};

/// sRGB triple, one byte per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-hex-digit color string; a leading `#` is optional.
    ///
    /// Inputs are palette-controlled, so malformed strings are out of
    /// contract and reported as a [`QuotewallError::Resource`].
    pub fn parse_hex(s: &str) -> QuotewallResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> QuotewallResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| QuotewallError::resource(format!("invalid hex byte \"{pair}\"")))
        }

        if s.len() != 6 || !s.is_ascii() {
            return Err(QuotewallError::resource(format!(
                "hex color must be #RRGGBB (case-insensitive), got \"{s}\""
            )));
        }

        Ok(Self {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
        })
    }

    /// Format as `#RRGGBB` (uppercase).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Scale each channel by `factor`, truncating toward zero and clamping to
/// `0..=255`. `factor < 1` darkens, `> 1` brightens.
pub fn adjust_brightness(rgb: Rgb, factor: f64) -> Rgb {
    fn scale(c: u8, factor: f64) -> u8 {
        (f64::from(c) * factor).clamp(0.0, 255.0) as u8
    }

    Rgb {
        r: scale(rgb.r, factor),
        g: scale(rgb.g, factor),
        b: scale(rgb.b, factor),
    }
}

/// The 15 candidate base colors, as authored.
pub const PALETTE_HEX: [&str; 15] = [
    "#E57373", "#F06292", "#BA68C8", "#9575CD", "#7986CB", "#64B5F6", "#4DB6AC", "#81C784",
    "#DCE775", "#FFD54F", "#5488BC", "#917C6B", "#AA9F7C", "#A29296", "#515E68",
];

/// [`PALETTE_HEX`] pre-parsed; a regression test keeps both in sync.
pub const PALETTE: [Rgb; 15] = [
    Rgb::new(0xE5, 0x73, 0x73),
    Rgb::new(0xF0, 0x62, 0x92),
    Rgb::new(0xBA, 0x68, 0xC8),
    Rgb::new(0x95, 0x75, 0xCD),
    Rgb::new(0x79, 0x86, 0xCB),
    Rgb::new(0x64, 0xB5, 0xF6),
    Rgb::new(0x4D, 0xB6, 0xAC),
    Rgb::new(0x81, 0xC7, 0x84),
    Rgb::new(0xDC, 0xE7, 0x75),
    Rgb::new(0xFF, 0xD5, 0x4F),
    Rgb::new(0x54, 0x88, 0xBC),
    Rgb::new(0x91, 0x7C, 0x6B),
    Rgb::new(0xAA, 0x9F, 0x7C),
    Rgb::new(0xA2, 0x92, 0x96),
    Rgb::new(0x51, 0x5E, 0x68),
];
