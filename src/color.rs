//! Color model for the picker.
//!
//! A single color can be expressed three ways:
//! - RGB888: three 8-bit channels, or one 24-bit packed integer
//! - RGB565: 5-bit red, 6-bit green, 5-bit blue packed into 16 bits
//!   (bits 15-11 red, 10-5 green, 4-0 blue)
//! - HSV: hue in degrees `[0, 360)`, saturation and value in `[0, 1]`
//!
//! Conversions are lossy. Going from 888 to 565 drops the low bits of every
//! channel, so only the `565 -> 888 -> 565` round trip is exact.
//!
//! # Examples
//!
//! ## Packing channels
//!
//! ```
//! use edgy_color_picker::color::{rgb565, rgb888};
//!
//! assert_eq!(rgb888(255, 0, 0), 0xFF_0000);
//! assert_eq!(rgb565(31, 0, 0), 0xF800);
//! ```
//!
//! ## Moving between representations
//!
//! ```
//! use edgy_color_picker::color::{Rgb565, Rgb888};
//!
//! let red = Rgb565::from_value(0xF800);
//! assert_eq!(red.to_rgb888(), Rgb888::new(255, 0, 0));
//! assert_eq!(Rgb565::from_rgb888(Rgb888::new(255, 0, 0)), red);
//!
//! let yellow = Rgb565::from_hsv(60.0, 1.0, 1.0);
//! assert_eq!(yellow.hex(), "#FFE0");
//! ```
//!
//! ## Hex text
//!
//! ```
//! use edgy_color_picker::color::Rgb565;
//!
//! let color: Rgb565 = "#07e0".parse().unwrap();
//! assert_eq!(color.green(), 63);
//! assert!(Rgb565::parse_hex("#FF0000").is_err()); // 565 text is four digits
//! ```

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Number of hex digits in the canonical text form of a packed RGB565 color.
pub const HEX_DIGITS: usize = 4;

/// Per-channel maximum for a target bit depth.
///
/// [`hsv_to_rgb`] scales each unit component by these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelDepth {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ChannelDepth {
    /// 5/6/5 bits.
    pub const RGB565: Self = Self {
        red: 31,
        green: 63,
        blue: 31,
    };

    /// 8 bits per channel.
    pub const RGB888: Self = Self {
        red: 255,
        green: 255,
        blue: 255,
    };
}

/// Pack three 8-bit channels into a 24-bit integer.
///
/// Inputs are masked to 8 bits, so out-of-range values wrap instead of
/// saturating.
#[must_use]
pub const fn rgb888(red: u32, green: u32, blue: u32) -> u32 {
    ((red & 0xFF) << 16) | ((green & 0xFF) << 8) | (blue & 0xFF)
}

/// Pack pre-scaled 5/6/5 channels into a 16-bit integer.
///
/// Each channel is masked to its field width before packing.
#[must_use]
pub const fn rgb565(red: u16, green: u16, blue: u16) -> u16 {
    ((red & 0x1F) << 11) | ((green & 0x3F) << 5) | (blue & 0x1F)
}

/// Quantize 8-bit channels to 5/6/5 by dropping low bits.
#[must_use]
pub const fn rgb888_to_rgb565(red: u8, green: u8, blue: u8) -> (u8, u8, u8) {
    (red >> 3, green >> 2, blue >> 3)
}

/// Expand 5/6/5 channels to 8 bits with proportional scaling.
///
/// `round(channel * 255 / max)` lands inside the bucket that
/// [`rgb888_to_rgb565`] maps back to `channel`, which makes the 565 round
/// trip exact.
#[must_use]
pub const fn rgb565_to_rgb888(red: u8, green: u8, blue: u8) -> (u8, u8, u8) {
    (
        expand_channel(red & 0x1F, ChannelDepth::RGB565.red),
        expand_channel(green & 0x3F, ChannelDepth::RGB565.green),
        expand_channel(blue & 0x1F, ChannelDepth::RGB565.blue),
    )
}

#[expect(clippy::cast_possible_truncation, reason = "channel <= max, result <= 255")]
const fn expand_channel(channel: u8, max: u8) -> u8 {
    let max = max as u32;
    ((channel as u32 * 255 + max / 2) / max) as u8
}

/// One of the six 60° hue ranges of the HSV to RGB conversion.
///
/// Ranges are half-open, so a hue sitting exactly on a boundary belongs to
/// the upper sector: `60.0` is [`HueSector::YellowGreen`], not
/// [`HueSector::RedYellow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HueSector {
    /// `[0, 60)`
    RedYellow = 0,
    /// `[60, 120)`
    YellowGreen = 1,
    /// `[120, 180)`
    GreenCyan = 2,
    /// `[180, 240)`
    CyanBlue = 3,
    /// `[240, 300)`
    BlueMagenta = 4,
    /// `[300, 360)`
    MagentaRed = 5,
}

impl HueSector {
    /// Sector containing `hue` (degrees, expected in `[0, 360)`).
    #[must_use]
    pub fn from_hue(hue: f64) -> Self {
        if hue < 60.0 {
            Self::RedYellow
        } else if hue < 120.0 {
            Self::YellowGreen
        } else if hue < 180.0 {
            Self::GreenCyan
        } else if hue < 240.0 {
            Self::CyanBlue
        } else if hue < 300.0 {
            Self::BlueMagenta
        } else {
            Self::MagentaRed
        }
    }

    /// Arrange chroma `c`, intermediate `x` and zero into an RGB triple.
    fn arrange(self, c: f64, x: f64) -> (f64, f64, f64) {
        match self {
            Self::RedYellow => (c, x, 0.0),
            Self::YellowGreen => (x, c, 0.0),
            Self::GreenCyan => (0.0, c, x),
            Self::CyanBlue => (0.0, x, c),
            Self::BlueMagenta => (x, 0.0, c),
            Self::MagentaRed => (c, 0.0, x),
        }
    }
}

/// Convert HSV to RGB channels scaled to `depth`.
///
/// Hue wraps into `[0, 360)`; saturation and value are clamped to `[0, 1]`.
/// Every output channel is within `0..=depth.<channel>`.
#[must_use]
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64, depth: ChannelDepth) -> (u8, u8, u8) {
    let hsv = Hsv::new(hue, saturation, value);
    let c = hsv.value * hsv.saturation;
    let x = c * (1.0 - ((hsv.hue / 60.0) % 2.0 - 1.0).abs());
    let m = hsv.value - c;
    let (r, g, b) = HueSector::from_hue(hsv.hue).arrange(c, x);

    (
        scale_unit(r + m, depth.red),
        scale_unit(g + m, depth.green),
        scale_unit(b + m, depth.blue),
    )
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clamped to [0, max] before the cast"
)]
fn scale_unit(component: f64, max: u8) -> u8 {
    (component.clamp(0.0, 1.0) * f64::from(max)).round() as u8
}

/// Convert 8-bit RGB channels to HSV.
///
/// Grays (no chroma) report a hue of `0`, black reports a saturation of `0`.
#[must_use]
pub fn rgb_to_hsv(red: u8, green: u8, blue: u8) -> Hsv {
    let r = f64::from(red) / 255.0;
    let g = f64::from(green) / 255.0;
    let b = f64::from(blue) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max < f64::EPSILON { 0.0 } else { delta / max };

    let hue = if delta < f64::EPSILON {
        0.0
    } else if (max - r).abs() < f64::EPSILON {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if (max - g).abs() < f64::EPSILON {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    Hsv::new(hue, saturation, max)
}

/// Hue/saturation/value triple.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Degrees in `[0, 360)`.
    pub hue: f64,
    /// Unit fraction.
    pub saturation: f64,
    /// Unit fraction.
    pub value: f64,
}

impl Hsv {
    /// Create a normalized triple.
    ///
    /// Hue wraps into `[0, 360)`, saturation and value clamp to `[0, 1]`.
    /// Non-finite components become `0`.
    #[must_use]
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue: normalize_hue(hue),
            saturation: clamp_unit(saturation),
            value: clamp_unit(value),
        }
    }

    #[must_use]
    pub fn to_rgb565(self) -> Rgb565 {
        Rgb565::from_hsv(self.hue, self.saturation, self.value)
    }

    #[must_use]
    pub fn to_rgb888(self) -> Rgb888 {
        Rgb888::from_hsv(self.hue, self.saturation, self.value)
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsv({:.1}, {:.3}, {:.3})",
            self.hue, self.saturation, self.value
        )
    }
}

pub(crate) fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid of a tiny negative rounds up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

pub(crate) fn clamp_unit(component: f64) -> f64 {
    if component.is_nan() {
        0.0
    } else {
        component.clamp(0.0, 1.0)
    }
}

/// 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb888 {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb888 {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Decompose a packed 24-bit value. Bits above 24 are ignored.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "each channel is masked to 8 bits")]
    pub const fn from_value(value: u32) -> Self {
        Self {
            red: ((value >> 16) & 0xFF) as u8,
            green: ((value >> 8) & 0xFF) as u8,
            blue: (value & 0xFF) as u8,
        }
    }

    /// Packed 24-bit value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        rgb888(self.red as u32, self.green as u32, self.blue as u32)
    }

    #[must_use]
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let (red, green, blue) = hsv_to_rgb(hue, saturation, value, ChannelDepth::RGB888);
        Self::new(red, green, blue)
    }

    #[must_use]
    pub fn to_hsv(&self) -> Hsv {
        rgb_to_hsv(self.red, self.green, self.blue)
    }

    /// Quantize to RGB565 (truncating).
    #[must_use]
    pub const fn to_rgb565(&self) -> Rgb565 {
        Rgb565::from_rgb888(*self)
    }

    /// CSS-style `#RRGGBB`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl From<(u8, u8, u8)> for Rgb888 {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<[u8; 3]> for Rgb888 {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl fmt::Display for Rgb888 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Color packed into 16 bits as 5-bit red, 6-bit green, 5-bit blue.
///
/// Only the packed value is stored; channels are read out of it, so the two
/// can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);

    #[must_use]
    pub const fn from_value(value: u16) -> Self {
        Self(value)
    }

    /// Build from 5/6/5 channels. Channels are masked to their field width.
    #[must_use]
    pub const fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        Self(rgb565(red as u16, green as u16, blue as u16))
    }

    /// Quantize an 8-bit color by dropping low bits.
    #[must_use]
    pub const fn from_rgb888(color: Rgb888) -> Self {
        let (red, green, blue) = rgb888_to_rgb565(color.red, color.green, color.blue);
        Self::from_channels(red, green, blue)
    }

    #[must_use]
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let (red, green, blue) = hsv_to_rgb(hue, saturation, value, ChannelDepth::RGB565);
        Self::from_channels(red, green, blue)
    }

    /// Packed 16-bit value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// 5-bit red channel.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "masked to 5 bits")]
    pub const fn red(&self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }

    /// 6-bit green channel.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "masked to 6 bits")]
    pub const fn green(&self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// 5-bit blue channel.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "masked to 5 bits")]
    pub const fn blue(&self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    #[must_use]
    pub const fn to_rgb888(&self) -> Rgb888 {
        let (red, green, blue) = rgb565_to_rgb888(self.red(), self.green(), self.blue());
        Rgb888::new(red, green, blue)
    }

    /// HSV of the color as it displays once expanded to 8 bits.
    #[must_use]
    pub fn to_hsv(&self) -> Hsv {
        self.to_rgb888().to_hsv()
    }

    /// Canonical text form: `#` plus four uppercase hex digits.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:04X}", self.0)
    }

    /// Parse a packed RGB565 hex string.
    ///
    /// Accepts an optional leading `#`, surrounding whitespace and either
    /// letter case. Exactly [`HEX_DIGITS`] digits are required.
    ///
    /// # Errors
    ///
    /// - `Empty` if there are no digits at all
    /// - `InvalidDigits` if anything other than hex digits follows the `#`
    /// - `InvalidLength` if the digit count is not four
    pub fn parse_hex(text: &str) -> Result<Self, HexParseError> {
        static HEX_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^#?([0-9a-fA-F]*)$").expect("valid regex"));

        let text = text.trim();
        let Some(caps) = HEX_RE.captures(text) else {
            return Err(HexParseError::InvalidDigits(text.to_string()));
        };

        let digits = &caps[1];
        if digits.is_empty() {
            return Err(HexParseError::Empty);
        }
        if digits.len() != HEX_DIGITS {
            return Err(HexParseError::InvalidLength(text.to_string()));
        }

        u16::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| HexParseError::InvalidDigits(text.to_string()))
    }
}

impl fmt::Display for Rgb565 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Rgb565 {
    type Err = HexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl From<u16> for Rgb565 {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.0
    }
}

impl From<Rgb888> for Rgb565 {
    fn from(color: Rgb888) -> Self {
        Self::from_rgb888(color)
    }
}

impl From<Rgb565> for Rgb888 {
    fn from(color: Rgb565) -> Self {
        color.to_rgb888()
    }
}

/// Error type for hex color text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexParseError {
    Empty,
    InvalidLength(String),
    InvalidDigits(String),
}

impl fmt::Display for HexParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty hex color"),
            Self::InvalidLength(s) => {
                write!(f, "Hex color must have {HEX_DIGITS} digits: {s}")
            }
            Self::InvalidDigits(s) => write!(f, "Invalid hex color: {s}"),
        }
    }
}

impl std::error::Error for HexParseError {}
