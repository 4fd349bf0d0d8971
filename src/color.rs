//! Per-pixel color operations.
//!
//! All operations are pure: they borrow their input surfaces and return a
//! freshly allocated output. Channel math runs in f32 and rounds to nearest
//! on the way back to u8, so identity parameters reproduce the input bit
//! for bit.

use crate::error::{EngineError, Result};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Pivot for contrast scaling, per the RGBA8 mid-gray convention.
const MID_GRAY: f32 = 128.0;

/// Saturation, brightness, and contrast parameters for [`adjust_color`].
///
/// `Default` is the identity adjustment. Saturation and contrast are scale
/// factors (1.0 = unchanged) and clamp to 0 on use when negative; brightness
/// is a normalized offset (0.0 = unchanged, 0.1 = +10% of full scale) and
/// may be negative to darken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorAdjustment {
    pub saturation: f32,
    pub brightness: f32,
    pub contrast: f32,
}

impl Default for ColorAdjustment {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            brightness: 0.0,
            contrast: 1.0,
        }
    }
}

/// Flat RGBA tint for [`make_overlay`]. Alpha is straight (not
/// premultiplied) and defaults to opaque when deserialized without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque_alpha")]
    pub a: u8,
}

fn opaque_alpha() -> u8 {
    255
}

impl OverlayColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<OverlayColor> for Rgba<u8> {
    fn from(color: OverlayColor) -> Self {
        Rgba([color.r, color.g, color.b, color.a])
    }
}

/// Compositing mode for [`blend`].
///
/// Each mode defines the full-strength composite per channel; the
/// foreground's alpha then interpolates between the background and that
/// composite, and the output alpha is the alpha union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Straight alpha-over: an opaque foreground replaces the background.
    Normal,
    /// `255 - (255 - back) * (255 - front) / 255`. Never darkens.
    Screen,
    /// `back * front / 255`. Never lightens.
    Multiply,
}

/// Apply saturation, then brightness, then contrast, in that order.
///
/// Saturation scales each channel's distance from the pixel's Rec. 709 luma,
/// brightness adds a uniform offset, and contrast scales the distance from
/// mid-gray (128). The result is clamped to [0, 255] per channel; alpha
/// passes through unchanged.
pub fn adjust_color(image: &RgbaImage, adjustment: &ColorAdjustment) -> Result<RgbaImage> {
    ensure_nonempty(image)?;

    let saturation = adjustment.saturation.max(0.0);
    let contrast = adjustment.contrast.max(0.0);
    let offset = adjustment.brightness * 255.0;

    let mut out = RgbaImage::new(image.width(), image.height());
    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        let Rgba([r, g, b, a]) = *src;
        let (rf, gf, bf) = (r as f32, g as f32, b as f32);
        let luma = 0.2126 * rf + 0.7152 * gf + 0.0722 * bf;
        let channel = |c: f32| {
            let saturated = luma + (c - luma) * saturation;
            let brightened = saturated + offset;
            let contrasted = (brightened - MID_GRAY) * contrast + MID_GRAY;
            contrasted.clamp(0.0, 255.0).round() as u8
        };
        *dst = Rgba([channel(rf), channel(gf), channel(bf), a]);
    }
    Ok(out)
}

/// Rotate every pixel's hue by `angle` radians (positive or negative; wraps
/// around the color wheel). Saturation, lightness, and alpha are preserved.
pub fn rotate_hue(image: &RgbaImage, angle: f32) -> Result<RgbaImage> {
    ensure_nonempty(image)?;

    let degrees = angle.to_degrees();
    let mut out = RgbaImage::new(image.width(), image.height());
    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        let Rgba([r, g, b, a]) = *src;
        let (h, s, l) = rgb_to_hsl(r, g, b);
        let (nr, ng, nb) = hsl_to_rgb((h + degrees).rem_euclid(360.0), s, l);
        *dst = Rgba([nr, ng, nb, a]);
    }
    Ok(out)
}

/// Synthesize a flat single-color surface, typically fed to [`blend`] as a
/// tint layer.
pub fn make_overlay(color: OverlayColor, width: u32, height: u32) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(EngineError::EmptyImage);
    }
    Ok(RgbaImage::from_pixel(width, height, color.into()))
}

/// Composite `foreground` over `background`.
///
/// Both surfaces must have identical dimensions
/// ([`EngineError::DimensionMismatch`] otherwise). See [`BlendMode`] for the
/// per-mode channel formulas and how foreground alpha is honored.
pub fn blend(background: &RgbaImage, foreground: &RgbaImage, mode: BlendMode) -> Result<RgbaImage> {
    ensure_nonempty(background)?;
    if background.dimensions() != foreground.dimensions() {
        return Err(EngineError::DimensionMismatch {
            first: background.dimensions(),
            second: foreground.dimensions(),
        });
    }

    let mut out = RgbaImage::new(background.width(), background.height());
    let pairs = background.pixels().zip(foreground.pixels());
    for ((back, front), dst) in pairs.zip(out.pixels_mut()) {
        let Rgba([br, bg, bb, ba]) = *back;
        let Rgba([fr, fg, fb, fa]) = *front;
        let alpha = fa as f32 / 255.0;
        let channel = |b: f32, f: f32| {
            let full = blend_channel(mode, b, f);
            (b + (full - b) * alpha).clamp(0.0, 255.0).round() as u8
        };
        let out_alpha = (fa as f32 + ba as f32 * (1.0 - alpha)).round() as u8;
        *dst = Rgba([
            channel(br as f32, fr as f32),
            channel(bg as f32, fg as f32),
            channel(bb as f32, fb as f32),
            out_alpha,
        ]);
    }
    Ok(out)
}

fn blend_channel(mode: BlendMode, back: f32, front: f32) -> f32 {
    match mode {
        BlendMode::Normal => front,
        BlendMode::Screen => 255.0 - (255.0 - back) * (255.0 - front) / 255.0,
        BlendMode::Multiply => back * front / 255.0,
    }
}

fn ensure_nonempty(image: &RgbaImage) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(EngineError::EmptyImage);
    }
    Ok(())
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // Achromatic: hue is undefined, report 0.
        return (0.0, 0.0, l);
    }

    let delta = max - min;
    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (h * 60.0, s, l)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);
    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
