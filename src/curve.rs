//! Tone curves: smooth remapping of channel intensities.
//!
//! A [`ToneCurve`] is a small set of control points on the unit square,
//! interpolated with a Catmull-Rom-style cubic (Hermite segments with
//! finite-difference tangents, one-sided at the ends). Application goes
//! through a 256-entry lookup table, clamped to range and forced monotonic
//! so spline overshoot can never invert tones.

use crate::error::{EngineError, Result};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

const MIN_POINTS: usize = 3;
const MAX_POINTS: usize = 5;

/// One control point; both coordinates live in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneCurvePoint {
    pub x: f32,
    pub y: f32,
}

impl ToneCurvePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A validated tone curve.
///
/// Invariants, enforced at construction and again on deserialization:
/// 3 to 5 points, every coordinate in [0, 1], x strictly increasing.
/// Inputs left of the first point or right of the last clamp to the
/// endpoint's y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ToneCurvePoint>", into = "Vec<ToneCurvePoint>")]
pub struct ToneCurve {
    points: Vec<ToneCurvePoint>,
}

impl ToneCurve {
    pub fn new(points: Vec<ToneCurvePoint>) -> Result<Self> {
        validate(&points)?;
        Ok(Self { points })
    }

    /// Convenience constructor from `(x, y)` pairs.
    pub fn from_pairs(pairs: &[(f32, f32)]) -> Result<Self> {
        Self::new(pairs.iter().map(|&(x, y)| ToneCurvePoint::new(x, y)).collect())
    }

    /// For compile-time pairs already known to satisfy the invariants
    /// (the built-in recipes).
    pub(crate) fn from_static(pairs: &[(f32, f32)]) -> Self {
        let points: Vec<ToneCurvePoint> =
            pairs.iter().map(|&(x, y)| ToneCurvePoint::new(x, y)).collect();
        debug_assert!(validate(&points).is_ok());
        Self { points }
    }

    pub fn points(&self) -> &[ToneCurvePoint] {
        &self.points
    }

    /// Sample the curve at all 256 input levels.
    pub(crate) fn lookup_table(&self) -> [u8; 256] {
        let pts = &self.points;
        let n = pts.len();

        // Secant slope of each segment, then per-point tangents as the
        // average of the neighboring secants (one-sided at the ends).
        let mut secants = Vec::with_capacity(n - 1);
        for w in pts.windows(2) {
            secants.push((w[1].y - w[0].y) / (w[1].x - w[0].x));
        }
        let mut tangents = Vec::with_capacity(n);
        tangents.push(secants[0]);
        for i in 1..n - 1 {
            tangents.push((secants[i - 1] + secants[i]) / 2.0);
        }
        tangents.push(secants[n - 2]);

        let mut lut = [0u8; 256];
        let mut prev = 0u8;
        for (i, entry) in lut.iter_mut().enumerate() {
            let x = i as f32 / 255.0;
            let y = if x <= pts[0].x {
                pts[0].y
            } else if x >= pts[n - 1].x {
                pts[n - 1].y
            } else {
                let mut seg = 0;
                while seg + 2 < n && x > pts[seg + 1].x {
                    seg += 1;
                }
                hermite(pts[seg], pts[seg + 1], tangents[seg], tangents[seg + 1], x)
            };
            let v = (y.clamp(0.0, 1.0) * 255.0).round() as u8;
            // Monotonic safety net over cubic overshoot.
            let v = v.max(prev);
            *entry = v;
            prev = v;
        }
        lut
    }
}

impl TryFrom<Vec<ToneCurvePoint>> for ToneCurve {
    type Error = EngineError;

    fn try_from(points: Vec<ToneCurvePoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<ToneCurve> for Vec<ToneCurvePoint> {
    fn from(curve: ToneCurve) -> Self {
        curve.points
    }
}

fn validate(points: &[ToneCurvePoint]) -> Result<()> {
    if points.len() < MIN_POINTS || points.len() > MAX_POINTS {
        return Err(EngineError::InvalidToneCurve(format!(
            "expected {MIN_POINTS} to {MAX_POINTS} points, got {}",
            points.len()
        )));
    }
    for p in points {
        if !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y) {
            return Err(EngineError::InvalidToneCurve(format!(
                "point ({}, {}) outside the unit square",
                p.x, p.y
            )));
        }
    }
    for w in points.windows(2) {
        if w[1].x <= w[0].x {
            return Err(EngineError::InvalidToneCurve(format!(
                "x values must be strictly increasing ({} then {})",
                w[0].x, w[1].x
            )));
        }
    }
    Ok(())
}

/// Cubic Hermite on one segment, evaluated at absolute position `x`.
fn hermite(p1: ToneCurvePoint, p2: ToneCurvePoint, m1: f32, m2: f32, x: f32) -> f32 {
    let h = p2.x - p1.x;
    let t = (x - p1.x) / h;
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * p1.y + h10 * h * m1 + h01 * p2.y + h11 * h * m2
}

/// Remap R, G, and B through the curve's lookup table. Alpha passes through.
pub fn apply_tone_curve(image: &RgbaImage, curve: &ToneCurve) -> Result<RgbaImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(EngineError::EmptyImage);
    }

    let lut = curve.lookup_table();
    let mut out = RgbaImage::new(image.width(), image.height());
    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        let Rgba([r, g, b, a]) = *src;
        *dst = Rgba([lut[r as usize], lut[g as usize], lut[b as usize], a]);
    }
    Ok(out)
}
