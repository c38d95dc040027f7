//! rgb-curves: three independent monotone LUTs over `[0,255] → [0,255]`
//! (§4.D).

use lf_core::{Frame, Point};

use crate::chain::EffectContext;
use crate::curve::Curve;
use crate::params::EffectParams;

pub fn rgb_curves(frame: &Frame, params: &EffectParams, _ctx: &EffectContext) -> Frame {
    let EffectParams::RgbCurves { r, g, b } = params else {
        return frame.clone();
    };

    frame
        .points
        .iter()
        .map(|p| apply_point(p, r, g, b))
        .collect()
}

fn apply_point(point: &Point, r: &Curve, g: &Curve, b: &Curve) -> Point {
    Point {
        x: point.x,
        y: point.y,
        r: eval_channel(r, point.r),
        g: eval_channel(g, point.g),
        b: eval_channel(b, point.b),
    }
}

/// `65535 / 255`, exactly representable: the ratio between the `u16`
/// channel range and the curve's `[0,255]` x-domain.
const U16_PER_U8_STEP: f64 = 257.0;

/// `Point` color channels are stored at full `u16` precision (§4.A) but
/// curves are authored over an 8-bit domain. Rather than truncate the
/// input to its high byte (which collapses every value sharing that byte
/// onto one output and breaks the identity round-trip for anything not
/// already byte-aligned), this rescales losslessly by the exact factor
/// between the two ranges and rounds back, so an identity curve is a
/// bit-exact identity for every `u16` input, not just byte-aligned ones.
fn eval_channel(curve: &Curve, value: u16) -> u16 {
    let x = value as f64 / U16_PER_U8_STEP;
    let mapped = curve.eval(x).clamp(0.0, 255.0);
    (mapped * U16_PER_U8_STEP).round().clamp(0.0, 65535.0) as u16
}
