//! Spatial transforms: corner-pin, scale, offset, rotate, viewport
//! (§4.D).
//!
//! All five operate in the normalized `[-1,1]` coordinate space rather
//! than raw i16 wire units, converting in and out via
//! `lf_core::{normalize, denormalize}`. When several of these appear in
//! one chain, the recommended composition order is viewport, then
//! scale, then offset, then rotation, then blocked-regions masking — but
//! that ordering is a matter of how the chain was authored, not
//! something this module enforces; each transformer only knows about
//! its own step.

use lf_core::{denormalize, normalize, Frame, Point};

use crate::chain::EffectContext;
use crate::params::{EffectParams, ParamPoint2};

pub fn corner_pin(frame: &Frame, params: &EffectParams, ctx: &EffectContext) -> Frame {
    let EffectParams::CornerPin { tl, tr, bl, br } = params else {
        return frame.clone();
    };
    let timing = &ctx.timing;
    let tl = resolve_point(tl, timing);
    let tr = resolve_point(tr, timing);
    let bl = resolve_point(bl, timing);
    let br = resolve_point(br, timing);

    frame
        .points
        .iter()
        .map(|p| {
            let (x, y) = (normalize(p.x), normalize(p.y));
            let u = (x + 1.0) / 2.0;
            let v = (y + 1.0) / 2.0;
            let (nx, ny) = bilinear(u, v, bl, br, tl, tr);
            Point {
                x: denormalize(nx.clamp(-1.0, 1.0)),
                y: denormalize(ny.clamp(-1.0, 1.0)),
                ..*p
            }
        })
        .collect()
}

fn resolve_point(p: &ParamPoint2, timing: &lf_core::TimingContext) -> (f64, f64) {
    (p.x.resolve(timing), p.y.resolve(timing))
}

/// Bilinear interpolation across a quad given by its four corners, with
/// `u,v ∈ [0,1]` (§9 resolved: bilinear, not projective, since galvanometer
/// scanners render straight lines between vertices regardless of
/// perspective).
fn bilinear(
    u: f64,
    v: f64,
    bl: (f64, f64),
    br: (f64, f64),
    tl: (f64, f64),
    tr: (f64, f64),
) -> (f64, f64) {
    let w_bl = (1.0 - u) * (1.0 - v);
    let w_br = u * (1.0 - v);
    let w_tl = (1.0 - u) * v;
    let w_tr = u * v;
    (
        w_bl * bl.0 + w_br * br.0 + w_tl * tl.0 + w_tr * tr.0,
        w_bl * bl.1 + w_br * br.1 + w_tl * tl.1 + w_tr * tr.1,
    )
}

pub fn scale(frame: &Frame, params: &EffectParams, ctx: &EffectContext) -> Frame {
    let EffectParams::Scale { sx, sy } = params else {
        return frame.clone();
    };
    let sx = sx.resolve(&ctx.timing);
    let sy = sy.resolve(&ctx.timing);
    transform_xy(frame, |x, y| (x * sx, y * sy))
}

pub fn offset(frame: &Frame, params: &EffectParams, ctx: &EffectContext) -> Frame {
    let EffectParams::Offset { tx, ty } = params else {
        return frame.clone();
    };
    let tx = tx.resolve(&ctx.timing);
    let ty = ty.resolve(&ctx.timing);
    transform_xy(frame, |x, y| (x + tx, y + ty))
}

pub fn rotate(frame: &Frame, params: &EffectParams, ctx: &EffectContext) -> Frame {
    let EffectParams::Rotate { theta } = params else {
        return frame.clone();
    };
    let theta = theta.resolve(&ctx.timing);
    let (sin, cos) = theta.sin_cos();
    transform_xy(frame, |x, y| (x * cos - y * sin, x * sin + y * cos))
}

/// Keeps only points inside `rect`, remapped so the rectangle fills the
/// full `[-1,1]` normalized space (§4.D viewport).
pub fn viewport(frame: &Frame, params: &EffectParams, _ctx: &EffectContext) -> Frame {
    let EffectParams::Viewport { rect } = params else {
        return frame.clone();
    };
    let width = rect.max_x - rect.min_x;
    let height = rect.max_y - rect.min_y;

    frame
        .points
        .iter()
        .filter_map(|p| {
            let (x, y) = (normalize(p.x), normalize(p.y));
            if x < rect.min_x || x > rect.max_x || y < rect.min_y || y > rect.max_y {
                return None;
            }
            let nx = if width == 0.0 {
                -1.0
            } else {
                ((x - rect.min_x) / width) * 2.0 - 1.0
            };
            let ny = if height == 0.0 {
                -1.0
            } else {
                ((y - rect.min_y) / height) * 2.0 - 1.0
            };
            Some(Point {
                x: denormalize(nx),
                y: denormalize(ny),
                ..*p
            })
        })
        .collect()
}

fn transform_xy(frame: &Frame, f: impl Fn(f64, f64) -> (f64, f64)) -> Frame {
    frame
        .points
        .iter()
        .map(|p| {
            let (x, y) = (normalize(p.x), normalize(p.y));
            let (nx, ny) = f(x, y);
            Point {
                x: denormalize(nx.clamp(-1.0, 1.0)),
                y: denormalize(ny.clamp(-1.0, 1.0)),
                ..*p
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::test_support::ctx_at;
    use crate::modulator::ScalarParam;
    use crate::params::NormalizedRect;
    use approx::assert_relative_eq;

    #[test]
    fn identity_corner_pin_preserves_points() {
        let frame = Frame::from_points(vec![Point::new(1000, -2000, 1, 2, 3)]);
        let params = EffectParams::CornerPin {
            tl: ParamPoint2::static_point(-1.0, 1.0),
            tr: ParamPoint2::static_point(1.0, 1.0),
            bl: ParamPoint2::static_point(-1.0, -1.0),
            br: ParamPoint2::static_point(1.0, -1.0),
        };
        let out = corner_pin(&frame, &params, &ctx_at(0.0));
        assert_relative_eq!(out.points[0].x as f64, frame.points[0].x as f64, epsilon = 1.0);
        assert_relative_eq!(out.points[0].y as f64, frame.points[0].y as f64, epsilon = 1.0);
    }

    #[test]
    fn scale_halves_coordinates() {
        let frame = Frame::from_points(vec![Point::new(16384, -16384, 0, 0, 0)]);
        let params = EffectParams::Scale {
            sx: ScalarParam::static_value(0.5),
            sy: ScalarParam::static_value(0.5),
        };
        let out = scale(&frame, &params, &ctx_at(0.0));
        assert!(out.points[0].x.abs() < frame.points[0].x.abs());
    }

    #[test]
    fn offset_shifts_coordinates() {
        let frame = Frame::from_points(vec![Point::new(0, 0, 0, 0, 0)]);
        let params = EffectParams::Offset {
            tx: ScalarParam::static_value(0.5),
            ty: ScalarParam::static_value(0.0),
        };
        let out = offset(&frame, &params, &ctx_at(0.0));
        assert!(out.points[0].x > 0);
    }

    #[test]
    fn rotate_quarter_turn_swaps_axes() {
        let frame = Frame::from_points(vec![Point::new(32767, 0, 0, 0, 0)]);
        let params = EffectParams::Rotate {
            theta: ScalarParam::static_value(std::f64::consts::FRAC_PI_2),
        };
        let out = rotate(&frame, &params, &ctx_at(0.0));
        assert!(out.points[0].x.abs() < 100);
        assert!(out.points[0].y > 30000);
    }

    #[test]
    fn viewport_drops_points_outside_and_remaps_inside() {
        let frame = Frame::from_points(vec![
            Point::new(0, 0, 0, 0, 0),
            Point::new(32767, 32767, 0, 0, 0),
        ]);
        let params = EffectParams::Viewport {
            rect: NormalizedRect {
                min_x: -0.5,
                min_y: -0.5,
                max_x: 0.5,
                max_y: 0.5,
            },
        };
        let out = viewport(&frame, &params, &ctx_at(0.0));
        assert_eq!(out.len(), 1);
        assert_relative_eq!(normalize(out.points[0].x), 0.0, epsilon = 1e-3);
    }
}
