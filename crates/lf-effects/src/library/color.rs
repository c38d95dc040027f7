//! hue-shift: rotates each point's color around the HSV hue wheel
//! (§4.D.1, supplemented beyond the distilled effect list).

use lf_core::{Frame, Point};

use crate::chain::EffectContext;
use crate::params::EffectParams;

pub fn hue_shift(frame: &Frame, params: &EffectParams, ctx: &EffectContext) -> Frame {
    let EffectParams::HueShift { degrees } = params else {
        return frame.clone();
    };
    let degrees = degrees.resolve(&ctx.timing);

    frame
        .points
        .iter()
        .map(|p| {
            let (h, s, v) = rgb_to_hsv(p.r, p.g, p.b);
            let shifted_h = (h + degrees).rem_euclid(360.0);
            let (r, g, b) = hsv_to_rgb(shifted_h, s, v);
            Point { r, g, b, ..*p }
        })
        .collect()
}

fn rgb_to_hsv(r: u16, g: u16, b: u16) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64 / 65535.0, g as f64 / 65535.0, b as f64 / 65535.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u16, u16, u16) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (r1, g1, b1) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (
        (((r1 + m) * 65535.0).round()) as u16,
        (((g1 + m) * 65535.0).round()) as u16,
        (((b1 + m) * 65535.0).round()) as u16,
    )
}
