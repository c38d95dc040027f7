//! Monotone control-point curves (§3 invariant 2, §4.D rgb-curves, §4.F.1
//! keyframe modulators).
//!
//! Shared by the rgb-curves effect (domain `[0,255]`) and the keyframe
//! modulator waveform (domain `[0,1)`); both are "linearly interpolate
//! between sorted control points, clamp outside" LUTs.

use lf_core::{LfError, LfResult};

/// A sorted list of `(x, y)` control points, monotone (non-decreasing) in
/// `x`. Evaluation linearly interpolates between neighboring points and
/// clamps to the first/last `y` outside the domain.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Curve {
    points: Vec<(f64, f64)>,
}

impl Curve {
    /// Builds a curve, rejecting empty or non-monotone-in-x input.
    pub fn new(points: Vec<(f64, f64)>) -> LfResult<Self> {
        if points.is_empty() {
            return Err(LfError::MalformedCurve("curve has no control points".into()));
        }
        if !points.windows(2).all(|w| w[0].0 <= w[1].0) {
            return Err(LfError::MalformedCurve(
                "curve control points are not sorted by x".into(),
            ));
        }
        Ok(Self { points })
    }

    /// Builds and validates a curve intended for the 8-bit rgb-curves
    /// effect domain: non-empty, sorted, first x = 0, last x = 255.
    pub fn new_rgb_domain(points: Vec<(f64, f64)>) -> LfResult<Self> {
        let curve = Self::new(points)?;
        let first = curve.points.first().unwrap().0;
        let last = curve.points.last().unwrap().0;
        if first != 0.0 || last != 255.0 {
            return Err(LfError::MalformedCurve(format!(
                "rgb-curves endpoints must be x=0 and x=255, got x={first}..{last}"
            )));
        }
        Ok(curve)
    }

    /// Linear identity curve over `[0, 255]` (rgb-curves neutral element).
    pub fn identity_rgb() -> Self {
        Self {
            points: vec![(0.0, 0.0), (255.0, 255.0)],
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Evaluates the curve at `x`, clamping outside the control-point range.
    pub fn eval(&self, x: f64) -> f64 {
        let first = self.points[0];
        let last = *self.points.last().unwrap();
        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }
        for window in self.points.windows(2) {
            let (x0, y0) = window[0];
            let (x1, y1) = window[1];
            if x >= x0 && x <= x1 {
                if x1 == x0 {
                    return y1;
                }
                let t = (x - x0) / (x1 - x0);
                return y0 + (y1 - y0) * t;
            }
        }
        last.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_empty_curve() {
        assert!(Curve::new(vec![]).is_err());
    }

    #[test]
    fn rejects_non_monotone_curve() {
        assert!(Curve::new(vec![(0.0, 0.0), (5.0, 1.0), (2.0, 2.0)]).is_err());
    }

    #[test]
    fn identity_rgb_is_identity_at_sample_points() {
        let curve = Curve::identity_rgb();
        for x in [0.0, 64.0, 128.0, 200.0, 255.0] {
            assert_relative_eq!(curve.eval(x), x, epsilon = 1e-9);
        }
    }

    #[test]
    fn clamps_outside_domain() {
        let curve = Curve::new(vec![(10.0, 5.0), (20.0, 15.0)]).unwrap();
        assert_relative_eq!(curve.eval(0.0), 5.0);
        assert_relative_eq!(curve.eval(1000.0), 15.0);
    }

    #[test]
    fn interpolates_linearly_between_points() {
        let curve = Curve::new(vec![(0.0, 0.0), (100.0, 200.0)]).unwrap();
        assert_relative_eq!(curve.eval(50.0), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn rgb_domain_requires_0_and_255_endpoints() {
        assert!(Curve::new_rgb_domain(vec![(0.0, 0.0), (128.0, 255.0)]).is_err());
        assert!(Curve::new_rgb_domain(vec![(0.0, 0.0), (255.0, 255.0)]).is_ok());
    }
}
