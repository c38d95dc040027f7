//! Modulator evaluator (§4.F).
//!
//! A `ModulatorConfig` turns a time/beat-varying waveform into a scalar
//! parameter value. Any effect parameter may be a plain scalar or a
//! modulator (`ScalarParam`); resolving one never touches wall-clock time
//! directly, only the `TimingContext` the frame provider threads through.

use std::f64::consts::PI;

use lf_core::TimingContext;

use crate::curve::Curve;

/// Waveform shape driving a modulator (§4.F.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ModulatorKind {
    Sine,
    Triangle,
    Saw,
    Square,
    Constant,
    Keyframe,
}

/// A time/beat-varying scalar value generator (§3, §4.F).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModulatorConfig {
    pub active: bool,
    pub kind: ModulatorKind,
    pub min: f64,
    pub max: f64,
    pub period_beats: f64,
    pub phase: f64,
    /// Frozen value returned verbatim when `active` is false.
    pub value: f64,
    /// Control points for `ModulatorKind::Keyframe`, periodic over `[0,1)`.
    /// Ignored for every other kind (§4.F: "keyframes and per-parameter
    /// modulators are mutually exclusive").
    pub keyframes: Option<Curve>,
}

impl ModulatorConfig {
    /// A modulator that is permanently frozen at `value` (used as the
    /// default "not really a modulator" shape for static parameters).
    pub fn frozen(value: f64) -> Self {
        Self {
            active: false,
            kind: ModulatorKind::Constant,
            min: 0.0,
            max: 1.0,
            period_beats: 1.0,
            phase: 0.0,
            value,
            keyframes: None,
        }
    }

    /// Evaluates this modulator's effective value for the current frame.
    pub fn evaluate(&self, timing: &TimingContext) -> f64 {
        if !self.active {
            return self.value;
        }

        if self.kind == ModulatorKind::Keyframe {
            let phase = wrapped_phase(self.beat_phase(timing));
            return match &self.keyframes {
                Some(curve) => curve.eval(phase),
                None => self.value,
            };
        }

        let phase = wrapped_phase(self.beat_phase(timing));
        let w = waveform(self.kind, phase);
        self.min + (self.max - self.min) * w
    }

    fn beat_phase(&self, timing: &TimingContext) -> f64 {
        let phase_total = timing.accumulated_beats + timing.phase_offset + self.phase;
        if self.period_beats == 0.0 {
            0.0
        } else {
            phase_total / self.period_beats
        }
    }
}

/// Wraps `x` into `[0, 1)`, matching `mod(x, 1)` for negative inputs too.
fn wrapped_phase(x: f64) -> f64 {
    let w = x.rem_euclid(1.0);
    if w == 1.0 { 0.0 } else { w }
}

/// Evaluates the waveform shape at `phase ∈ [0,1)`, returning `w ∈ [0,1]`
/// (§4.F.1).
fn waveform(kind: ModulatorKind, phase: f64) -> f64 {
    match kind {
        ModulatorKind::Sine => 0.5 + 0.5 * (2.0 * PI * phase).sin(),
        ModulatorKind::Triangle => {
            if phase < 0.5 {
                phase * 2.0
            } else {
                2.0 - phase * 2.0
            }
        }
        ModulatorKind::Saw => phase,
        ModulatorKind::Square => {
            if phase < 0.5 {
                1.0
            } else {
                0.0
            }
        }
        ModulatorKind::Constant => 1.0,
        ModulatorKind::Keyframe => unreachable!("keyframe handled separately in evaluate()"),
    }
}

/// A parameter that may be a plain static scalar or driven by a modulator
/// (§4.D: "Any effect parameter may be a scalar or a ModulatorConfig").
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ScalarParam {
    Static(f64),
    Modulated(ModulatorConfig),
}

impl ScalarParam {
    pub fn resolve(&self, timing: &TimingContext) -> f64 {
        match self {
            ScalarParam::Static(v) => *v,
            ScalarParam::Modulated(modulator) => modulator.evaluate(timing),
        }
    }

    pub fn static_value(value: f64) -> Self {
        ScalarParam::Static(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn timing(accumulated_beats: f64) -> TimingContext {
        TimingContext::new(120.0, accumulated_beats, 0.0)
    }

    #[test]
    fn inactive_modulator_returns_frozen_value() {
        let modulator = ModulatorConfig {
            active: false,
            ..ModulatorConfig::frozen(42.0)
        };
        assert_relative_eq!(modulator.evaluate(&timing(5.0)), 42.0);
    }

    #[test]
    fn sine_at_zero_phase_is_midpoint() {
        let modulator = ModulatorConfig {
            active: true,
            kind: ModulatorKind::Sine,
            min: 0.0,
            max: 10.0,
            period_beats: 4.0,
            phase: 0.0,
            value: 0.0,
            keyframes: None,
        };
        assert_relative_eq!(modulator.evaluate(&timing(0.0)), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn sine_quarter_period_reaches_max() {
        let modulator = ModulatorConfig {
            active: true,
            kind: ModulatorKind::Sine,
            min: 0.0,
            max: 10.0,
            period_beats: 4.0,
            phase: 0.0,
            value: 0.0,
            keyframes: None,
        };
        // phase = beats / period = 1.0 / 4.0 = 0.25 -> sin(pi/2) = 1 -> w=1
        assert_relative_eq!(modulator.evaluate(&timing(1.0)), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn square_switches_at_half_period() {
        let modulator = ModulatorConfig {
            active: true,
            kind: ModulatorKind::Square,
            min: 0.0,
            max: 1.0,
            period_beats: 2.0,
            phase: 0.0,
            value: 0.0,
            keyframes: None,
        };
        assert_relative_eq!(modulator.evaluate(&timing(0.0)), 1.0);
        assert_relative_eq!(modulator.evaluate(&timing(1.5)), 0.0);
    }

    #[test]
    fn saw_ramps_and_wraps() {
        let modulator = ModulatorConfig {
            active: true,
            kind: ModulatorKind::Saw,
            min: 0.0,
            max: 1.0,
            period_beats: 1.0,
            phase: 0.0,
            value: 0.0,
            keyframes: None,
        };
        assert_relative_eq!(modulator.evaluate(&timing(0.25)), 0.25, epsilon = 1e-9);
        assert_relative_eq!(modulator.evaluate(&timing(1.25)), 0.25, epsilon = 1e-9);
    }

    #[test]
    fn constant_kind_always_returns_max() {
        let modulator = ModulatorConfig {
            active: true,
            kind: ModulatorKind::Constant,
            min: 0.0,
            max: 7.0,
            period_beats: 1.0,
            phase: 0.0,
            value: 0.0,
            keyframes: None,
        };
        assert_relative_eq!(modulator.evaluate(&timing(123.456)), 7.0);
    }

    #[test]
    fn keyframe_ignores_min_max_and_interpolates_curve() {
        let curve = Curve::new(vec![(0.0, 1.0), (0.5, 9.0), (1.0, 1.0)]).unwrap();
        let modulator = ModulatorConfig {
            active: true,
            kind: ModulatorKind::Keyframe,
            min: 0.0,
            max: 1.0, // must be ignored
            period_beats: 1.0,
            phase: 0.0,
            value: 0.0,
            keyframes: Some(curve),
        };
        assert_relative_eq!(modulator.evaluate(&timing(0.5)), 9.0, epsilon = 1e-9);
    }

    #[test]
    fn scalar_param_static_ignores_timing() {
        let param = ScalarParam::static_value(3.0);
        assert_relative_eq!(param.resolve(&timing(999.0)), 3.0);
    }

    #[test]
    fn scalar_param_modulated_delegates_to_modulator() {
        let modulator = ModulatorConfig {
            active: false,
            ..ModulatorConfig::frozen(-4.0)
        };
        let param = ScalarParam::Modulated(modulator);
        assert_relative_eq!(param.resolve(&timing(0.0)), -4.0);
    }
}
