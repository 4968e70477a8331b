use crate::foundation::error::{ReelError, ReelResult};

/// Per-side policy for values outside the input range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Extrapolate {
    /// Hold the boundary output value.
    Clamp,
    /// Continue the affine map past the boundary.
    Extend,
}

/// Affine remap of `v` from `[a, b]` onto `[x, y]`.
///
/// A degenerate input range (`a == b`) is treated as a step at `a`: values
/// below it map to `x`, everything else to `y`. No division occurs in that
/// case, so the function is total over finite inputs.
pub fn interpolate(
    v: f64,
    input: (f64, f64),
    output: (f64, f64),
    left: Extrapolate,
    right: Extrapolate,
) -> f64 {
    let (a, b) = input;
    let (x, y) = output;

    if a == b {
        return if v < a { x } else { y };
    }

    if v < a && left == Extrapolate::Clamp {
        return x;
    }
    if v > b && right == Extrapolate::Clamp {
        return y;
    }

    let t = (v - a) / (b - a);
    x + (y - x) * t
}

/// Shorthand for the common clamp-both-sides remap.
pub fn interpolate_clamped(v: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    interpolate(v, input, output, Extrapolate::Clamp, Extrapolate::Clamp)
}

/// One stop of a piecewise-linear envelope.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnvelopePoint {
    pub frame: f64,
    pub value: f64,
}

/// Piecewise-linear curve over frames, clamped at both ends.
///
/// Used for multi-stop curves a single [`interpolate`] call cannot express,
/// e.g. the audio volume ramp up / hold / ramp down.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Envelope {
    pub points: Vec<EnvelopePoint>,
}

impl Envelope {
    pub fn new(points: Vec<EnvelopePoint>) -> ReelResult<Self> {
        let env = Self { points };
        env.validate()?;
        Ok(env)
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> ReelResult<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(frame, value)| EnvelopePoint { frame, value })
                .collect(),
        )
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.points.is_empty() {
            return Err(ReelError::animation("Envelope must have at least one point"));
        }
        if !self
            .points
            .windows(2)
            .all(|w| w[0].frame <= w[1].frame)
        {
            return Err(ReelError::animation("Envelope points must be sorted by frame"));
        }
        if self
            .points
            .iter()
            .any(|p| !p.frame.is_finite() || !p.value.is_finite())
        {
            return Err(ReelError::animation("Envelope points must be finite"));
        }
        Ok(())
    }

    /// Sample at `frame`. Outside the stop range the boundary value holds;
    /// coincident stops form a step.
    pub fn sample(&self, frame: f64) -> f64 {
        debug_assert!(!self.points.is_empty());
        let idx = self.points.partition_point(|p| p.frame <= frame);

        if idx == 0 {
            return self.points[0].value;
        }
        if idx >= self.points.len() {
            return self.points[self.points.len() - 1].value;
        }

        let a = self.points[idx - 1];
        let b = self.points[idx];
        interpolate_clamped(frame, (a.frame, b.frame), (a.value, b.value))
    }
}
