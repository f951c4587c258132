use crate::foundation::error::{PlayheadError, PlayheadResult};

/// Quintic Hermite step over `[start_t, end_t]`.
///
/// Returns 0 for `t <= start_t`, 1 for `t >= end_t`, and the
/// `6u^5 - 15u^4 + 10u^3` blend in between.
///
/// `start_t == end_t` is a programmer error: the blend divides by the
/// interval length, so a degenerate interval yields NaN rather than a clean
/// step. Callers that accept intervals from outside validate them up front
/// (see [`crate::Transition::new`]).
pub fn smoothstep(t: f64, start_t: f64, end_t: f64) -> f64 {
    let u = (t - start_t) / (end_t - start_t);
    if u <= 0.0 {
        return 0.0;
    }
    if u >= 1.0 {
        return 1.0;
    }
    6.0 * u.powi(5) - 15.0 * u.powi(4) + 10.0 * u.powi(3)
}

/// [`smoothstep`] over the unit interval.
pub fn smoothstep01(t: f64) -> f64 {
    smoothstep(t, 0.0, 1.0)
}

/// Antiderivative of [`smoothstep`] in `t`, zero at `start_t`.
///
/// Matches the step's three regions exactly: 0 before the interval, the
/// closed-form polynomial inside it, and linear growth with slope 1 past
/// `end_t` (the step has settled at 1). Continuous at both interval edges,
/// which makes it usable for cumulative motion such as an angle that eases
/// into and out of a constant angular velocity.
pub fn smoothstep_integral(t: f64, start_t: f64, end_t: f64) -> f64 {
    if (t - start_t) * (start_t - end_t) > 0.0 {
        return 0.0;
    }
    if (t - end_t) * (end_t - start_t) > 0.0 {
        return 0.5 * (2.0 * (t - end_t) + end_t - start_t);
    }
    -((t - start_t).powi(4)
        * (2.0 * t * t
            + start_t * start_t
            + 2.0 * t * (start_t - 3.0 * end_t)
            - 4.0 * start_t * end_t
            + 5.0 * end_t * end_t))
        / (2.0 * (start_t - end_t).powi(5))
}

/// Numbers from `start` up to (exclusive) `end`, stepping by `step`.
///
/// Fails fast with `InvalidArgument` when `step` is zero or its sign is
/// inconsistent with the `start`/`end` ordering; no silent clamping.
pub fn range(start: f64, end: f64, step: f64) -> PlayheadResult<Vec<f64>> {
    if step == 0.0 {
        return Err(PlayheadError::invalid_argument("range step must be non-zero"));
    }
    if start < end && step < 0.0 {
        return Err(PlayheadError::invalid_argument(
            "range step must be positive when start < end",
        ));
    }
    if start > end && step > 0.0 {
        return Err(PlayheadError::invalid_argument(
            "range step must be negative when start > end",
        ));
    }

    let mut out = Vec::new();
    let mut v = start;
    while if step > 0.0 { v < end } else { v > end } {
        out.push(v);
        v += step;
    }
    Ok(out)
}

/// Easing shape of a single transition segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Easing {
    Linear,
    Smoothstep,
}

impl Easing {
    /// Progress in `[0, 1]` through the `[start_t, end_t]` window at `t`.
    pub fn apply(self, t: f64, start_t: f64, end_t: f64) -> f64 {
        match self {
            Self::Linear => ((t - start_t) / (end_t - start_t)).clamp(0.0, 1.0),
            Self::Smoothstep => smoothstep(t, start_t, end_t),
        }
    }
}
