use std::sync::Arc;

use crate::{
    animation::ease::Easing,
    animation::param::ComputeFn,
    foundation::error::{PlayheadError, PlayheadResult},
};

/// One leg of a sequential easing chain.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub easing: Easing,
    pub start_t: f64,
    pub end_t: f64,
    /// Defaults to the previous segment's `end_value` (0 for the first).
    pub start_value: Option<f64>,
    pub end_value: f64,
}

impl Segment {
    pub fn linear(start_t: f64, end_t: f64, end_value: f64) -> Self {
        Self {
            easing: Easing::Linear,
            start_t,
            end_t,
            start_value: None,
            end_value,
        }
    }

    pub fn smoothstep(start_t: f64, end_t: f64, end_value: f64) -> Self {
        Self {
            easing: Easing::Smoothstep,
            start_t,
            end_t,
            start_value: None,
            end_value,
        }
    }

    pub fn starting_at(mut self, value: f64) -> Self {
        self.start_value = Some(value);
        self
    }
}

#[derive(Clone, Copy, Debug)]
struct ResolvedSegment {
    easing: Easing,
    start_t: f64,
    end_t: f64,
    delta: f64,
}

/// A piecewise eased curve: each segment contributes its eased delta on top
/// of everything before it, so the value at any time is
/// `base + Σ (end_value - start_value) * easing(t)`.
///
/// Start values are resolved once at construction; degenerate time windows
/// are rejected here instead of dividing by zero inside an easing call.
#[derive(Clone, Debug)]
pub struct Transition {
    base: f64,
    segments: Vec<ResolvedSegment>,
}

impl Transition {
    pub fn new(segments: Vec<Segment>) -> PlayheadResult<Self> {
        if segments.is_empty() {
            return Err(PlayheadError::validation(
                "transition needs at least one segment",
            ));
        }

        let base = segments[0].start_value.unwrap_or(0.0);
        let mut resolved = Vec::with_capacity(segments.len());
        let mut prev_end_value = 0.0;
        for (i, seg) in segments.iter().enumerate() {
            if !(seg.start_t < seg.end_t) {
                return Err(PlayheadError::validation(format!(
                    "transition segment {i} must have start_t < end_t",
                )));
            }
            let start_value = seg.start_value.unwrap_or(prev_end_value);
            resolved.push(ResolvedSegment {
                easing: seg.easing,
                start_t: seg.start_t,
                end_t: seg.end_t,
                delta: seg.end_value - start_value,
            });
            prev_end_value = seg.end_value;
        }

        Ok(Self {
            base,
            segments: resolved,
        })
    }

    pub fn value_at(&self, t: f64) -> f64 {
        self.base
            + self
                .segments
                .iter()
                .map(|seg| seg.delta * seg.easing.apply(t, seg.start_t, seg.end_t))
                .sum::<f64>()
    }

    /// Package as the `compute` function of a derived parameter.
    pub fn into_compute(self) -> ComputeFn {
        Arc::new(move |t| self.value_at(t))
    }
}
