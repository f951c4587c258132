use std::{collections::BTreeSet, fmt, sync::Arc};

use crate::{
    animation::state::FrameState,
    foundation::error::{PlayheadError, PlayheadResult},
};

/// Pure function deriving a parameter value from elapsed seconds.
pub type ComputeFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// How a parameter gets its value, resolved once at construction.
#[derive(Clone)]
pub enum ParamKind {
    /// Set by direct user input, bounded by the spec's min/max (the UI
    /// clamps; the controller does not enforce beyond that).
    Free { default_value: Option<f64> },
    /// A pure function of elapsed time; not independently settable while
    /// playback is time-driven.
    Derived { compute: ComputeFn },
}

impl fmt::Debug for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free { default_value } => f
                .debug_struct("Free")
                .field("default_value", default_value)
                .finish(),
            Self::Derived { .. } => f.debug_struct("Derived").finish_non_exhaustive(),
        }
    }
}

/// One tunable scalar of an animation.
#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub name: String,
    pub min_value: f64,
    pub max_value: f64,
    pub step: Option<f64>,
    pub kind: ParamKind,
}

impl ParamSpec {
    pub fn free(name: impl Into<String>, min_value: f64, max_value: f64) -> Self {
        Self {
            name: name.into(),
            min_value,
            max_value,
            step: None,
            kind: ParamKind::Free {
                default_value: None,
            },
        }
    }

    pub fn derived(
        name: impl Into<String>,
        min_value: f64,
        max_value: f64,
        compute: ComputeFn,
    ) -> Self {
        Self {
            name: name.into(),
            min_value,
            max_value,
            step: None,
            kind: ParamKind::Derived { compute },
        }
    }

    /// Starting value for a free parameter. No effect on derived parameters,
    /// whose initial value always comes from `compute(0)`.
    pub fn with_default(mut self, value: f64) -> Self {
        if let ParamKind::Free { default_value } = &mut self.kind {
            *default_value = Some(value);
        }
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn is_derived(&self) -> bool {
        matches!(self.kind, ParamKind::Derived { .. })
    }

    pub fn validate(&self) -> PlayheadResult<()> {
        if self.name.is_empty() {
            return Err(PlayheadError::validation("parameter name must be non-empty"));
        }
        if self.name == "t" {
            return Err(PlayheadError::validation(
                "parameter name 't' is reserved for elapsed time",
            ));
        }
        if !(self.min_value <= self.max_value) {
            return Err(PlayheadError::validation(format!(
                "parameter '{}' must have min_value <= max_value",
                self.name
            )));
        }
        if let Some(step) = self.step
            && !(step > 0.0)
        {
            return Err(PlayheadError::validation(format!(
                "parameter '{}' step must be > 0",
                self.name
            )));
        }
        Ok(())
    }

    /// Initial value: derived specs sample `compute(0)`; free specs use the
    /// default when present, else the lower bound.
    pub fn initial_value(&self) -> f64 {
        match &self.kind {
            ParamKind::Free { default_value } => default_value.unwrap_or(self.min_value),
            ParamKind::Derived { compute } => compute(0.0),
        }
    }
}

/// The full parameter set for one animation, validated at construction.
#[derive(Clone, Debug)]
pub struct ParamSet {
    specs: Vec<ParamSpec>,
}

impl ParamSet {
    pub fn new(specs: Vec<ParamSpec>) -> PlayheadResult<Self> {
        let mut names = BTreeSet::new();
        for spec in &specs {
            spec.validate()?;
            if !names.insert(spec.name.as_str()) {
                return Err(PlayheadError::validation(format!(
                    "duplicate parameter name '{}'",
                    spec.name
                )));
            }
        }
        Ok(Self { specs })
    }

    pub fn empty() -> Self {
        Self { specs: Vec::new() }
    }

    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Values for every derived parameter at time `t`; each `compute` is
    /// called exactly once. Results are not clamped to the spec bounds;
    /// clamping, if any, is a presentation-layer concern.
    pub fn compute_derived(&self, t: f64) -> Vec<(String, f64)> {
        self.specs
            .iter()
            .filter_map(|spec| match &spec.kind {
                ParamKind::Derived { compute } => Some((spec.name.clone(), compute(t))),
                ParamKind::Free { .. } => None,
            })
            .collect()
    }

    /// Starting state: `t = 0`, derived parameters at `compute(0)`, free
    /// parameters at their defaults.
    pub fn initial_state(&self) -> FrameState {
        let mut state = FrameState::new(0.0);
        state.merge(
            self.specs
                .iter()
                .map(|spec| (spec.name.clone(), spec.initial_value())),
        );
        state
    }
}
