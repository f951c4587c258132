use std::collections::BTreeMap;

/// Per-key tolerance below which two frame states count as equal.
pub const STATE_EPSILON: f64 = 1e-5;

/// The complete set of values handed to a draw surface: elapsed time plus
/// every parameter, keyed by name. `t` is reserved and lives alongside the
/// parameter map.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameState {
    t: f64,
    values: BTreeMap<String, f64>,
}

impl FrameState {
    pub fn new(t: f64) -> Self {
        Self {
            t,
            values: BTreeMap::new(),
        }
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn set_t(&mut self, t: f64) {
        self.t = t;
    }

    /// Value for `name`; the reserved name `t` resolves to elapsed time.
    pub fn get(&self, name: &str) -> Option<f64> {
        if name == "t" {
            return Some(self.t);
        }
        self.values.get(name).copied()
    }

    pub fn set(&mut self, name: &str, value: f64) {
        if name == "t" {
            self.t = value;
        } else {
            self.values.insert(name.to_string(), value);
        }
    }

    pub fn params(&self) -> &BTreeMap<String, f64> {
        &self.values
    }

    pub fn merge(&mut self, values: impl IntoIterator<Item = (String, f64)>) {
        for (name, value) in values {
            self.values.insert(name, value);
        }
    }

    /// Approximate equality: `t` and every parameter must agree within
    /// [`STATE_EPSILON`], and the key sets must match. Gates redraw skipping.
    pub fn approx_eq(&self, other: &FrameState) -> bool {
        if (self.t - other.t).abs() > STATE_EPSILON {
            return false;
        }
        if self.values.len() != other.values.len() {
            return false;
        }
        self.values.iter().all(|(name, value)| {
            other
                .values
                .get(name)
                .is_some_and(|o| (value - o).abs() <= STATE_EPSILON)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(t: f64, pairs: &[(&str, f64)]) -> FrameState {
        let mut s = FrameState::new(t);
        for (name, value) in pairs {
            s.set(name, *value);
        }
        s
    }

    #[test]
    fn approx_eq_is_reflexive_and_symmetric() {
        let a = state(0.5, &[("r", 0.25)]);
        let b = state(0.5 + 0.5e-5, &[("r", 0.25 - 0.5e-5)]);
        assert!(a.approx_eq(&a));
        assert!(a.approx_eq(&b));
        assert!(b.approx_eq(&a));
    }

    #[test]
    fn approx_eq_respects_the_epsilon() {
        let a = state(0.0, &[("r", 0.0)]);
        let close = state(0.0, &[("r", 0.9e-5)]);
        let far = state(0.0, &[("r", 2.0e-5)]);
        assert!(a.approx_eq(&close));
        assert!(!a.approx_eq(&far));

        let t_far = state(2.0e-5, &[("r", 0.0)]);
        assert!(!a.approx_eq(&t_far));
    }

    #[test]
    fn approx_eq_requires_matching_keys() {
        let a = state(0.0, &[("r", 1.0)]);
        let b = state(0.0, &[("r", 1.0), ("g", 1.0)]);
        assert!(!a.approx_eq(&b));
        assert!(!b.approx_eq(&a));
    }

    #[test]
    fn reserved_t_routes_through_get_and_set() {
        let mut s = FrameState::new(1.0);
        assert_eq!(s.get("t"), Some(1.0));
        s.set("t", 2.5);
        assert_eq!(s.t(), 2.5);
        assert!(s.params().is_empty());
    }

    #[test]
    fn serializes_params_in_stable_order() {
        let s = state(1.0, &[("b", 2.0), ("a", 1.0)]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"t":1.0,"values":{"a":1.0,"b":2.0}}"#);
    }
}
