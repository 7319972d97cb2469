use serde::{Deserialize, Serialize};

/// A fundamental metric that may be absent from the provider payload.
///
/// Threshold comparisons on an absent value are always false, so a security
/// with missing data can never satisfy a filter rule through that rule's
/// metric. NaN from the provider is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metric(Option<f64>);

impl Metric {
    pub const NONE: Metric = Metric(None);

    /// Wrap a provider value, collapsing NaN to absent.
    pub fn new(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Metric(Some(v)),
            _ => Metric(None),
        }
    }

    pub fn some(value: f64) -> Self {
        Metric::new(Some(value))
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// True only when the value is present and >= `min`.
    pub fn at_least(&self, min: f64) -> bool {
        self.0.map_or(false, |v| v >= min)
    }

    /// True only when the value is present and <= `max`.
    pub fn at_most(&self, max: f64) -> bool {
        self.0.map_or(false, |v| v <= max)
    }

    /// Multiply a present value by `factor`; absent stays absent.
    /// Used for provider fields reported as fractions (0.15 -> 15%).
    pub fn scaled(self, factor: f64) -> Self {
        Metric::new(self.0.map(|v| v * factor))
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        Metric::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_never_passes() {
        assert!(!Metric::NONE.at_least(0.0));
        assert!(!Metric::NONE.at_most(f64::MAX));
    }

    #[test]
    fn test_nan_collapses_to_absent() {
        let m = Metric::some(f64::NAN);
        assert!(m.is_absent());
        assert!(!m.at_most(30.0));
    }

    #[test]
    fn test_boundaries_inclusive() {
        let m = Metric::some(50.0);
        assert!(m.at_least(50.0));
        assert!(m.at_most(50.0));
        assert!(!m.at_least(50.1));
        assert!(!m.at_most(49.9));
    }

    #[test]
    fn test_scaled() {
        assert_eq!(Metric::some(0.15).scaled(100.0), Metric::some(15.0));
        assert_eq!(Metric::NONE.scaled(100.0), Metric::NONE);
    }

    #[test]
    fn test_serde_transparent() {
        let m: Metric = serde_json::from_str("12.5").unwrap();
        assert_eq!(m, Metric::some(12.5));
        let m: Metric = serde_json::from_str("null").unwrap();
        assert_eq!(m, Metric::NONE);
    }
}
