//! Append-only record of per-cycle LBF values.

use serde::Serialize;

/// LBF values in cycle order, oldest first.
///
/// Values are only ever appended by the session, one per completed cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LbfHistory {
    values: Vec<f64>,
}

impl LbfHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, lbf: f64) {
        self.values.push(lbf);
    }

    /// Number of recorded cycles.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no cycle has been recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Recorded values, oldest first.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Owned copy of the recorded values.
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }

    /// Most recent value.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Iterate values, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut history = LbfHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.last(), None);

        history.record(0.5);
        history.record(0.25);
        assert_eq!(history.len(), 2);
        assert_eq!(history.as_slice(), &[0.5, 0.25]);
        assert_eq!(history.last(), Some(0.25));
        assert_eq!(history.iter().collect::<Vec<_>>(), history.to_vec());
    }

    #[test]
    fn copies_are_independent() {
        let mut history = LbfHistory::new();
        history.record(1.0);
        let mut copy = history.to_vec();
        copy.push(2.0);
        copy[0] = 9.0;
        assert_eq!(history.as_slice(), &[1.0]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut history = LbfHistory::new();
        history.record(0.5);
        history.record(1.5);
        assert_eq!(serde_json::to_string(&history).unwrap(), "[0.5,1.5]");
    }
}
