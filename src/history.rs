/// One per-word snapshot of the running WPM pair, taken on each
/// delimiter keystroke and consumed only by the results chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub wpm: f64,
    pub raw_wpm: f64,
}

impl HistorySample {
    pub fn new(wpm: f64, raw_wpm: f64) -> Self {
        Self { wpm, raw_wpm }
    }
}

/// Append-only WPM time series keyed by completed-word count.
#[derive(Debug, Clone, Default)]
pub struct History {
    samples: Vec<HistorySample>,
}

impl History {
    pub fn push(&mut self, sample: HistorySample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_is_append_only() {
        let mut h = History::default();
        h.push(HistorySample::new(40.0, 55.0));
        h.push(HistorySample::new(42.0, 56.0));

        assert_eq!(h.len(), 2);
        assert_eq!(h.samples()[0], HistorySample::new(40.0, 55.0));
        assert_eq!(h.samples()[1], HistorySample::new(42.0, 56.0));
    }

    #[test]
    fn test_clear() {
        let mut h = History::default();
        h.push(HistorySample::new(10.0, 12.0));
        h.clear();
        assert!(h.is_empty());
    }
}
