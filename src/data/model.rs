use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single parsed input row: the categorical label and its numeric ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: String,
    pub value: f64,
}

impl Record {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Record {
            key: key.into(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded collection.
///
/// `index` keeps the last value seen for each key, while `series` keeps every
/// value in source row order so statistics see all rows even when keys repeat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    index: BTreeMap<String, f64>,
    series: Vec<f64>,
}

impl Dataset {
    /// Build a dataset from records in source order.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut dataset = Dataset::default();
        for record in records {
            dataset.push(record);
        }
        dataset
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.series.push(record.value);
        self.index.insert(record.key, record.value);
    }

    /// Key → value mapping (last write wins).
    pub fn index(&self) -> &BTreeMap<String, f64> {
        &self.index
    }

    /// All values in source row order.
    pub fn series(&self) -> &[f64] {
        &self.series
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.index.get(key).copied()
    }

    /// Number of rows loaded.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Number of distinct keys.
    pub fn distinct_keys(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SummaryResult
// ---------------------------------------------------------------------------

/// Message shown in place of a mean when nothing has been loaded.
pub const NO_DATA_MESSAGE: &str = "No data to analyze.";

/// Outcome of [`summarize`](super::stats::summarize).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryResult {
    /// The series was empty; no mean exists.
    Empty,
    /// Arithmetic mean at full precision.
    Mean(f64),
}

impl SummaryResult {
    pub fn mean(&self) -> Option<f64> {
        match self {
            SummaryResult::Mean(m) => Some(*m),
            SummaryResult::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SummaryResult::Empty)
    }
}

impl fmt::Display for SummaryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryResult::Mean(m) => write!(f, "Average Sodium to Potassium Ratio: {m:.2}"),
            SummaryResult::Empty => f.write_str(NO_DATA_MESSAGE),
        }
    }
}

// ---------------------------------------------------------------------------
// HistogramResult
// ---------------------------------------------------------------------------

/// Equal-width bucketing of a series.
///
/// `edges.len() == counts.len() + 1`; bucket `i` covers `[edges[i], edges[i + 1])`
/// except the last, which is closed on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramResult {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl HistogramResult {
    pub fn bucket_count(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all bucket counts; equals the length of the source series.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Observed `(min, max)` of the series.
    pub fn range(&self) -> (f64, f64) {
        match (self.edges.first(), self.edges.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0.0, 0.0),
        }
    }

    /// True when every value was identical, so all buckets have zero width.
    pub fn is_degenerate(&self) -> bool {
        let (lo, hi) = self.range();
        lo == hi
    }

    /// `(lower, upper, count)` for each bucket.
    pub fn buckets(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(w, &c)| (w[0], w[1], c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_overwrite_index_but_keep_series() {
        let ds = Dataset::from_records([
            Record::new("DrugY", 25.355),
            Record::new("drugC", 13.093),
            Record::new("DrugY", 10.114),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.distinct_keys(), 2);
        assert_eq!(ds.series(), &[25.355, 13.093, 10.114]);
        assert_eq!(ds.get("DrugY"), Some(10.114));
    }

    #[test]
    fn summary_display_rounds_to_two_decimals() {
        let s = SummaryResult::Mean(16.084485);
        assert_eq!(s.to_string(), "Average Sodium to Potassium Ratio: 16.08");
        assert_eq!(s.mean(), Some(16.084485));
        assert_eq!(SummaryResult::Empty.to_string(), NO_DATA_MESSAGE);
    }

    #[test]
    fn histogram_buckets_pair_edges_with_counts() {
        let h = HistogramResult {
            edges: vec![5.0, 10.0, 15.0],
            counts: vec![1, 2],
        };
        let buckets: Vec<_> = h.buckets().collect();
        assert_eq!(buckets, vec![(5.0, 10.0, 1), (10.0, 15.0, 2)]);
        assert_eq!(h.total(), 3);
        assert_eq!(h.max_count(), 2);
        assert!(!h.is_degenerate());
    }
}
