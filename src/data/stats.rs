use super::error::DataError;
use super::model::{Dataset, HistogramResult, SummaryResult};

/// Number of buckets the viewer draws.
pub const DEFAULT_BUCKET_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Mean
// ---------------------------------------------------------------------------

/// Arithmetic mean of the dataset's series, or [`SummaryResult::Empty`].
pub fn summarize(dataset: &Dataset) -> SummaryResult {
    let series = dataset.series();
    if series.is_empty() {
        log::warn!("summary requested with no data loaded");
        return SummaryResult::Empty;
    }
    let n = series.len() as f64;
    let sum: f64 = series.iter().sum();
    if sum.is_finite() {
        return SummaryResult::Mean(sum / n);
    }
    // The plain sum overflowed; every term of this one is at most max/n.
    SummaryResult::Mean(series.iter().map(|v| v / n).sum())
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Count the series into `bucket_count` equal-width buckets over `[min, max]`.
///
/// Returns `Ok(None)` for an empty series.  Buckets are half-open except the
/// last, which also takes `max`.  When every value is identical the range has
/// zero width and all values land in bucket 0.
pub fn histogram(
    dataset: &Dataset,
    bucket_count: usize,
) -> Result<Option<HistogramResult>, DataError> {
    if bucket_count == 0 {
        return Err(DataError::InvalidBucketCount(bucket_count));
    }

    let series = dataset.series();
    if series.is_empty() {
        log::warn!("histogram requested with no data loaded");
        return Ok(None);
    }

    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        let mut counts = vec![0usize; bucket_count];
        counts[0] = series.len();
        return Ok(Some(HistogramResult {
            edges: vec![min; bucket_count + 1],
            counts,
        }));
    }

    let edges = bucket_edges(min, max, bucket_count);
    let mut counts = vec![0usize; bucket_count];
    for &v in series {
        counts[bucket_of(v, &edges)] += 1;
    }

    Ok(Some(HistogramResult { edges, counts }))
}

/// `bucket_count + 1` non-decreasing edges from `min` to `max`.
///
/// Works on halved endpoints so `max - min` cannot overflow for finite input.
fn bucket_edges(min: f64, max: f64, bucket_count: usize) -> Vec<f64> {
    let half_lo = min / 2.0;
    let half_step = (max / 2.0 - half_lo) / bucket_count as f64;

    let mut edges = Vec::with_capacity(bucket_count + 1);
    edges.push(min);
    for i in 1..bucket_count {
        let edge = 2.0 * (half_lo + half_step * i as f64);
        edges.push(edge.clamp(min, max));
    }
    edges.push(max);
    edges
}

/// Index of the bucket holding `value`, consistent with `edges`: bucket `i`
/// takes `edges[i] <= value < edges[i + 1]`, the last one also takes `max`.
fn bucket_of(value: f64, edges: &[f64]) -> usize {
    let last = edges.len() - 2;
    let (min, max) = (edges[0], edges[last + 1]);
    let half_span = max / 2.0 - min / 2.0;

    // Estimate from the relative position, then settle against the edges.
    let t = (value / 2.0 - min / 2.0) / half_span;
    let mut idx = ((t * (last + 1) as f64).floor() as usize).min(last);
    while idx > 0 && value < edges[idx] {
        idx -= 1;
    }
    while idx < last && value >= edges[idx + 1] {
        idx += 1;
    }
    idx
}
