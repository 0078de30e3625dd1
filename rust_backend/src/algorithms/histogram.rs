//! Equal-width histograms over cleaned samples.

use crate::models::HistogramBucket;

/// Bin `values` into `bucket_count` equal-width buckets spanning `[min, max]`.
///
/// - empty input gives no buckets
/// - when every value is equal a single zero-width bucket holds them all
/// - otherwise a value lands in bucket `floor((v - min) / width)`, clamped to
///   the valid range so the maximum ends up in the last bucket
///
/// A `bucket_count` of zero is treated as one.
pub fn compute_histogram(values: &[f64], bucket_count: usize) -> Vec<HistogramBucket> {
    if values.is_empty() {
        return Vec::new();
    }

    let bucket_count = bucket_count.max(1);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBucket {
            range_start: min,
            range_end: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bucket_count as f64;
    let mut counts = vec![0usize; bucket_count];

    for value in values {
        let raw_index = ((value - min) / width).floor();
        let index = if raw_index.is_nan() || raw_index < 0.0 {
            0
        } else {
            (raw_index as usize).min(bucket_count - 1)
        };
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| {
            let range_start = min + idx as f64 * width;
            let range_end = if idx + 1 == bucket_count {
                max
            } else {
                min + (idx + 1) as f64 * width
            };
            HistogramBucket {
                range_start,
                range_end,
                count,
            }
        })
        .collect()
}
