use crate::stats::error::StatsError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean annual rainfall over one multi-year bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearBucket {
    pub start_year: i32,
    pub end_year: i32,
    /// Number of years in the span that actually had data.
    pub years: usize,
    pub mean_annual_total: f64,
}

fn validate(bucket_size: i32, offset: i32) -> Result<(), StatsError> {
    if bucket_size < 1 {
        return Err(StatsError::Validation(format!(
            "bucket size must be at least 1, got {}",
            bucket_size
        )));
    }
    if offset < 0 || offset >= bucket_size {
        return Err(StatsError::Validation(format!(
            "offset must lie in [0, {}), got {}",
            bucket_size, offset
        )));
    }
    Ok(())
}

/// Computes the bucket spans covering `[min_year, max_year]`.
///
/// The first bucket starts at the smallest year `>= min_year` that is
/// congruent to `offset` modulo `bucket_size`; years before it fall outside
/// every bucket. The last bucket is truncated at `max_year`.
pub fn bucket_spans(
    min_year: i32,
    max_year: i32,
    bucket_size: i32,
    offset: i32,
) -> Result<Vec<(i32, i32)>, StatsError> {
    validate(bucket_size, offset)?;
    if max_year < min_year {
        return Ok(Vec::new());
    }

    let mut start = min_year - (min_year - offset).rem_euclid(bucket_size);
    if start < min_year {
        start += bucket_size;
    }

    let mut spans = Vec::new();
    while start <= max_year {
        spans.push((start, (start + bucket_size - 1).min(max_year)));
        start += bucket_size;
    }
    Ok(spans)
}

/// Buckets annual totals and averages within each bucket.
///
/// `totals` pairs a year with its annual rainfall total; order and duplicates
/// do not matter (duplicates average together as extra data years). Buckets
/// with no data years are omitted from the result.
pub fn bucket_means(
    totals: &[(i32, f64)],
    bucket_size: i32,
    offset: i32,
) -> Result<Vec<YearBucket>, StatsError> {
    validate(bucket_size, offset)?;
    let Some(min_year) = totals.iter().map(|(y, _)| *y).min() else {
        return Ok(Vec::new());
    };
    let max_year = totals.iter().map(|(y, _)| *y).max().unwrap_or(min_year);

    let by_year: BTreeMap<i32, Vec<f64>> =
        totals.iter().fold(BTreeMap::new(), |mut acc, (year, total)| {
            acc.entry(*year).or_default().push(*total);
            acc
        });

    let mut buckets = Vec::new();
    for (start_year, end_year) in bucket_spans(min_year, max_year, bucket_size, offset)? {
        let values: Vec<f64> = by_year
            .range(start_year..=end_year)
            .flat_map(|(_, totals)| totals.iter().copied())
            .collect();
        if values.is_empty() {
            continue;
        }
        buckets.push(YearBucket {
            start_year,
            end_year,
            years: values.len(),
            mean_annual_total: values.iter().sum::<f64>() / values.len() as f64,
        });
    }
    Ok(buckets)
}
