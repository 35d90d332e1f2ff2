use crate::rainfall::record::RainfallRecord;
use log::warn;
use serde::Serialize;
use std::collections::BTreeSet;

/// Parses a comma-separated exclusion list like `"1914, 1939,1945"`.
///
/// Returns `None` when any entry fails to parse: a partially applied
/// exclusion list silently changes results, so a malformed list is rejected
/// as a whole.
pub fn parse_excluded_years(spec: &str) -> Option<BTreeSet<i32>> {
    let mut years = BTreeSet::new();
    for entry in spec.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        years.insert(entry.parse::<i32>().ok()?);
    }
    Some(years)
}

/// Drops the years named in `spec` from `records`. A malformed list is
/// logged and ignored entirely, leaving the records unfiltered.
pub fn apply_excluded_years(records: Vec<RainfallRecord>, spec: &str) -> Vec<RainfallRecord> {
    match parse_excluded_years(spec) {
        Some(excluded) => records
            .into_iter()
            .filter(|r| !excluded.contains(&r.year))
            .collect(),
        None => {
            warn!(
                "Ignoring malformed excluded-years list {:?}; no years excluded",
                spec
            );
            records
        }
    }
}

/// Keeps records whose year falls in `[from, to]` inclusive.
pub fn year_range(records: Vec<RainfallRecord>, from: i32, to: i32) -> Vec<RainfallRecord> {
    records
        .into_iter()
        .filter(|r| (from..=to).contains(&r.year))
        .collect()
}

/// Mean rainfall per calendar month across all records.
pub fn monthly_averages(records: &[RainfallRecord]) -> [f64; 12] {
    let mut averages = [0.0; 12];
    if records.is_empty() {
        return averages;
    }
    for record in records {
        for (avg, value) in averages.iter_mut().zip(record.monthly.iter()) {
            *avg += value;
        }
    }
    for avg in averages.iter_mut() {
        *avg /= records.len() as f64;
    }
    averages
}

/// Headline numbers over a set of annual records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasicStatistics {
    pub years: usize,
    pub mean_annual_total: f64,
    pub wettest: Option<(i32, f64)>,
    pub driest: Option<(i32, f64)>,
}

pub fn basic_statistics(records: &[RainfallRecord]) -> BasicStatistics {
    let years = records.len();
    let mean_annual_total = if years == 0 {
        0.0
    } else {
        records.iter().map(|r| r.total).sum::<f64>() / years as f64
    };
    let wettest = records
        .iter()
        .max_by(|a, b| a.total.total_cmp(&b.total))
        .map(|r| (r.year, r.total));
    let driest = records
        .iter()
        .min_by(|a, b| a.total.total_cmp(&b.total))
        .map(|r| (r.year, r.total));
    BasicStatistics {
        years,
        mean_annual_total,
        wettest,
        driest,
    }
}
