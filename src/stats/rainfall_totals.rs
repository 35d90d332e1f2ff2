use crate::archive::observation::Observation;
use crate::stats::coerce::{rain_amount, season_year, Season};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summed rainfall for one (season-)year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyRainfall {
    pub year: i32,
    pub total_mm: f64,
    pub days: usize,
}

impl YearlyRainfall {
    /// Mean rainfall per observed day.
    pub fn daily_average(&self) -> f64 {
        if self.days == 0 {
            0.0
        } else {
            self.total_mm / self.days as f64
        }
    }
}

/// Sums rainfall per calendar year, ascending. Observations without a
/// parseable year are ignored; unparseable rain readings contribute zero.
pub fn by_year(observations: &[Observation]) -> Vec<YearlyRainfall> {
    collect(observations.iter().filter_map(|o| {
        let year = o.year_number()?;
        Some((year, rain_amount(&o.rain)))
    }))
}

/// Sums rainfall per season-year for the given season.
pub fn by_season(observations: &[Observation], season: Season) -> Vec<YearlyRainfall> {
    collect(observations.iter().filter_map(|o| {
        let year = o.year_number()?;
        let month = o.month_number()?;
        let season_year = season_year(year, month, season)?;
        Some((season_year, rain_amount(&o.rain)))
    }))
}

fn collect(amounts: impl Iterator<Item = (i32, f64)>) -> Vec<YearlyRainfall> {
    let mut per_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for (year, amount) in amounts {
        let entry = per_year.entry(year).or_insert((0.0, 0));
        entry.0 += amount;
        entry.1 += 1;
    }
    per_year
        .into_iter()
        .map(|(year, (total_mm, days))| YearlyRainfall { year, total_mm, days })
        .collect()
}
