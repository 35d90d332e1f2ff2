use crate::archive::observation::Observation;
use crate::stats::coerce::{is_rainy, season_year, Season};
use serde::Serialize;
use std::collections::BTreeMap;

/// Rainy-day counts for one (season-)year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyRainyDays {
    pub year: i32,
    pub rainy_days: usize,
    pub total_days: usize,
}

impl YearlyRainyDays {
    /// Share of observed days that were rainy, as a percentage.
    pub fn percentage(&self) -> f64 {
        if self.total_days == 0 {
            0.0
        } else {
            self.rainy_days as f64 * 100.0 / self.total_days as f64
        }
    }
}

/// Counts rainy days per calendar year. Observations without a parseable
/// year are ignored. Results come back in ascending year order.
pub fn by_year(observations: &[Observation]) -> Vec<YearlyRainyDays> {
    collect(observations.iter().filter_map(|o| {
        let year = o.year_number()?;
        Some((year, is_rainy(&o.rain)))
    }))
}

/// Counts rainy days per season-year for the given season. Days in the other
/// season are excluded entirely, not counted as dry.
pub fn by_season(observations: &[Observation], season: Season) -> Vec<YearlyRainyDays> {
    collect(observations.iter().filter_map(|o| {
        let year = o.year_number()?;
        let month = o.month_number()?;
        let season_year = season_year(year, month, season)?;
        Some((season_year, is_rainy(&o.rain)))
    }))
}

fn collect(days: impl Iterator<Item = (i32, bool)>) -> Vec<YearlyRainyDays> {
    let mut per_year: BTreeMap<i32, (usize, usize)> = BTreeMap::new();
    for (year, rainy) in days {
        let entry = per_year.entry(year).or_insert((0, 0));
        entry.1 += 1;
        if rainy {
            entry.0 += 1;
        }
    }
    per_year
        .into_iter()
        .map(|(year, (rainy_days, total_days))| YearlyRainyDays {
            year,
            rainy_days,
            total_days,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(year: i32, month: u32, day: u32, rain: &str) -> Observation {
        Observation {
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
            rain: rain.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn counts_rainy_and_total_days_per_year() {
        let observations = vec![
            observation(2010, 1, 1, "1.2"),
            observation(2010, 1, 2, "0.0"),
            observation(2010, 1, 3, "0.01"),
            observation(2011, 1, 1, "---"),
        ];
        let counts = by_year(&observations);
        assert_eq!(
            counts,
            vec![
                YearlyRainyDays { year: 2010, rainy_days: 2, total_days: 3 },
                YearlyRainyDays { year: 2011, rainy_days: 0, total_days: 1 },
            ]
        );
    }

    #[test]
    fn percentage_handles_empty_years() {
        let empty = YearlyRainyDays { year: 2010, rainy_days: 0, total_days: 0 };
        assert_eq!(empty.percentage(), 0.0);
        let half = YearlyRainyDays { year: 2010, rainy_days: 5, total_days: 10 };
        assert_eq!(half.percentage(), 50.0);
    }

    #[test]
    fn unparseable_years_are_ignored() {
        let mut bad = observation(2010, 1, 1, "5.0");
        bad.year = "????".to_string();
        assert!(by_year(&[bad]).is_empty());
    }

    #[test]
    fn winter_january_rain_belongs_to_the_previous_season_year() {
        let observations = vec![
            observation(2010, 9, 1, "2.0"),
            observation(2011, 1, 15, "3.0"),
            observation(2011, 6, 1, "4.0"),
        ];
        let winter = by_season(&observations, Season::Winter);
        assert_eq!(
            winter,
            vec![YearlyRainyDays { year: 2010, rainy_days: 2, total_days: 2 }]
        );
    }

    #[test]
    fn summer_excludes_winter_months() {
        let observations = vec![
            observation(2010, 4, 1, "2.0"),
            observation(2010, 12, 1, "9.0"),
        ];
        let summer = by_season(&observations, Season::Summer);
        assert_eq!(
            summer,
            vec![YearlyRainyDays { year: 2010, rainy_days: 1, total_days: 1 }]
        );
    }
}
