use serde::{Deserialize, Serialize};

/// One weather station reading for a single calendar day.
///
/// Every payload field is kept as text, exactly as it appeared in the source
/// report. The upstream reports are inconsistently formatted and frequently
/// contain placeholders (`"---"`, `"N/A"`) or unit-contaminated values
/// (`"2.3mm"`), so numeric typing happens lazily at the point of use with
/// tolerant coercion instead of at parse time.
///
/// Invariant: `flagged == "Y"` if and only if `anomaly_note` is non-empty.
/// The anomaly detector is the only code that writes these two fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub year: String,
    pub month: String,
    pub day: String,
    pub mean_temp: String,
    pub high_temp: String,
    pub high_time: String,
    pub low_temp: String,
    pub low_time: String,
    pub heat_deg_days: String,
    pub cool_deg_days: String,
    pub rain: String,
    pub wind_avg: String,
    pub wind_hi: String,
    pub wind_hi_time: String,
    pub dom_dir: String,
    pub mean_barom: String,
    pub mean_hum: String,
    /// `"Y"` when the anomaly detector fired at least one rule, `"F"` otherwise.
    pub flagged: String,
    /// `"; "`-joined reasons from the anomaly detector, empty when clean.
    pub anomaly_note: String,
}

impl Observation {
    /// Numeric day of month, falling back to 0 for unparsable day fields so
    /// that malformed records sort first rather than poisoning a sort.
    pub fn day_number(&self) -> u32 {
        self.day.trim().parse().unwrap_or(0)
    }

    /// Numeric year, when the year field parses.
    pub fn year_number(&self) -> Option<i32> {
        self.year.trim().parse().ok()
    }

    /// Numeric month (1-12), when the month field parses.
    pub fn month_number(&self) -> Option<u32> {
        self.month.trim().parse().ok()
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged == "Y"
    }
}

/// An [`Observation`] as it lives in the archival store: shuffled into an
/// opaque position and carrying a sequence identifier derived from that
/// position. Created once per ingestion cycle; the store owns the full set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedRecord {
    pub id: String,
    pub observation: Observation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_number_parses_plain_days() {
        let obs = Observation {
            day: "17".to_string(),
            ..Default::default()
        };
        assert_eq!(obs.day_number(), 17);
    }

    #[test]
    fn day_number_tolerates_garbage() {
        let obs = Observation {
            day: "--".to_string(),
            ..Default::default()
        };
        assert_eq!(obs.day_number(), 0);
    }

    #[test]
    fn month_number_trims_whitespace() {
        let obs = Observation {
            month: " 9 ".to_string(),
            ..Default::default()
        };
        assert_eq!(obs.month_number(), Some(9));
    }
}
