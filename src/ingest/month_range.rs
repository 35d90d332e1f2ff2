use chrono::{Months, NaiveDate};

/// An inclusive range of calendar months, iterated in increasing
/// chronological order during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl MonthRange {
    /// Builds a range from `(start_year, start_month)` through
    /// `(end_year, end_month)` inclusive. Returns `None` for invalid months
    /// or an end before the start.
    pub fn new(
        start_year: i32,
        start_month: u32,
        end_year: i32,
        end_month: u32,
    ) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(start_year, start_month, 1)?;
        let end = NaiveDate::from_ymd_opt(end_year, end_month, 1)?;
        if end < start {
            return None;
        }
        Some(Self { start, end })
    }

    /// The full historical range the remote source publishes:
    /// September 2005 through June 2025.
    pub fn default_historical() -> Self {
        Self::new(2005, 9, 2025, 6).expect("static range is valid")
    }

    /// Iterates `(year, month)` pairs in chronological order.
    pub fn months(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        let end = self.end;
        std::iter::successors(Some(self.start), move |date| {
            date.checked_add_months(Months::new(1)).filter(|next| *next <= end)
        })
        .map(|date| {
            use chrono::Datelike;
            (date.year(), date.month())
        })
    }
}
