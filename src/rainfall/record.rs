use serde::Serialize;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One year of monthly rainfall totals, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RainfallRecord {
    pub year: i32,
    pub monthly: [f64; 12],
    pub total: f64,
}

impl RainfallRecord {
    /// Builds a record, trusting the source's annual total when it supplied
    /// one and recomputing it from the monthly values otherwise.
    pub fn new(year: i32, monthly: [f64; 12], source_total: Option<f64>) -> Self {
        let total = source_total.unwrap_or_else(|| monthly.iter().sum());
        Self { year, monthly, total }
    }

    /// Rainfall for calendar month `month` (1-based), or `None` out of range.
    pub fn month(&self, month: u32) -> Option<f64> {
        (1..=12)
            .contains(&month)
            .then(|| self.monthly[(month - 1) as usize])
    }
}

/// Short English name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}
