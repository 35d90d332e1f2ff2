use serde::Serialize;

/// Ordinary least-squares fit of annual totals against the year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    /// Change in millimetres per year.
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// The fitted value at `year`.
    pub fn value_at(&self, year: i32) -> f64 {
        self.slope * year as f64 + self.intercept
    }
}

/// Fits a least-squares line through `(year, total)` points.
///
/// Returns `None` with fewer than two points, or when every point shares the
/// same year and the slope is undefined.
pub fn linear_trend(points: &[(i32, f64)]) -> Option<TrendLine> {
    let n = points.len() as f64;
    if points.len() < 2 {
        return None;
    }

    let sum_x: f64 = points.iter().map(|(x, _)| *x as f64).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| *y).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| *x as f64 * *y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| (*x as f64).powi(2)).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(TrendLine { slope, intercept })
}
