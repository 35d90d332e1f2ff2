/// Coercion of string-typed rainfall readings into numbers, shared by every
/// statistic that touches the rain column.

/// Interprets a raw rainfall field as millimetres.
///
/// Placeholder values and anything unsalvageable coerce to zero rather than
/// erroring: a single odd reading must never poison a multi-decade statistic.
/// Values with unit suffixes ("2.3mm") are cleaned and kept.
pub fn rain_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed == "-"
        || trimmed == "---"
        || trimmed == "0"
        || trimmed == "0.0"
        || trimmed.eq_ignore_ascii_case("N/A")
    {
        return 0.0;
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return value;
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// A day counts as rainy when any measurable rain fell, trace amounts
/// included.
pub fn is_rainy(raw: &str) -> bool {
    rain_amount(raw) > 0.0
}

/// The two seasons the statistics distinguish. Summer covers March through
/// August; winter runs September through February and is attributed to the
/// year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Summer,
    Winter,
}

/// Maps a calendar `(year, month)` to the season-year it belongs to for
/// `season`, or `None` when the month falls in the other season.
///
/// January and February belong to the winter that began the previous
/// September, hence the year shift.
pub fn season_year(year: i32, month: u32, season: Season) -> Option<i32> {
    match season {
        Season::Summer => (3..=8).contains(&month).then_some(year),
        Season::Winter => match month {
            9..=12 => Some(year),
            1..=2 => Some(year - 1),
            _ => None,
        },
    }
}
