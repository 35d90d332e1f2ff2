use crate::archive::observation::Observation;
use log::debug;

/// Minimum line length for the legacy fixed-width layout. Anything shorter
/// cannot contain the full column set and is handed to the token parser.
const MIN_FIXED_LINE_LEN: usize = 70;

/// Minimum token count for a line to be considered a data row at all.
const MIN_TOKENS: usize = 6;

/// Rainfall reported as a trace: non-zero but below the gauge's resolution.
/// Recorded as a nominal minimal amount so rainy-day counting sees it.
const TRACE_RAINFALL: &str = "0.01";

/// The two line formats the remote reports have been published in over the
/// years. Chosen once per month by probing the first data line rather than by
/// catching parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    /// Legacy fixed-width style: fields live at known character ranges.
    FixedColumn,
    /// Whitespace-normalized tokens classified positionally with
    /// plausibility fallbacks.
    TokenHeuristic,
}

impl ReportLayout {
    /// Probes a data line. Reports that advertise heating/cooling degree-day
    /// columns in their header were never published fixed-width, so those go
    /// straight to the token parser regardless of line length.
    pub fn probe(line: &str, has_deg_days: bool) -> Self {
        if !has_deg_days && line.len() >= MIN_FIXED_LINE_LEN {
            ReportLayout::FixedColumn
        } else {
            ReportLayout::TokenHeuristic
        }
    }
}

/// Fallback values used by the token parser when a token fails its expected
/// numeric pattern. A malformed token never rejects the line; it produces the
/// default instead.
#[derive(Debug, Clone)]
pub struct TokenDefaults {
    pub mean_temp: String,
    pub high_temp: String,
    pub low_temp: String,
    pub high_time: String,
    pub low_time: String,
    pub wind_hi_time: String,
    pub mean_barom: String,
    pub mean_hum: String,
}

impl Default for TokenDefaults {
    fn default() -> Self {
        Self {
            mean_temp: "25.0".to_string(),
            high_temp: "30.0".to_string(),
            low_temp: "20.0".to_string(),
            high_time: "12:00pm".to_string(),
            low_time: "6:00am".to_string(),
            wind_hi_time: "12:00pm".to_string(),
            mean_barom: String::new(),
            mean_hum: String::new(),
        }
    }
}

/// Parses one month's raw report text into observations.
///
/// This never fails: malformed lines are skipped and whatever valid records
/// exist elsewhere in the month are still collected.
pub fn parse_month(text: &str, year: i32, month: u32) -> Vec<Observation> {
    parse_month_with_defaults(text, year, month, &TokenDefaults::default())
}

/// Like [`parse_month`] but with caller-supplied token fallbacks.
pub fn parse_month_with_defaults(
    text: &str,
    year: i32,
    month: u32,
    defaults: &TokenDefaults,
) -> Vec<Observation> {
    let has_deg_days = header_advertises_deg_days(text);
    // Reports normally carry a dashed separator between the column header and
    // the data block. When one exists, everything before it is header; when
    // none exists the per-line digit check is the only gate.
    let mut data_started = !text.lines().any(|l| is_separator_line(l.trim()));
    let mut layout: Option<ReportLayout> = None;
    let mut observations = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if !data_started {
            if is_separator_line(line) {
                data_started = true;
            }
            continue;
        }
        if line.is_empty() || !line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            continue;
        }

        let chosen = *layout.get_or_insert_with(|| ReportLayout::probe(line, has_deg_days));
        let parsed = match chosen {
            ReportLayout::FixedColumn => parse_fixed_line(line, year, month)
                .or_else(|| parse_token_line(line, year, month, has_deg_days, defaults)),
            ReportLayout::TokenHeuristic => {
                parse_token_line(line, year, month, has_deg_days, defaults)
            }
        };
        match parsed {
            Some(observation) => observations.push(observation),
            None => debug!("Skipping unparsable line in {}_{:02}: {}", year, month, line),
        }
    }
    observations
}

fn is_separator_line(line: &str) -> bool {
    line.starts_with("---")
}

fn header_advertises_deg_days(text: &str) -> bool {
    text.lines()
        .take_while(|l| !is_separator_line(l.trim()))
        .any(|l| l.contains("HEAT") && l.contains("DEG"))
}

/// Slices the legacy fixed-width layout at its known character ranges.
/// Returns `None` for lines too short to hold the full column set.
fn parse_fixed_line(line: &str, year: i32, month: u32) -> Option<Observation> {
    if line.len() < MIN_FIXED_LINE_LEN {
        return None;
    }

    let field = |start: usize, end: usize| slice_field(line, start, end);

    // Trailing columns (barometer, humidity, wind run) float freely after the
    // dominant-direction column; wind run is discarded.
    let mut mean_barom = String::new();
    let mut mean_hum = String::new();
    let remainder = line.get(73..).unwrap_or("");
    let mut trailing = remainder.split_whitespace();
    if let Some(barom) = trailing.next() {
        mean_barom = barom.to_string();
    }
    if let Some(hum) = trailing.next() {
        mean_hum = hum.to_string();
    }

    Some(Observation {
        year: year.to_string(),
        month: month.to_string(),
        day: field(0, 3),
        mean_temp: field(5, 9),
        high_temp: field(10, 15),
        high_time: field(16, 24),
        low_temp: field(25, 30),
        low_time: field(31, 39),
        heat_deg_days: "0".to_string(),
        cool_deg_days: "0".to_string(),
        rain: field(42, 46),
        wind_avg: field(49, 52),
        wind_hi: field(53, 56),
        wind_hi_time: field(57, 66),
        dom_dir: field(69, 73),
        mean_barom,
        mean_hum,
        flagged: "F".to_string(),
        anomaly_note: String::new(),
    })
}

fn slice_field(line: &str, start: usize, end: usize) -> String {
    line.get(start..end.min(line.len()))
        .or_else(|| line.get(start..))
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Token-heuristic extraction: normalize whitespace, split, classify tokens
/// positionally with plausibility fallbacks.
fn parse_token_line(
    line: &str,
    year: i32,
    month: u32,
    has_deg_days: bool,
    defaults: &TokenDefaults,
) -> Option<Observation> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return None;
    }
    if !tokens[0].chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let day = tokens[0].to_string();
    let mean_temp = numeric_or(tokens[1], &defaults.mean_temp);
    let high_temp = numeric_or(tokens[2], &defaults.high_temp);
    let high_time = time_or(tokens.get(3).copied(), &defaults.high_time);
    let low_temp = numeric_or(tokens[4], &defaults.low_temp);
    let low_time = time_or(tokens.get(5).copied(), &defaults.low_time);

    let mut idx = 6;
    let (heat_deg_days, cool_deg_days) = if has_deg_days {
        let heat = int_or(tokens.get(idx).copied(), "0");
        let cool = int_or(tokens.get(idx + 1).copied(), "0");
        idx += 2;
        (heat, cool)
    } else {
        ("0".to_string(), "0".to_string())
    };

    let rain = match tokens.get(idx).copied() {
        Some("T") => TRACE_RAINFALL.to_string(),
        Some(token) if is_rain_token(token) => token.to_string(),
        Some(_) | None => "0.0".to_string(),
    };
    if tokens.get(idx).is_some() {
        idx += 1;
    }

    let wind_avg = int_or(tokens.get(idx).copied(), "0");
    let wind_hi = int_or(tokens.get(idx + 1).copied(), "0");
    let wind_hi_time = time_or(tokens.get(idx + 2).copied(), &defaults.wind_hi_time);
    let dom_dir = direction_or(tokens.get(idx + 3).copied(), "N");
    idx += 4;

    let mean_barom = tokens
        .get(idx.min(tokens.len())..)
        .unwrap_or(&[])
        .iter()
        .find(|t| is_barometric_token(t))
        .map(|t| t.to_string())
        .unwrap_or_else(|| defaults.mean_barom.clone());

    let mean_hum = tokens
        .iter()
        .rev()
        .take(3)
        .find(|t| is_humidity_token(t))
        .map(|t| t.to_string())
        .unwrap_or_else(|| defaults.mean_hum.clone());

    Some(Observation {
        year: year.to_string(),
        month: month.to_string(),
        day,
        mean_temp,
        high_temp,
        high_time,
        low_temp,
        low_time,
        heat_deg_days,
        cool_deg_days,
        rain,
        wind_avg,
        wind_hi,
        wind_hi_time,
        dom_dir,
        mean_barom,
        mean_hum,
        flagged: "F".to_string(),
        anomaly_note: String::new(),
    })
}

fn numeric_or(token: &str, default: &str) -> String {
    if token.parse::<f64>().is_ok() {
        token.to_string()
    } else {
        default.to_string()
    }
}

fn int_or(token: Option<&str>, default: &str) -> String {
    match token {
        Some(t) if t.parse::<i64>().is_ok() => t.to_string(),
        Some(t) => match t.parse::<f64>() {
            Ok(value) => format!("{}", value.trunc() as i64),
            Err(_) => default.to_string(),
        },
        None => default.to_string(),
    }
}

fn time_or(token: Option<&str>, default: &str) -> String {
    match token {
        Some(t) if is_time_token(t) => t.to_string(),
        _ => default.to_string(),
    }
}

fn direction_or(token: Option<&str>, default: &str) -> String {
    match token {
        Some(t) if !t.is_empty() && t.chars().all(|c| c.is_ascii_alphabetic()) => t.to_string(),
        _ => default.to_string(),
    }
}

/// `\d{1,2}:\d{2}[ap]m`
fn is_time_token(token: &str) -> bool {
    if !token.is_ascii() {
        return false;
    }
    let Some((clock, meridiem)) = token.len().checked_sub(2).map(|i| token.split_at(i)) else {
        return false;
    };
    if !matches!(meridiem, "am" | "pm") {
        return false;
    }
    let Some((hours, minutes)) = clock.split_once(':') else {
        return false;
    };
    (1..=2).contains(&hours.len())
        && hours.chars().all(|c| c.is_ascii_digit())
        && minutes.len() == 2
        && minutes.chars().all(|c| c.is_ascii_digit())
}

/// `\d{1,2}\.\d{2}` within the plausible daily range [0, 20].
fn is_rain_token(token: &str) -> bool {
    let Some((whole, frac)) = token.split_once('.') else {
        return false;
    };
    if !(1..=2).contains(&whole.len())
        || frac.len() != 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }
    token.parse::<f64>().is_ok_and(|v| (0.0..=20.0).contains(&v))
}

/// A four-digit value beginning with "10", optionally with decimals.
fn is_barometric_token(token: &str) -> bool {
    let (whole, frac) = token.split_once('.').unwrap_or((token, ""));
    whole.len() == 4
        && whole.starts_with("10")
        && whole.chars().all(|c| c.is_ascii_digit())
        && frac.chars().all(|c| c.is_ascii_digit())
}

/// A bare 1-3 digit value no greater than 100.
fn is_humidity_token(token: &str) -> bool {
    (1..=3).contains(&token.len())
        && token.chars().all(|c| c.is_ascii_digit())
        && token.parse::<u32>().is_ok_and(|v| v <= 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a legacy fixed-width line with fields at the documented ranges.
    fn fixed_line(
        day: &str,
        mean: &str,
        high: &str,
        high_time: &str,
        low: &str,
        low_time: &str,
        rain: &str,
        trailing: &str,
    ) -> String {
        format!(
            "{day:<3}  {mean:>4} {high:>5} {high_time:>8} {low:>5} {low_time:>8}   {rain:>4}   {wa:>3} {wh:>3} {wht:>9}   {dir:<4}{trailing}",
            wa = "1",
            wh = "23",
            wht = "12:54pm",
            dir = "NNE",
        )
    }

    const HEADER: &str = "DAY  TEMP  HIGH   TIME     LOW   TIME    RAIN   AVG  HI  TIME     DIR\n----------------------------------------------------------------------\n";

    #[test]
    fn fixed_layout_extracts_known_ranges() {
        let line = fixed_line(
            "1", "25.8", "29.2", "2:31pm", "20.8", "6:39am", "0.0", "1011.09 76 31",
        );
        assert!(line.len() >= MIN_FIXED_LINE_LEN);
        let text = format!("{HEADER}{line}\n");

        let observations = parse_month(&text, 2010, 1);
        assert_eq!(observations.len(), 1);
        let o = &observations[0];
        assert_eq!(o.day, "1");
        assert_eq!(o.mean_temp, "25.8");
        assert_eq!(o.high_temp, "29.2");
        assert_eq!(o.high_time, "2:31pm");
        assert_eq!(o.low_temp, "20.8");
        assert_eq!(o.low_time, "6:39am");
        assert_eq!(o.rain, "0.0");
        assert_eq!(o.wind_avg, "1");
        assert_eq!(o.wind_hi, "23");
        assert_eq!(o.dom_dir, "NNE");
        assert_eq!(o.mean_barom, "1011.09");
        assert_eq!(o.mean_hum, "76");
        assert_eq!(o.flagged, "F");
        assert_eq!(o.anomaly_note, "");
    }

    #[test]
    fn header_lines_before_separator_are_skipped() {
        let text = format!(
            "2010 SUMMARY REPORT\n{HEADER}{}\n{}\n",
            fixed_line("1", "25.8", "29.2", "2:31pm", "20.8", "6:39am", "0.0", "1011.09 76 31"),
            fixed_line("2", "26.1", "29.9", "1:31pm", "20.7", "6:21am", "0.2", "1012.44 72 40"),
        );
        let observations = parse_month(&text, 2010, 1);
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].day, "2");
        assert_eq!(observations[1].rain, "0.2");
    }

    #[test]
    fn token_layout_parses_short_lines() {
        let text = "---\n1 25.8 29.2 2:31pm 20.8 6:39am 0.00 1 23 12:54pm NNE 1011.09 76\n";
        let observations = parse_month(text, 2010, 1);
        assert_eq!(observations.len(), 1);
        let o = &observations[0];
        assert_eq!(o.rain, "0.00");
        assert_eq!(o.mean_barom, "1011.09");
        assert_eq!(o.mean_hum, "76");
        assert_eq!(o.dom_dir, "NNE");
    }

    #[test]
    fn trace_rainfall_token_becomes_nominal_amount() {
        let text = "---\n1 25.8 29.2 2:31pm 20.8 6:39am T 1 23 12:54pm NNE 1011.09 76\n";
        let observations = parse_month(text, 2010, 1);
        assert_eq!(observations[0].rain, "0.01");
    }

    #[test]
    fn implausible_rain_token_falls_back_to_zero() {
        // 29.92 matches the digit pattern but exceeds the plausible range.
        let text = "---\n1 25.8 29.2 2:31pm 20.8 6:39am 29.92 1 23 12:54pm NNE 1011.09 76\n";
        let observations = parse_month(text, 2010, 1);
        assert_eq!(observations[0].rain, "0.0");
    }

    #[test]
    fn deg_days_header_switches_to_token_layout_with_extra_columns() {
        let text = "DAY TEMP HIGH TIME LOW TIME HEAT DEG COOL DEG RAIN AVG HI TIME DIR BAROM HUM\n---\n\
                    1 18.2 24.0 1:10pm 12.5 5:40am 3 0 0.40 2 19 3:12pm WSW 1015.2 64\n";
        let observations = parse_month(text, 2006, 12);
        assert_eq!(observations.len(), 1);
        let o = &observations[0];
        assert_eq!(o.heat_deg_days, "3");
        assert_eq!(o.cool_deg_days, "0");
        assert_eq!(o.rain, "0.40");
        assert_eq!(o.mean_hum, "64");
    }

    #[test]
    fn malformed_lines_are_skipped_without_aborting_the_month() {
        let text = "---\n\
                    1 25.8 29.2 2:31pm 20.8 6:39am 0.00 1 23 12:54pm NNE 1011.09 76\n\
                    2 25.9\n\
                    garbage line\n\
                    3 26.0 30.1 1:12pm 21.0 6:10am 0.10 2 20 2:00pm NE 1010.55 70\n";
        let observations = parse_month(text, 2010, 1);
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].day, "1");
        assert_eq!(observations[1].day, "3");
    }

    #[test]
    fn unparsable_numeric_tokens_fall_back_to_defaults() {
        let text = "---\n1 ?? 29.2 notatime 20.8 6:39am 0.00 x 23 12:54pm NNE 1011.09 76\n";
        let observations = parse_month(text, 2010, 1);
        let o = &observations[0];
        assert_eq!(o.mean_temp, "25.0");
        assert_eq!(o.high_time, "12:00pm");
        assert_eq!(o.wind_avg, "0");
    }

    #[test]
    fn month_without_separator_still_yields_data() {
        let text = "1 25.8 29.2 2:31pm 20.8 6:39am 0.00 1 23 12:54pm NNE 1011.09 76\n";
        assert_eq!(parse_month(text, 2010, 1).len(), 1);
    }

    #[test]
    fn token_classifiers() {
        assert!(is_rain_token("0.00"));
        assert!(is_rain_token("12.35"));
        assert!(!is_rain_token("29.92"));
        assert!(!is_rain_token("0.0"));
        assert!(!is_rain_token("abc"));

        assert!(is_barometric_token("1011"));
        assert!(is_barometric_token("1011.09"));
        assert!(!is_barometric_token("996.1"));
        assert!(!is_barometric_token("2011"));

        assert!(is_humidity_token("76"));
        assert!(is_humidity_token("100"));
        assert!(!is_humidity_token("101"));
        assert!(!is_humidity_token("1011"));

        assert!(is_time_token("2:31pm"));
        assert!(is_time_token("12:54am"));
        assert!(!is_time_token("25.8"));
        assert!(!is_time_token("2:31"));
    }
}
