use crate::archive::observation::Observation;
use log::info;

/// Inspects one observation and returns the matching anomaly descriptions.
///
/// Every check tolerates the string-typed fields: a value that does not parse
/// simply fails the numeric comparison and triggers no anomaly, except where
/// emptiness is itself the anomaly.
pub fn detect(observation: &Observation) -> Vec<String> {
    let mut notes = Vec::new();

    let mean = observation.mean_temp.parse::<f64>().ok();
    let high = observation.high_temp.parse::<f64>().ok();
    let low = observation.low_temp.parse::<f64>().ok();

    if let Some(mean) = mean {
        if !(15.0..=45.0).contains(&mean) {
            notes.push("Unusual mean temperature".to_string());
        }
    }

    if let (Some(high), Some(low)) = (high, low) {
        if high < low {
            notes.push("High temp lower than low temp".to_string());
        }
        if high - low > 25.0 {
            notes.push("Extreme temperature range".to_string());
        }
    }

    if let Some(barom) = extract_numeric(&observation.mean_barom) {
        // Humidity readings occasionally land in this column; anything at or
        // below 50 is assumed to be one of those and left alone.
        if barom > 50.0 && !(980.0..=1040.0).contains(&barom) {
            notes.push("Unusual barometric pressure".to_string());
        }
    }

    // A placeholder humidity is absent data, not an anomaly. Unit-suffixed
    // readings ("150%") still get their digits checked.
    if !is_zero_or_empty(&observation.mean_hum) {
        if let Some(humidity) = extract_numeric(&observation.mean_hum) {
            if !(10.0..=100.0).contains(&humidity) {
                notes.push("Unusual humidity".to_string());
            }
        }
    }

    if is_zero_or_empty(&observation.mean_temp)
        && is_zero_or_empty(&observation.high_temp)
        && is_zero_or_empty(&observation.low_temp)
    {
        notes.push("Missing temperature data".to_string());
    }

    if !is_zero_or_empty(&observation.rain) {
        if let Some(rain) = extract_numeric(&observation.rain) {
            if rain > 200.0 {
                notes.push("Extreme rainfall".to_string());
            }
        }
    }

    notes
}

/// Runs detection on one observation and records the outcome on it:
/// `flagged` becomes "Y" with the notes joined by "; ", or "F" with an empty
/// note when nothing matched.
pub fn annotate(observation: &mut Observation) {
    let notes = detect(observation);
    if notes.is_empty() {
        observation.flagged = "F".to_string();
        observation.anomaly_note = String::new();
    } else {
        observation.flagged = "Y".to_string();
        observation.anomaly_note = notes.join("; ");
    }
}

/// Annotates a whole batch and logs how many records were flagged.
pub fn annotate_all(observations: &mut [Observation]) {
    for observation in observations.iter_mut() {
        annotate(observation);
    }
    let flagged = observations.iter().filter(|o| o.is_flagged()).count();
    info!(
        "Anomaly detection flagged {} of {} observations",
        flagged,
        observations.len()
    );
}

/// Placeholder values the reports use for an absent reading.
fn is_zero_or_empty(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed == "0"
        || trimmed == "0.0"
        || trimmed == "---"
        || trimmed.eq_ignore_ascii_case("N/A")
}

/// Strips everything but digits and decimal points before parsing, so a
/// reading like "1013.2hPa" still yields its numeric value.
fn extract_numeric(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok()
}
