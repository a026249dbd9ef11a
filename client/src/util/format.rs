//! Display formatting for ratings and timestamps.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Ukrainian plural of "star" for a rating, chosen by the rounded value.
#[allow(clippy::cast_possible_truncation)]
pub fn star_text(rating: f64) -> &'static str {
    match rating.round() as i64 {
        1 => "Зірка",
        2..=4 => "Зірки",
        _ => "Зірок",
    }
}

/// Rating as printed next to the star word; whole numbers drop the fraction.
pub fn rating_number(rating: f64) -> String {
    if rating.fract() == 0.0 { format!("{rating:.0}") } else { format!("{rating:.1}") }
}

/// Render an ISO-8601 backend timestamp as `YYYY-MM-DD HH:MM`.
///
/// Input that does not look like a timestamp is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    let Some((date, time)) = raw.split_once('T') else {
        return raw.to_owned();
    };
    match time.get(..5) {
        Some(hm) if date.len() == 10 && hm.as_bytes().get(2) == Some(&b':') => format!("{date} {hm}"),
        _ => raw.to_owned(),
    }
}
