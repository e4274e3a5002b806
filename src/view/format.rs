use chrono::{DateTime, NaiveDate};

use crate::tmdb::Genre;

pub const UNKNOWN_DATE: &str = "Release date unknown";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_TAGLINE: &str = "No tagline";

/// "Jul 16, 2008", or [`UNKNOWN_DATE`] for missing or malformed dates.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return UNKNOWN_DATE.to_string();
    };

    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    match parsed {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}

pub fn format_vote(average: f64) -> String {
    format!("{:.1}", average)
}

pub fn card_rating(average: f64) -> Option<String> {
    (average > 0.0).then(|| format_vote(average))
}

pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{} min", m),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_genres(genres: &[Genre]) -> String {
    let joined = genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

pub fn format_tagline(tagline: Option<&str>) -> String {
    match tagline {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => NO_TAGLINE.to_string(),
    }
}
