use chrono::{DateTime, NaiveDate, NaiveDateTime};

const PREVIEW_CHARS: usize = 140;

/// Short calendar date, e.g. `Mar 2, 2025`. Timestamps that cannot be parsed
/// are shown as sent.
pub(crate) fn short_date(raw: &str) -> String {
    const FORMAT: &str = "%b %-d, %Y";

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return date.format(FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, pattern) {
            return date.format(FORMAT).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(FORMAT).to_string();
    }
    raw.to_string()
}

/// First line-ish of a note body for the listing.
pub(crate) fn preview(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{}…", cut.trim_end())
}
