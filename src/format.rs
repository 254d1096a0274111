//! Display formatting helpers shared by dashboard pages.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Shown for an absent timestamp.
pub const MISSING_DATE: &str = "—";
pub const INVALID_DATE: &str = "Invalid Date";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format an ISO-8601 timestamp as local `date HH:MM`.
pub fn format_date(iso: Option<&str>) -> String {
    format_date_in(iso, &Local)
}

/// Format an ISO-8601 timestamp as `date HH:MM` in `tz`.
///
/// Zone-less timestamps (what the server's `isoformat()` emits) are taken
/// as wall-clock time in `tz`; date-only values are UTC midnight.
pub fn format_date_in<Tz>(iso: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let iso = match iso.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return MISSING_DATE.to_string(),
    };

    match parse_in(iso, tz) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        return tz.from_local_datetime(&naive).earliest();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M") {
        return tz.from_local_datetime(&naive).earliest();
    }
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(tz))
}

/// Escape text for interpolation into markup written with `set_inner_html`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
