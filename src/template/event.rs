//! Calendar events (`BEGIN:VEVENT`)

use crate::fields::{Field, FieldSource};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DEFAULT_SUMMARY: &str = "Event";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// VEVENT block with `\n` line endings and no trailing newline.
///
/// The timezone input is read but not applied: timestamps are always emitted
/// from their UTC components with a `Z` suffix.
pub fn event(fields: &dyn FieldSource) -> String {
    let summary = fields
        .present(Field::EventTitle)
        .unwrap_or_else(|| DEFAULT_SUMMARY.to_string());
    let timezone = fields.present(Field::EventTimezone);

    let mut block = format!("BEGIN:VEVENT\nSUMMARY:{summary}\n");

    for (field, tag) in [(Field::EventStart, "DTSTART"), (Field::EventEnd, "DTEND")] {
        let Some(raw) = fields.present(field) else {
            continue;
        };
        match parse_timestamp(&raw) {
            Some(instant) => {
                block.push_str(&format!(
                    "{tag}:{}\n",
                    format_timestamp(&instant, timezone.as_deref())
                ));
            }
            None => {
                tracing::warn!(field = %field, value = %raw, "Unparseable event timestamp, omitting {tag}");
            }
        }
    }

    if let Some(location) = fields.present(Field::EventLocation) {
        block.push_str(&format!("LOCATION:{location}\n"));
    }
    if let Some(description) = fields.present(Field::EventDescription) {
        block.push_str(&format!("DESCRIPTION:{description}\n"));
    }

    block.push_str("END:VEVENT");
    block
}

/// Parse a form timestamp into a UTC instant.
///
/// RFC 3339 values with an offset are converted to UTC. Values without an
/// offset (`2024-01-02T03:04`, `2024-01-02 03:04:05`) and bare dates are read
/// as UTC components.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Compact iCalendar UTC form, `YYYYMMDDTHHMMSSZ`.
///
/// `_timezone` is accepted for callers that carry one; it does not shift the
/// output.
pub fn format_timestamp(instant: &DateTime<Utc>, _timezone: Option<&str>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}
