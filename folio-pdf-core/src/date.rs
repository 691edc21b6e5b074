//! PDF date strings (`D:YYYYMMDDHHmmSSOHH'mm`).

use crate::error::{PdfError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

/// Formats a UTC date, always with the `+00'00` offset.
pub fn format_pdf_date(date: DateTime<Utc>) -> String {
    let formatted = date.format("D:%Y%m%d%H%M%S");
    format!("{formatted}+00'00")
}

/// Parses a PDF date string into UTC.
///
/// Everything after the year is optional, as is the `D:` prefix. A missing
/// offset or `Z` means UTC.
pub fn parse_pdf_date(text: &str) -> Result<DateTime<Utc>> {
    let invalid = |reason: &str| PdfError::InvalidValue {
        key: "M".to_string(),
        reason: format!("{reason} in date {text:?}"),
    };

    let body = text.strip_prefix("D:").unwrap_or(text);
    let digits_end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (digits, offset) = body.split_at(digits_end);
    if digits.len() < 4 || digits.len() % 2 != 0 || digits.len() > 14 {
        return Err(invalid("bad digit count"));
    }

    let field = |start: usize, len: usize, default: u32| -> u32 {
        digits
            .get(start..start + len)
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    };
    let year = field(0, 4, 0) as i32;
    let naive = NaiveDate::from_ymd_opt(year, field(4, 2, 1), field(6, 2, 1))
        .and_then(|d| d.and_hms_opt(field(8, 2, 0), field(10, 2, 0), field(12, 2, 0)))
        .ok_or_else(|| invalid("out of range field"))?;

    let offset_seconds = parse_offset(offset).ok_or_else(|| invalid("bad offset"))?;
    let zone = FixedOffset::east_opt(offset_seconds).ok_or_else(|| invalid("bad offset"))?;
    zone.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| invalid("ambiguous local time"))
}

/// `Z`, `+HH'mm'`, `-HH'mm`, `+HH` or nothing, as seconds east of UTC.
fn parse_offset(offset: &str) -> Option<i32> {
    let (sign, rest) = match offset.chars().next() {
        None => return Some(0),
        Some('Z') => return Some(0),
        Some('+') => (1, &offset[1..]),
        Some('-') => (-1, &offset[1..]),
        Some(_) => return None,
    };
    let mut parts = rest.split('\'').filter(|p| !p.is_empty());
    let hours: i32 = parts.next()?.parse().ok()?;
    let minutes: i32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}
