use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use semopx_types::SemopxError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Resolve an IANA timezone name.
///
/// # Errors
/// Returns `InvalidConfig` if the name is not a known timezone.
pub fn parse_timezone(name: &str) -> Result<Tz, SemopxError> {
    name.parse::<Tz>()
        .map_err(|_| SemopxError::InvalidConfig(format!("invalid timezone: {name}")))
}

/// Parse a result timestamp into Unix seconds and a datetime in `tz`.
///
/// Accepts RFC 3339 strings; strings without an offset are taken as UTC.
///
/// # Errors
/// Returns `Data` if the string matches none of the accepted formats.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Result<(i64, DateTime<Tz>), SemopxError> {
    let utc = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        dt.with_timezone(&Utc)
    } else {
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| SemopxError::Data(format!("unparseable timestamp: {raw:?}")))?
    };
    Ok((utc.timestamp(), utc.with_timezone(&tz)))
}

/// Render a local datetime the way records carry it (`YYYY/MM/DD HH:MM:SS`).
#[must_use]
pub fn format_local(dt: &DateTime<Tz>) -> String {
    dt.format("%Y/%m/%d %H:%M:%S").to_string()
}
