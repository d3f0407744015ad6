use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Renders a backend RFC 3339 timestamp as `YYYY-MM-DD HH:MM` (UTC). Values
/// that do not parse are returned unchanged.
pub fn display_timestamp(value: &str) -> String {
    let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) else {
        return value.to_string();
    };

    let utc = parsed.to_offset(time::UtcOffset::UTC);
    utc.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| value.to_string())
}
