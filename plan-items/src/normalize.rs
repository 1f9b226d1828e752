//! Normalization of free-text form input into the values the backend expects.

use thiserror::Error;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

pub const DEFAULT_CURRENCY: &str = "EUR";

#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid number: {0:?}")]
pub struct InvalidNumber(pub String);

/// Parse a cost or amount. Comma is accepted as decimal separator.
/// Empty input is valid and absent; negative or non-finite values are rejected.
pub fn parse_amount(raw: &str) -> Result<Option<f64>, InvalidNumber> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| InvalidNumber(raw.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(InvalidNumber(raw.to_string()));
    }
    Ok(Some(value))
}

/// Parse an optional non-negative whole number (guests, rooms).
pub fn parse_count(raw: &str) -> Result<Option<u32>, InvalidNumber> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| InvalidNumber(raw.to_string()))
}

pub fn normalize_currency(raw: &str) -> String {
    let code = raw.trim().to_ascii_uppercase();
    if code.is_empty() {
        DEFAULT_CURRENCY.to_string()
    } else {
        code
    }
}

/// Blank (defaults to EUR) or exactly three ASCII letters.
pub fn is_currency_code(raw: &str) -> bool {
    let code = raw.trim();
    code.is_empty() || (code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()))
}

/// "ib 1234" -> "IB1234"
pub fn normalize_flight_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Trimmed text, or `None` when nothing was typed.
pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `YYYY-MM-DD`
pub fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

/// UTC midnight of `date`, as the canonical day key: `YYYY-MM-DDT00:00:00.000Z`.
pub fn day_key(date: Date) -> String {
    format!("{}T00:00:00.000Z", iso_date(date))
}

/// Instant in UTC with millisecond precision: `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn iso_instant(dt: OffsetDateTime) -> String {
    let utc = dt.to_offset(UtcOffset::UTC);
    format!(
        "{}T{:02}:{:02}:{:02}.{:03}Z",
        iso_date(utc.date()),
        utc.hour(),
        utc.minute(),
        utc.second(),
        utc.millisecond()
    )
}

/// Parse `YYYY-MM-DD HH:MM` (a `T` separator is also accepted) as a wall-clock
/// time at `offset`.
pub fn parse_local_datetime(raw: &str, offset: UtcOffset) -> Option<OffsetDateTime> {
    let normalized = raw.trim().replacen('T', " ", 1);
    PrimitiveDateTime::parse(&normalized, format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .ok()
        .map(|dt| dt.assume_offset(offset))
}

pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Inverse of [`parse_local_datetime`] in the instant's own offset.
pub fn format_local_datetime(dt: OffsetDateTime) -> String {
    format!("{} {:02}:{:02}", iso_date(dt.date()), dt.hour(), dt.minute())
}

/// Serde adapter for instants in the millisecond ISO format.
pub mod iso_millis {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(dt: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::iso_instant(*dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&raw, &Rfc3339).map_err(de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            dt: &Option<OffsetDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => serializer.serialize_some(&super::super::iso_instant(*dt)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<OffsetDateTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|raw| OffsetDateTime::parse(&raw, &Rfc3339).map_err(de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, offset};

    #[test]
    fn amount_accepts_comma_decimal() {
        assert_eq!(parse_amount("12,50"), Ok(Some(12.5)));
        assert_eq!(parse_amount(" 20 "), Ok(Some(20.0)));
        assert_eq!(parse_amount(""), Ok(None));
        assert_eq!(parse_amount("   "), Ok(None));
    }

    #[test]
    fn amount_rejects_negative_and_garbage() {
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn count_is_whole_and_non_negative() {
        assert_eq!(parse_count("0"), Ok(Some(0)));
        assert_eq!(parse_count("3"), Ok(Some(3)));
        assert_eq!(parse_count(""), Ok(None));
        assert!(parse_count("2.5").is_err());
        assert!(parse_count("-1").is_err());
    }

    #[test]
    fn currency_defaults_and_uppercases() {
        assert_eq!(normalize_currency(""), "EUR");
        assert_eq!(normalize_currency(" usd "), "USD");
    }

    #[test]
    fn currency_code_is_three_letters() {
        assert!(is_currency_code(""));
        assert!(is_currency_code(" gbp "));
        assert!(!is_currency_code("euro"));
        assert!(!is_currency_code("€"));
        assert!(!is_currency_code("E1R"));
    }

    #[test]
    fn flight_number_is_compacted() {
        assert_eq!(normalize_flight_number(" ib 1234 "), "IB1234");
    }

    #[test]
    fn day_key_is_utc_midnight() {
        assert_eq!(day_key(date!(2025 - 08 - 01)), "2025-08-01T00:00:00.000Z");
        assert_eq!(iso_date(date!(2025 - 07 - 01)), "2025-07-01");
    }

    #[test]
    fn instant_is_converted_to_utc() {
        let dt = datetime!(2025-06-10 14:00 +02:00);
        assert_eq!(iso_instant(dt), "2025-06-10T12:00:00.000Z");
    }

    #[test]
    fn local_datetime_parses_both_separators() {
        let expected = datetime!(2025-06-10 14:00 +02:00);
        assert_eq!(
            parse_local_datetime("2025-06-10 14:00", offset!(+2)),
            Some(expected)
        );
        assert_eq!(
            parse_local_datetime("2025-06-10T14:00", offset!(+2)),
            Some(expected)
        );
        assert_eq!(parse_local_datetime("2025-06-10", offset!(+2)), None);
        assert_eq!(format_local_datetime(expected), "2025-06-10 14:00");
    }

    #[test]
    fn date_parses_iso() {
        assert_eq!(parse_date("2025-07-01"), Some(date!(2025 - 07 - 01)));
        assert_eq!(parse_date("2025-13-01"), None);
    }
}
