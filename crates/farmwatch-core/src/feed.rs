//! Wire format of the telemetry provider's channel feed.
//!
//! The provider (ThingSpeak) returns feed entries whose `fieldN` values are
//! usually strings, occasionally bare numbers, and `null` when a field was
//! not written. Decoding is deliberately forgiving: a value that cannot be
//! read as a number becomes `0` and the field is recorded in
//! [`Reading::invalid_fields`].
//!
//! ```
//! use farmwatch_core::feed::FeedResponse;
//!
//! let body = r#"{"feeds":[{"field1":"25","field2":"22","field3":"50","field4":"1",
//!               "created_at":"2024-01-01T10:00:00Z"}]}"#;
//! let response: FeedResponse = serde_json::from_str(body).unwrap();
//! let reading = response.latest_reading().unwrap();
//! assert_eq!(reading.soil_moisture, 25.0);
//! assert_eq!(reading.pump_state, 1);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use farmwatch_types::{FeedField, Reading};

/// Channel metadata returned alongside the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelInfo {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub field1: Option<String>,
    #[serde(default)]
    pub field2: Option<String>,
    #[serde(default)]
    pub field3: Option<String>,
    #[serde(default)]
    pub field4: Option<String>,
    #[serde(default)]
    pub last_entry_id: Option<u64>,
}

/// Response document of `GET /channels/{id}/feeds.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub channel: Option<ChannelInfo>,
    #[serde(default)]
    pub feeds: Option<Vec<FeedEntry>>,
}

impl FeedResponse {
    /// First (most recent) entry, if the feed is present and non-empty.
    #[must_use]
    pub fn latest(&self) -> Option<&FeedEntry> {
        self.feeds.as_ref().and_then(|feeds| feeds.first())
    }

    /// Decode the most recent entry into a [`Reading`].
    #[must_use]
    pub fn latest_reading(&self) -> Option<Reading> {
        self.latest().map(FeedEntry::to_reading)
    }
}

/// One timestamped record on a channel.
///
/// Only the four fields this dashboard uses are kept; `field5`..`field8`
/// are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedEntry {
    #[serde(default)]
    pub entry_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub field1: Value,
    #[serde(default)]
    pub field2: Value,
    #[serde(default)]
    pub field3: Value,
    #[serde(default)]
    pub field4: Value,
}

impl FeedEntry {
    /// Convert to a [`Reading`], coercing unreadable values to zero.
    #[must_use]
    pub fn to_reading(&self) -> Reading {
        let mut invalid_fields = Vec::new();

        let mut float_field = |value: &Value, field: FeedField| {
            parse_float_lenient(value).unwrap_or_else(|| {
                invalid_fields.push(field);
                0.0
            })
        };
        let soil_moisture = float_field(&self.field1, FeedField::SoilMoisture);
        let temperature = float_field(&self.field2, FeedField::Temperature);
        let humidity = float_field(&self.field3, FeedField::Humidity);

        let pump_state = parse_int_lenient(&self.field4).unwrap_or_else(|| {
            invalid_fields.push(FeedField::Pump);
            0
        });

        let last_updated = self.created_at.as_deref().and_then(parse_timestamp);
        if last_updated.is_none() {
            invalid_fields.push(FeedField::CreatedAt);
        }

        Reading {
            soil_moisture,
            temperature,
            humidity,
            pump_state,
            last_updated,
            invalid_fields,
        }
    }
}

/// Parse an RFC 3339 creation timestamp.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(s.trim(), &Rfc3339).ok()
}

/// Read a floating point value from a JSON field.
///
/// Strings are parsed by their longest numeric prefix after leading
/// whitespace, so `"25.5 %"` yields `25.5`. Returns `None` for `null`,
/// booleans, non-numeric text, and non-finite results.
#[must_use]
pub fn parse_float_lenient(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Read an integer value from a JSON field.
///
/// Strings are parsed by their longest integer prefix, so `"1.0"` yields `1`.
/// JSON numbers with a fractional part are truncated toward zero.
#[must_use]
pub fn parse_int_lenient(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
                .map(|v| v.trunc() as i64)
        }),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if frac_digits > 0 || int_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse::<i64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(field1: Value, field4: Value) -> FeedEntry {
        FeedEntry {
            entry_id: Some(1),
            created_at: Some("2024-01-01T10:00:00Z".to_string()),
            field1,
            field2: json!("22"),
            field3: json!("50"),
            field4,
        }
    }

    #[test]
    fn test_parse_float_plain_strings() {
        assert_eq!(parse_float_lenient(&json!("25")), Some(25.0));
        assert_eq!(parse_float_lenient(&json!("22.75")), Some(22.75));
        assert_eq!(parse_float_lenient(&json!("-3.5")), Some(-3.5));
        assert_eq!(parse_float_lenient(&json!(".5")), Some(0.5));
        assert_eq!(parse_float_lenient(&json!("5.")), Some(5.0));
        assert_eq!(parse_float_lenient(&json!("1e2")), Some(100.0));
    }

    #[test]
    fn test_parse_float_prefix_and_whitespace() {
        assert_eq!(parse_float_lenient(&json!("  42.5")), Some(42.5));
        assert_eq!(parse_float_lenient(&json!("25.5%")), Some(25.5));
        assert_eq!(parse_float_lenient(&json!("12abc")), Some(12.0));
        assert_eq!(parse_float_lenient(&json!("3e")), Some(3.0));
        assert_eq!(parse_float_lenient(&json!("7e+")), Some(7.0));
    }

    #[test]
    fn test_parse_float_rejects_non_numeric() {
        assert_eq!(parse_float_lenient(&json!("not-a-number")), None);
        assert_eq!(parse_float_lenient(&json!("")), None);
        assert_eq!(parse_float_lenient(&json!(".")), None);
        assert_eq!(parse_float_lenient(&json!("-")), None);
        assert_eq!(parse_float_lenient(&json!(null)), None);
        assert_eq!(parse_float_lenient(&json!(true)), None);
        assert_eq!(parse_float_lenient(&json!("1e999")), None);
    }

    #[test]
    fn test_parse_float_json_numbers() {
        assert_eq!(parse_float_lenient(&json!(31)), Some(31.0));
        assert_eq!(parse_float_lenient(&json!(31.5)), Some(31.5));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int_lenient(&json!("1")), Some(1));
        assert_eq!(parse_int_lenient(&json!("0")), Some(0));
        assert_eq!(parse_int_lenient(&json!("1.0")), Some(1));
        assert_eq!(parse_int_lenient(&json!(" 1 ")), Some(1));
        assert_eq!(parse_int_lenient(&json!("-2")), Some(-2));
        assert_eq!(parse_int_lenient(&json!(1)), Some(1));
        assert_eq!(parse_int_lenient(&json!(1.9)), Some(1));
        assert_eq!(parse_int_lenient(&json!("on")), None);
        assert_eq!(parse_int_lenient(&json!(null)), None);
    }

    #[test]
    fn test_entry_to_reading() {
        let reading = entry(json!("25"), json!("1")).to_reading();
        assert_eq!(reading.soil_moisture, 25.0);
        assert_eq!(reading.temperature, 22.0);
        assert_eq!(reading.humidity, 50.0);
        assert_eq!(reading.pump_state, 1);
        assert_eq!(
            reading.last_updated,
            Some(time::macros::datetime!(2024-01-01 10:00:00 UTC))
        );
        assert!(reading.invalid_fields.is_empty());
    }

    #[test]
    fn test_entry_with_unparsable_soil_is_zero() {
        let reading = entry(json!("not-a-number"), json!("0")).to_reading();
        assert_eq!(reading.soil_moisture, 0.0);
        assert_eq!(reading.invalid_fields, vec![FeedField::SoilMoisture]);
    }

    #[test]
    fn test_entry_with_missing_fields() {
        let entry: FeedEntry = serde_json::from_value(json!({
            "created_at": "2024-01-01T10:00:00Z",
            "field2": "20"
        }))
        .unwrap();
        let reading = entry.to_reading();
        assert_eq!(reading.soil_moisture, 0.0);
        assert_eq!(reading.temperature, 20.0);
        assert_eq!(reading.humidity, 0.0);
        assert_eq!(reading.pump_state, 0);
        assert_eq!(
            reading.invalid_fields,
            vec![FeedField::SoilMoisture, FeedField::Humidity, FeedField::Pump]
        );
    }

    #[test]
    fn test_entry_with_bad_timestamp() {
        let mut e = entry(json!("40"), json!("0"));
        e.created_at = Some("yesterday".to_string());
        let reading = e.to_reading();
        assert!(reading.last_updated.is_none());
        assert_eq!(reading.invalid_fields, vec![FeedField::CreatedAt]);
    }

    #[test]
    fn test_timestamp_with_offset() {
        let ts = parse_timestamp("2024-06-01T08:30:00+05:30").unwrap();
        assert_eq!(ts.unix_timestamp(), 1_717_210_800);
    }

    #[test]
    fn test_response_latest() {
        let empty: FeedResponse = serde_json::from_str(r#"{"feeds":[]}"#).unwrap();
        assert!(empty.latest().is_none());

        let missing: FeedResponse = serde_json::from_str(r#"{"channel":{"id":3}}"#).unwrap();
        assert!(missing.latest().is_none());
        assert_eq!(missing.channel.and_then(|c| c.id), Some(3));

        let two: FeedResponse = serde_json::from_value(json!({
            "feeds": [
                {"field1": "10", "created_at": "2024-01-01T10:00:00Z"},
                {"field1": "90", "created_at": "2024-01-01T09:00:00Z"}
            ]
        }))
        .unwrap();
        assert_eq!(two.latest_reading().unwrap().soil_moisture, 10.0);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let response: FeedResponse = serde_json::from_value(json!({
            "channel": {"id": 3066267, "name": "Farm", "field1": "Soil", "created_at": "x"},
            "feeds": [{"entry_id": 9, "field1": "33", "field5": "junk",
                       "created_at": "2024-01-01T10:00:00Z"}]
        }))
        .unwrap();
        let entry = response.latest().unwrap();
        assert_eq!(entry.entry_id, Some(9));
        assert_eq!(entry.to_reading().soil_moisture, 33.0);
    }
}
