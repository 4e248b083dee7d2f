use chrono::{DateTime, SecondsFormat};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Lenient timestamp deserializer
///
/// RFC3339 strings pass through untouched, integer millisecond timestamps are
/// rendered as RFC3339, null becomes `None`.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => {
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            DateTime::from_timestamp_millis(ms)
                .map(|dt| Some(dt.to_rfc3339_opts(SecondsFormat::Millis, true)))
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

/// String field that tolerates a value of the wrong type
///
/// Anything other than a string decodes as `None` instead of failing the whole
/// record.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Boolean field that tolerates a value of the wrong type, like
/// [`deserialize_lenient_string`]
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// Records that a key was present, whatever its value (including null)
pub fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
