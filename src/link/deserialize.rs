use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Optional payload strings: any non-string value reads as absent.
pub(super) fn from_any_to_option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Deserialize::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}
