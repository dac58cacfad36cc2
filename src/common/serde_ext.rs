// src/common/serde_ext.rs
//
// A API remota mistura "2024-06-01" e "2024-06-01T05:00:00.000Z" nos campos de data,
// e ids numéricos com ids em texto. Estes helpers normalizam na entrada.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Aceita data pura ou timestamp ISO e fica só com a parte da data.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub mod flexible_date {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_flexible_date(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("data inválida: {}", s))),
        }
    }
}

pub mod string_id {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!("id inválido: {}", other))),
        }
    }
}

pub mod optional_string_id {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(serde::de::Error::custom(format!("id inválido: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "flexible_date::deserialize")]
        date: Option<NaiveDate>,
        #[serde(deserialize_with = "string_id::deserialize")]
        id: String,
    }

    #[test]
    fn timestamps_and_numeric_ids_are_normalized() {
        let p: Probe = serde_json::from_str(r#"{"date":"2024-06-01T05:00:00.000Z","id":42}"#).unwrap();
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(p.id, "42");
    }

    #[test]
    fn missing_or_empty_date_is_none() {
        let p: Probe = serde_json::from_str(r#"{"id":"a1"}"#).unwrap();
        assert_eq!(p.date, None);
        let p: Probe = serde_json::from_str(r#"{"date":"","id":"a1"}"#).unwrap();
        assert_eq!(p.date, None);
    }
}
