//! Lenient field deserializers for session records.
//!
//! Each function accepts any JSON value and maps unexpected shapes to an empty
//! result instead of an error, so one odd field never drops its record.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{ContentBlock, MessageContent, RecordKind, RecordMessage};

const RECORD_TYPE_USER: &str = "user";
const RECORD_TYPE_ASSISTANT: &str = "assistant";

/// Accepts RFC 3339 strings as-is and Unix millisecond integers, which are
/// normalized to RFC 3339 (UTC)
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
        _ => None,
    })
}

pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub fn deserialize_record_kind<'de, D>(deserializer: D) -> Result<RecordKind, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value.as_str() {
        Some(RECORD_TYPE_USER) => RecordKind::UserTurn,
        Some(RECORD_TYPE_ASSISTANT) => RecordKind::AssistantTurn,
        _ => RecordKind::Other,
    })
}

pub fn deserialize_message<'de, D>(deserializer: D) -> Result<Option<RecordMessage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

pub fn deserialize_content<'de, D>(deserializer: D) -> Result<MessageContent, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(content_from_value(value))
}

/// Resolve a raw content value into [`MessageContent`] by its JSON shape
pub fn content_from_value(value: Value) -> MessageContent {
    match value {
        Value::String(s) => MessageContent::PlainText(s),
        Value::Array(items) => MessageContent::Blocks(
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|block| ContentBlock {
                    kind: block.get("type").and_then(Value::as_str).unwrap_or_default().to_string(),
                    text: block.get("text").and_then(Value::as_str).map(str::to_string),
                })
                .collect(),
        ),
        _ => MessageContent::Empty,
    }
}
