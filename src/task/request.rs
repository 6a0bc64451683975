//! Canonical task submission record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A provider-specific extension value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Int(i64),
    Float(f64),
    String(String),
}

impl MetadataValue {
    /// Coerce a raw form value: integer, then float, then plain string.
    pub fn coerce(raw: &str) -> Self {
        if let Ok(value) = raw.parse::<i64>() {
            return MetadataValue::Int(value);
        }
        if let Ok(value) = raw.parse::<f64>() {
            return MetadataValue::Float(value);
        }
        MetadataValue::String(raw.to_string())
    }

    /// Map a JSON value onto the closed scalar set.
    ///
    /// Non-scalar values (objects, arrays, booleans, null) keep their compact
    /// JSON text.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Number(number) => match number.as_i64() {
                Some(int) => MetadataValue::Int(int),
                None => MetadataValue::Float(number.as_f64().unwrap_or_default()),
            },
            Value::String(text) => MetadataValue::String(text),
            other => MetadataValue::String(other.to_string()),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Int(value) => write!(f, "{}", value),
            MetadataValue::Float(value) => write!(f, "{}", value),
            MetadataValue::String(value) => f.write_str(value),
        }
    }
}

/// Canonical record for an asynchronous generation job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskSubmitRequest {
    pub prompt: String,
    pub model: String,
    pub mode: String,
    /// Primary image reference.
    pub image: String,
    pub images: Vec<String>,
    pub size: String,
    /// Duration in seconds.
    pub duration: i64,
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl TaskSubmitRequest {
    /// Whether any image reference was supplied.
    pub fn has_image(&self) -> bool {
        !self.images.is_empty() || !self.image.trim().is_empty()
    }
}

/// Downstream action selected for a validated task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskAction {
    /// Image-conditioned generation.
    #[serde(rename = "generate")]
    Generate,
    /// Pure text-to-output generation.
    #[serde(rename = "textGenerate")]
    TextGenerate,
}

impl TaskAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            TaskAction::Generate => "generate",
            TaskAction::TextGenerate => "textGenerate",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `seconds` arrives as either a JSON string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum SecondsField {
    Int(i64),
    Text(String),
}

impl SecondsField {
    pub(crate) fn value(&self) -> i64 {
        match self {
            SecondsField::Int(value) => *value,
            SecondsField::Text(text) => text.parse().unwrap_or(0),
        }
    }
}

/// JSON wire shape of a task submission.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TaskSubmitBody {
    #[serde(deserialize_with = "nullable")]
    pub prompt: String,
    #[serde(deserialize_with = "nullable")]
    pub model: String,
    #[serde(deserialize_with = "nullable")]
    pub mode: String,
    #[serde(deserialize_with = "nullable")]
    pub image: String,
    #[serde(deserialize_with = "nullable")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub size: String,
    #[serde(deserialize_with = "nullable")]
    pub duration: i64,
    pub seconds: Option<SecondsField>,
    #[serde(deserialize_with = "nullable")]
    pub input_reference: String,
    #[serde(deserialize_with = "nullable")]
    pub metadata: BTreeMap<String, Value>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_order() {
        assert_eq!(MetadataValue::coerce("42"), MetadataValue::Int(42));
        assert_eq!(MetadataValue::coerce("-7"), MetadataValue::Int(-7));
        assert_eq!(MetadataValue::coerce("1.5"), MetadataValue::Float(1.5));
        assert_eq!(
            MetadataValue::coerce("16:9"),
            MetadataValue::String("16:9".to_string())
        );
        assert_eq!(MetadataValue::coerce(""), MetadataValue::String(String::new()));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(MetadataValue::from_json(json!(3)), MetadataValue::Int(3));
        assert_eq!(MetadataValue::from_json(json!(0.25)), MetadataValue::Float(0.25));
        assert_eq!(
            MetadataValue::from_json(json!("hd")),
            MetadataValue::String("hd".to_string())
        );
        assert_eq!(
            MetadataValue::from_json(json!(true)),
            MetadataValue::String("true".to_string())
        );
        assert_eq!(
            MetadataValue::from_json(json!({"a": [1, 2]})),
            MetadataValue::String("{\"a\":[1,2]}".to_string())
        );
    }

    #[test]
    fn test_metadata_serializes_untagged() {
        let mut request = TaskSubmitRequest::default();
        request
            .metadata
            .insert("fps".to_string(), MetadataValue::Int(24));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["metadata"]["fps"], json!(24));
    }

    #[test]
    fn test_has_image() {
        let mut request = TaskSubmitRequest::default();
        assert!(!request.has_image());
        request.image = "  ".to_string();
        assert!(!request.has_image());
        request.images = vec!["https://example.com/a.png".to_string()];
        assert!(request.has_image());
    }

    #[test]
    fn test_body_accepts_null_and_mixed_seconds() {
        let body: TaskSubmitBody =
            serde_json::from_str(r#"{"model":"sora-2","prompt":null,"seconds":"8"}"#).unwrap();
        assert_eq!(body.prompt, "");
        assert_eq!(body.seconds.map(|s| s.value()), Some(8));

        let body: TaskSubmitBody = serde_json::from_str(r#"{"seconds":12}"#).unwrap();
        assert_eq!(body.seconds.map(|s| s.value()), Some(12));

        let body: TaskSubmitBody = serde_json::from_str(r#"{"seconds":"abc"}"#).unwrap();
        assert_eq!(body.seconds.map(|s| s.value()), Some(0));
    }

    #[test]
    fn test_action_names() {
        assert_eq!(TaskAction::Generate.as_str(), "generate");
        assert_eq!(TaskAction::TextGenerate.to_string(), "textGenerate");
        assert_eq!(
            serde_json::to_string(&TaskAction::TextGenerate).unwrap(),
            "\"textGenerate\""
        );
    }
}
