use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Тело ошибки, которое бэкенд возвращает вместе с не-2xx статусом.
///
/// Every field is optional: a JSON error body without `detail` is still a
/// structured error, just one without a message to show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Parses an error body; `None` means the body was not a JSON object.
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(text).ok()? {
            object @ Value::Object(_) => serde_json::from_value(object).ok(),
            _ => None,
        }
    }

    /// The `detail` field as display text.
    ///
    /// Validation errors carry a list instead of a string; those are shown
    /// as compact JSON.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detail() {
        let body = ErrorBody::parse(r#"{"detail":"No text could be extracted from the file"}"#);
        assert_eq!(
            body.and_then(|b| b.detail_text()).as_deref(),
            Some("No text could be extracted from the file")
        );
    }

    #[test]
    fn test_parse_json_without_detail() {
        let body = ErrorBody::parse("{}").unwrap();
        assert_eq!(body.detail_text(), None);
    }

    #[test]
    fn test_structured_detail_is_rendered_as_json() {
        let body = ErrorBody::parse(r#"{"detail":[{"msg":"field required"}]}"#).unwrap();
        assert_eq!(body.detail_text().as_deref(), Some(r#"[{"msg":"field required"}]"#));
    }

    #[test]
    fn test_parse_non_json() {
        assert_eq!(ErrorBody::parse("<html>Bad Gateway</html>"), None);
        assert_eq!(ErrorBody::parse(""), None);
    }

    #[test]
    fn test_parse_rejects_non_object_json() {
        assert_eq!(ErrorBody::parse(r#"["oops"]"#), None);
        assert_eq!(ErrorBody::parse(r#""oops""#), None);
        assert_eq!(ErrorBody::parse("null"), None);
    }
}
