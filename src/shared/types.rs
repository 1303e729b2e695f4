use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deserialize an optional query/form value, treating blank input as absent.
///
/// Browser filter selects submit `status=` when "All" is chosen.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => T::from_str(value).map(Some).map_err(de::Error::custom),
    }
}

/// Error body returned by the backend on non-2xx responses.
///
/// Either a single `message`, an `errors` array from request validation, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<serde_json::Value>>,
}

impl ErrorBody {
    /// Validation entries flattened to display strings (`msg`, then `message`, then raw JSON)
    pub fn validation_messages(&self) -> Option<Vec<String>> {
        let errors = self.errors.as_ref()?;
        Some(errors.iter().map(flatten_error_entry).collect())
    }
}

fn flatten_error_entry(entry: &serde_json::Value) -> String {
    entry
        .get("msg")
        .and_then(|v| v.as_str())
        .or_else(|| entry.get("message").and_then(|v| v.as_str()))
        .map(String::from)
        .or_else(|| entry.as_str().map(String::from))
        .unwrap_or_else(|| entry.to_string())
}

/// Pagination envelope fields shared by every paged listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total: u64,
}

fn default_page() -> u32 {
    1
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_flatten_each_shape() {
        let body: ErrorBody = serde_json::from_value(serde_json::json!({
            "errors": [
                { "msg": "Title is required", "param": "title" },
                { "message": "Email is invalid" },
                { "code": 42 }
            ]
        }))
        .unwrap();

        assert_eq!(
            body.validation_messages().unwrap(),
            vec![
                "Title is required".to_string(),
                "Email is invalid".to_string(),
                "{\"code\":42}".to_string(),
            ]
        );
    }

    #[test]
    fn test_message_only_body() {
        let body: ErrorBody =
            serde_json::from_value(serde_json::json!({ "message": "Report not found" })).unwrap();
        assert_eq!(body.message.as_deref(), Some("Report not found"));
        assert!(body.validation_messages().is_none());
    }
}
