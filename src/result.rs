use serde::{Deserialize, Serialize};

/// 服务端失败时的响应体，例如 `{"error": "Validation failed", "details": [...]}`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "details_list")]
    pub details: Vec<String>,
}

/// 仅返回 `{"success": true}` 的操作
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

// details 可能是字符串数组，也可能是单个字符串
fn details_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Some(serde_json::Value::String(s)) => vec![s],
        Some(serde_json::Value::Null) | None => Vec::new(),
        Some(other) => vec![other.to_string()],
    })
}

impl ApiErrorBody {
    /// 解析失败时返回空结构，由调用方退回到状态码
    pub fn parse(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_validation_details() {
        let body = ApiErrorBody::parse(
            br#"{"error":"Validation failed","details":["name is required","email is required"]}"#,
        );
        assert_eq!(body.error.as_deref(), Some("Validation failed"));
        assert_eq!(body.details.len(), 2);
    }

    #[test]
    fn string_details_become_single_entry() {
        let body = ApiErrorBody::parse(br#"{"error":"verification_failed","details":"boom"}"#);
        assert_eq!(body.details, vec!["boom".to_string()]);
    }

    #[test]
    fn non_json_body_is_empty() {
        let body = ApiErrorBody::parse(b"<html>Internal Server Error</html>");
        assert!(body.error.is_none());
        assert!(body.details.is_empty());
    }
}
