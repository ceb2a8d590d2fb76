use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

/// 所有请求共用的默认请求头。
///
/// 克隆后指向同一份数据，会话层改动后所有客户端立即生效。
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    inner: Arc<RwLock<HeaderMap>>,
}

impl DefaultHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// 有令牌时设置 `Authorization: Bearer <token>`，否则移除
    pub fn set_auth_token(&self, token: Option<&str>) {
        let mut headers = self.inner.write();
        let value = token
            .filter(|t| !t.is_empty())
            .map(|t| HeaderValue::from_str(&format!("Bearer {}", t)));

        match value {
            Some(Ok(mut value)) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Some(Err(_)) => {
                tracing::warn!("Token contains characters not allowed in a header, dropping it");
                headers.remove(AUTHORIZATION);
            }
            None => {
                headers.remove(AUTHORIZATION);
            }
        }
    }

    pub fn insert(&self, name: HeaderName, value: HeaderValue) {
        self.inner.write().insert(name, value);
    }

    pub fn remove(&self, name: &HeaderName) {
        self.inner.write().remove(name);
    }

    pub fn get(&self, name: &HeaderName) -> Option<HeaderValue> {
        self.inner.read().get(name).cloned()
    }

    pub fn authorization(&self) -> Option<String> {
        self.get(&AUTHORIZATION)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    pub fn has_authorization(&self) -> bool {
        self.inner.read().contains_key(AUTHORIZATION)
    }

    /// 当前请求头的副本，用于构造单个请求
    pub fn snapshot(&self) -> HeaderMap {
        self.inner.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_set_and_cleared() {
        let headers = DefaultHeaders::new();
        headers.set_auth_token(Some("abc123"));
        assert_eq!(headers.authorization().as_deref(), Some("Bearer abc123"));

        headers.set_auth_token(None);
        assert!(!headers.has_authorization());
    }

    #[test]
    fn empty_token_clears_header() {
        let headers = DefaultHeaders::new();
        headers.set_auth_token(Some("abc123"));
        headers.set_auth_token(Some(""));
        assert!(!headers.has_authorization());
    }

    #[test]
    fn invalid_token_never_leaves_stale_header() {
        let headers = DefaultHeaders::new();
        headers.set_auth_token(Some("first"));
        headers.set_auth_token(Some("bad\ntoken"));
        assert!(!headers.has_authorization());
    }

    #[test]
    fn clones_share_state() {
        let headers = DefaultHeaders::new();
        let shared = headers.clone();
        headers.set_auth_token(Some("t"));
        assert!(shared.has_authorization());
        assert!(shared.snapshot().contains_key(AUTHORIZATION));
    }
}
