use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::headers::DefaultHeaders;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::result::ApiErrorBody;

/// 访问后端的 HTTP 客户端。
///
/// 每个请求都会带上 [`DefaultHeaders`] 当前的内容。
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    headers: DefaultHeaders,
}

impl ApiClient {
    pub fn new(base_url: &str, headers: DefaultHeaders) -> AppResult<Self> {
        Self::with_config(
            &Config {
                api_base: base_url.to_string(),
                ..Config::default()
            },
            headers,
        )
    }

    pub fn with_config(config: &Config, headers: DefaultHeaders) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &DefaultHeaders {
        &self.headers
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .headers(self.headers.snapshot())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send(self.request(Method::POST, path)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let bytes = response.bytes().await?;

        if status.is_success() {
            tracing::debug!("{} -> {}", url, status);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let body = ApiErrorBody::parse(&bytes);
        if status.is_server_error() {
            tracing::error!(
                "Server error occurred - Path: {}, Status: {}, Body: {}",
                url,
                status,
                String::from_utf8_lossy(&bytes)
            );
        } else {
            tracing::warn!("{} -> {} ({:?})", url, status, body.error);
        }
        Err(AppError::from_status(status.as_u16(), body.error, body.details))
    }
}
