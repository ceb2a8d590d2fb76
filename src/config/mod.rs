use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// 会话持久化后端
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    File,
    Memory,
    Redis,
}

impl SessionBackend {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "file" => Ok(SessionBackend::File),
            "memory" => Ok(SessionBackend::Memory),
            "redis" => Ok(SessionBackend::Redis),
            other => Err(AppError::Config(format!(
                "unknown session backend `{}`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub session_backend: SessionBackend,
    pub session_dir: PathBuf,
    pub redis_url: Option<String>,
    pub http_timeout_secs: u64,
    pub admin_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            session_backend: SessionBackend::File,
            session_dir: default_session_dir(),
            redis_url: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            admin_secret: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let session_backend = match env::var("AGROGURU_SESSION_BACKEND") {
            Ok(raw) => SessionBackend::parse(&raw)?,
            Err(_) => SessionBackend::File,
        };
        let redis_url = non_empty_var("REDIS_URL");
        if session_backend == SessionBackend::Redis && redis_url.is_none() {
            return Err(AppError::Config(
                "REDIS_URL is required for the redis session backend".into(),
            ));
        }

        Ok(Config {
            api_base: non_empty_var("AGROGURU_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            session_backend,
            session_dir: non_empty_var("AGROGURU_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_session_dir),
            redis_url,
            http_timeout_secs: env::var("AGROGURU_HTTP_TIMEOUT")
                .ok()
                .and_then(|v| v.trim_end_matches('s').parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            admin_secret: non_empty_var("AGROGURU_ADMIN_SECRET"),
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// 默认放在用户主目录下，取不到主目录时退回当前目录
fn default_session_dir() -> PathBuf {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".agroguru")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_are_case_insensitive() {
        assert_eq!(SessionBackend::parse("Redis").unwrap(), SessionBackend::Redis);
        assert_eq!(SessionBackend::parse("memory").unwrap(), SessionBackend::Memory);
        assert_eq!(SessionBackend::parse("").unwrap(), SessionBackend::File);
        assert!(SessionBackend::parse("sqlite").is_err());
    }

    #[test]
    fn default_points_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
        assert!(config.session_dir.ends_with(".agroguru"));
    }
}
