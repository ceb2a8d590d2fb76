use thiserror::Error;

/// 客户端统一错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("未授权访问")]
    Unauthorized,
    #[error("权限不足")]
    Forbidden,
    #[error("资源不存在")]
    NotFound,
    #[error("参数校验失败: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("服务端返回错误 ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Vec<String>,
    },
    #[error("网络请求失败: {0}")]
    Http(#[from] reqwest::Error),
    #[error("响应解析失败: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("配置错误: {0}")]
    Config(String),
}

impl AppError {
    /// 把服务端的错误响应映射为错误类型
    pub fn from_status(status: u16, message: Option<String>, details: Vec<String>) -> Self {
        match status {
            401 => AppError::Unauthorized,
            403 => AppError::Forbidden,
            404 => AppError::NotFound,
            _ => AppError::Api {
                status,
                message: message.unwrap_or_else(|| format!("HTTP {}", status)),
                details,
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 本地存储错误，只在存储层内部传播，会话层记录后忽略
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("存储读写失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("Redis 操作失败: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("存储不可用: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_variants() {
        assert!(AppError::from_status(401, None, vec![]).is_unauthorized());
        assert!(matches!(
            AppError::from_status(403, Some("forbidden".into()), vec![]),
            AppError::Forbidden
        ));
        assert!(matches!(
            AppError::from_status(404, None, vec![]),
            AppError::NotFound
        ));

        match AppError::from_status(409, Some("Email already registered".into()), vec![]) {
            AppError::Api {
                status, message, ..
            } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Email already registered");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_message_falls_back_to_status() {
        let err = AppError::from_status(500, None, vec![]);
        assert!(err.to_string().contains("HTTP 500"));
    }
}
