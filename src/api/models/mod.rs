/// 接口请求与响应的数据结构
pub mod advisory;
pub mod auth;
pub mod certification;
pub mod marketplace;

pub use advisory::*;
pub use auth::*;
pub use certification::*;
pub use marketplace::*;

use crate::error::AppError;

/// 收集校验错误，非空时返回 `AppError::Validation`
pub(crate) fn validation_result(errors: Vec<String>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}
