use crate::error::{AppError, AppResult};
use crate::session::{Session, SessionStore};

/// 受保护操作的前置检查：必须持有令牌
pub fn require_auth(store: &SessionStore) -> AppResult<Session> {
    let session = store.snapshot();
    if !session.is_authenticated() {
        return Err(AppError::Unauthorized);
    }
    Ok(session)
}

/// 超级用户操作：先要求登录，再检查角色
pub fn require_superuser(store: &SessionStore) -> AppResult<Session> {
    let session = require_auth(store)?;
    if !session.is_superuser() {
        return Err(AppError::Forbidden);
    }
    Ok(session)
}
