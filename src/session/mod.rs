/// 会话模块
/// 保存当前令牌和用户资料，负责持久化与请求头同步
pub mod keys;
pub mod models;
pub mod store;

pub use keys::STORAGE_KEY;
pub use models::{Role, Session, UserId, UserProfile};
pub use store::SessionStore;
