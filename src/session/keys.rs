/// 持久化会话使用的固定键
pub const STORAGE_KEY: &str = "agroguru_auth";

/// Redis 会话键前缀
const REDIS_SESSION_PREFIX: &str = "agroguru:session:";

/// 生成 Redis 中的会话键
pub fn redis_session_key(key: &str) -> String {
    format!("{}{}", REDIS_SESSION_PREFIX, key)
}
