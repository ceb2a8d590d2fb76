use std::time::Duration;

use redis::{Client as RedisClient, Commands};

use super::SessionStorage;
use crate::error::StorageError;
use crate::session::keys::redis_session_key;

/// Redis 存储，适合多个终端共享同一份会话
///
/// 连接、读写都有超时，Redis 不可达时很快返回错误而不是卡住调用方。
pub struct RedisStorage {
    client: RedisClient,
    timeout: Duration,
}

impl RedisStorage {
    pub fn open(redis_url: &str, timeout: Duration) -> Result<Self, StorageError> {
        let client = RedisClient::open(redis_url)?;
        Ok(Self::new(client, timeout))
    }

    pub fn new(client: RedisClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn connection(&self) -> Result<redis::Connection, StorageError> {
        let conn = self.client.get_connection_with_timeout(self.timeout)?;
        conn.set_read_timeout(Some(self.timeout))?;
        conn.set_write_timeout(Some(self.timeout))?;
        Ok(conn)
    }
}

impl SessionStorage for RedisStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.connection()?;
        let value: Option<String> = conn.get(redis_session_key(key))?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let _: () = conn.set(redis_session_key(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let _: () = conn.del(redis_session_key(key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn invalid_url_is_rejected() {
        assert!(RedisStorage::open("not a redis url", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn unreachable_server_surfaces_storage_error() {
        // 端口 1 上不会有 Redis
        let storage = RedisStorage::open("redis://127.0.0.1:1/", Duration::from_secs(1)).unwrap();
        assert!(storage.get("agroguru_auth").is_err());
        assert!(storage.set("agroguru_auth", "{}").is_err());
    }

    #[test]
    fn unroutable_host_fails_within_timeout() {
        let storage =
            RedisStorage::open("redis://10.255.255.1/", Duration::from_millis(200)).unwrap();
        let started = Instant::now();
        assert!(storage.get("agroguru_auth").is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
