/// 会话持久化存储
/// 提供键值形式的本地存储抽象及其后端实现
pub mod file;
pub mod memory;
pub mod redis;

use crate::error::StorageError;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use self::redis::RedisStorage;

/// 键值字符串存储。
///
/// 读、写、删各自独立失败，调用方决定是否忽略错误。
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 删除不存在的键不算错误
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
