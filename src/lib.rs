use std::sync::Arc;

use config::{Config, SessionBackend};
use error::AppError;
use storage::{FileStorage, MemoryStorage, RedisStorage, SessionStorage};

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod result;
pub mod session;
pub mod storage;
pub mod utils;

pub use api::{ApiClient, DefaultHeaders};
pub use auth::AuthService;
pub use session::SessionStore;

/// 应用上下文：共享请求头、会话、HTTP 客户端
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub api: ApiClient,
    pub auth: AuthService,
}

impl AppContext {
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let storage = open_storage(&config)?;
        Self::with_storage(config, storage)
    }

    /// 会话和客户端必须共用同一份请求头
    pub fn with_storage(
        config: Config,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self, AppError> {
        let headers = DefaultHeaders::new();
        let session = Arc::new(SessionStore::initialize(storage, headers.clone()));
        let api = ApiClient::with_config(&config, headers)?;
        let auth = AuthService::new(api.clone(), session.clone());
        Ok(Self {
            config,
            session,
            api,
            auth,
        })
    }
}

fn open_storage(config: &Config) -> Result<Arc<dyn SessionStorage>, AppError> {
    let storage: Arc<dyn SessionStorage> = match config.session_backend {
        SessionBackend::File => Arc::new(FileStorage::new(&config.session_dir)),
        SessionBackend::Memory => Arc::new(MemoryStorage::new()),
        SessionBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| AppError::Config("REDIS_URL is not set".into()))?;
            let storage = RedisStorage::open(url, config.http_timeout())
                .map_err(|e| AppError::Config(format!("invalid REDIS_URL: {}", e)))?;
            Arc::new(storage)
        }
    };
    Ok(storage)
}
