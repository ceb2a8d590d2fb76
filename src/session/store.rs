use std::sync::Arc;

use parking_lot::RwLock;

use super::keys::STORAGE_KEY;
use super::models::{Session, UserProfile};
use crate::api::DefaultHeaders;
use crate::storage::SessionStorage;

/// 会话存储：当前令牌和用户的唯一来源。
///
/// 每次变更都会尝试持久化，并把令牌同步到共享请求头。
/// 存储失败只记录日志，内存中的状态始终为准。
pub struct SessionStore {
    state: RwLock<Session>,
    storage: Arc<dyn SessionStorage>,
    headers: DefaultHeaders,
}

impl SessionStore {
    /// 启动时从存储恢复会话，任何失败都视为未登录
    pub fn initialize(storage: Arc<dyn SessionStorage>, headers: DefaultHeaders) -> Self {
        let restored = match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => Session::from_persisted(&raw).unwrap_or_else(|| {
                tracing::debug!("Persisted session is malformed, starting signed out");
                Session::default()
            }),
            Ok(None) => Session::default(),
            Err(e) => {
                tracing::warn!("Failed to read persisted session: {}", e);
                Session::default()
            }
        };

        if restored.is_authenticated() {
            tracing::info!("Restored persisted session");
        }

        let store = Self {
            state: RwLock::new(restored.clone()),
            storage,
            headers,
        };
        store.on_change(&restored);
        store
    }

    /// 网络登录成功后调用，同时设置令牌和用户
    pub fn login(&self, token: &str, user: Option<UserProfile>) {
        let next = Session::new(token, user);
        tracing::debug!(
            authenticated = next.is_authenticated(),
            "Session login"
        );
        self.replace(next);
    }

    /// 清空会话、删除持久化记录并移除认证头
    pub fn logout(&self) {
        tracing::debug!("Session logout");
        self.replace(Session::default());
    }

    /// 更新已登录会话的用户资料，未登录时忽略
    pub fn update_user(&self, user: UserProfile) -> bool {
        let mut state = self.state.write();
        if !state.is_authenticated() {
            return false;
        }
        state.user = Some(user);
        self.on_change(&state);
        true
    }

    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn is_superuser(&self) -> bool {
        self.state.read().is_superuser()
    }

    pub fn headers(&self) -> &DefaultHeaders {
        &self.headers
    }

    // 持有写锁直到副作用完成，保证状态、请求头和存储的顺序一致
    fn replace(&self, next: Session) {
        let mut state = self.state.write();
        *state = next;
        self.on_change(&state);
    }

    // 持久化并同步请求头；空会话直接删除记录。不能读写 state
    fn on_change(&self, session: &Session) {
        if session.is_empty() {
            if let Err(e) = self.storage.remove(STORAGE_KEY) {
                tracing::warn!("Failed to remove persisted session: {}", e);
            }
        } else {
            match serde_json::to_string(session) {
                Ok(raw) => {
                    if let Err(e) = self.storage.set(STORAGE_KEY, &raw) {
                        tracing::warn!("Failed to persist session: {}", e);
                    }
                }
                Err(e) => tracing::warn!("Failed to serialize session: {}", e),
            }
        }

        self.headers.set_auth_token(session.token.as_deref());
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::session::models::{Role, UserId};
    use crate::storage::MemoryStorage;

    /// 所有操作都失败的存储
    struct BrokenStorage;

    impl SessionStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }
    }

    fn user_u1() -> UserProfile {
        UserProfile::new("u1", Role::User)
    }

    fn fresh() -> (Arc<MemoryStorage>, DefaultHeaders, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let headers = DefaultHeaders::new();
        let store = SessionStore::initialize(storage.clone(), headers.clone());
        (storage, headers, store)
    }

    #[test]
    fn starts_empty_without_persisted_record() {
        let (storage, headers, store) = fresh();
        assert_eq!(store.snapshot(), Session::default());
        assert!(!headers.has_authorization());
        assert!(!storage.contains(STORAGE_KEY));
    }

    #[test]
    fn login_then_logout_scenario() {
        let (storage, headers, store) = fresh();

        store.login("abc123", Some(user_u1()));
        assert_eq!(store.token().as_deref(), Some("abc123"));
        assert_eq!(store.user(), Some(user_u1()));
        assert_eq!(headers.authorization().as_deref(), Some("Bearer abc123"));
        assert!(storage.contains(STORAGE_KEY));

        store.logout();
        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
        assert!(!headers.has_authorization());
        assert!(!storage.contains(STORAGE_KEY));
    }

    #[test]
    fn persisted_session_survives_restart() {
        let storage = Arc::new(MemoryStorage::new());
        let first = SessionStore::initialize(storage.clone(), DefaultHeaders::new());
        first.login("abc123", Some(user_u1()));
        drop(first);

        let headers = DefaultHeaders::new();
        let second = SessionStore::initialize(storage, headers.clone());
        assert_eq!(second.snapshot(), Session::new("abc123", Some(user_u1())));
        assert_eq!(headers.authorization().as_deref(), Some("Bearer abc123"));
    }

    #[test]
    fn corrupt_storage_starts_empty() {
        for raw in ["{not json", "[\"token\"]", "12", "\"abc\""] {
            let storage = Arc::new(MemoryStorage::new());
            storage.set(STORAGE_KEY, raw).unwrap();

            let headers = DefaultHeaders::new();
            let store = SessionStore::initialize(storage.clone(), headers.clone());
            assert_eq!(store.snapshot(), Session::default());
            assert!(!headers.has_authorization());
            // 损坏的记录被清理
            assert!(!storage.contains(STORAGE_KEY));
        }
    }

    #[test]
    fn unavailable_storage_never_breaks_the_session() {
        let headers = DefaultHeaders::new();
        let store = SessionStore::initialize(Arc::new(BrokenStorage), headers.clone());
        assert!(!store.is_authenticated());

        store.login("abc123", Some(user_u1()));
        assert_eq!(store.token().as_deref(), Some("abc123"));
        assert_eq!(store.user(), Some(user_u1()));
        assert!(headers.has_authorization());

        store.logout();
        assert!(!store.is_authenticated());
        assert!(!headers.has_authorization());
    }

    #[test]
    fn empty_token_login_stays_signed_out() {
        let (_storage, headers, store) = fresh();
        store.login("", None);
        assert!(!store.is_authenticated());
        assert!(!headers.has_authorization());
    }

    #[test]
    fn relogin_replaces_previous_session() {
        let (storage, headers, store) = fresh();
        store.login("first", Some(user_u1()));

        let admin = UserProfile::new("su-admin", Role::Superuser);
        store.login("second", Some(admin.clone()));
        assert_eq!(headers.authorization().as_deref(), Some("Bearer second"));
        assert!(store.is_superuser());

        let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(
            Session::from_persisted(&raw),
            Some(Session::new("second", Some(admin)))
        );
    }

    #[test]
    fn update_user_requires_token() {
        let (storage, _headers, store) = fresh();
        let profile = UserProfile::new(UserId::Number(3), Role::User);
        assert!(!store.update_user(profile.clone()));
        assert!(store.user().is_none());
        assert!(!storage.contains(STORAGE_KEY));

        store.login("abc123", None);
        assert!(store.update_user(profile.clone()));
        assert_eq!(store.user(), Some(profile));

        let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
        assert!(Session::from_persisted(&raw).unwrap().user.is_some());
    }

    #[test]
    fn concurrent_login_and_logout_stay_in_sync() {
        for _ in 0..200 {
            let (storage, headers, store) = fresh();
            let store = Arc::new(store);

            let handles: Vec<_> = (0..2)
                .map(|i| {
                    let store = store.clone();
                    std::thread::spawn(move || {
                        for _ in 0..20 {
                            if i == 0 {
                                store.login("aaa", None);
                            } else {
                                store.logout();
                            }
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let expected_header = store.token().map(|t| format!("Bearer {}", t));
            assert_eq!(headers.authorization(), expected_header);
            assert_eq!(storage.contains(STORAGE_KEY), store.is_authenticated());
        }
    }

    #[test]
    fn debug_never_prints_token() {
        let (_storage, _headers, store) = fresh();
        store.login("super-secret-token", Some(user_u1()));
        assert!(!format!("{:?}", store).contains("super-secret-token"));
    }
}
