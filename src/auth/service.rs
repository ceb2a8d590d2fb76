use std::sync::Arc;

use super::guard::require_auth;
use crate::api::ApiClient;
use crate::api::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::AppResult;
use crate::session::{SessionStore, UserProfile};

/// 认证流程：先完成网络交换，成功后再写入会话
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<UserProfile> {
        let resp = self.api.login(&LoginRequest::new(email, password)).await?;
        Ok(self.adopt(resp))
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<UserProfile> {
        let resp = self
            .api
            .register(&RegisterRequest::new(name, email, password))
            .await?;
        Ok(self.adopt(resp))
    }

    pub async fn superuser_login(&self, admin_secret: &str) -> AppResult<UserProfile> {
        let resp = self.api.superuser_login(admin_secret).await?;
        Ok(self.adopt(resp))
    }

    /// 通知服务端（失败忽略）后清空本地会话，本地登出总会发生
    pub async fn logout(&self) {
        if self.session.is_authenticated() {
            if let Err(e) = self.api.logout().await {
                tracing::warn!("Server-side logout failed, clearing local session anyway: {}", e);
            }
        }
        self.session.logout();
    }

    /// 用 `/auth/me` 刷新用户资料；令牌失效时登出
    pub async fn refresh_profile(&self) -> AppResult<UserProfile> {
        require_auth(&self.session)?;
        match self.api.me().await {
            Ok(me) => {
                self.session.update_user(me.user.clone());
                Ok(me.user)
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Stored token was rejected, signing out");
                self.session.logout();
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    fn adopt(&self, resp: AuthResponse) -> UserProfile {
        tracing::info!(role = %resp.user.role, "Signed in as {}", resp.user.display_name());
        self.session.login(&resp.token, Some(resp.user.clone()));
        resp.user
    }
}
