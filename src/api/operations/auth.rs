use reqwest::Method;

use crate::api::ApiClient;
use crate::api::models::{
    AuthResponse, LoginRequest, MeResponse, RegisterRequest, SetRoleRequest, SetRoleResponse,
    SuperuserLoginRequest,
};
use crate::error::AppResult;
use crate::result::SuccessResponse;
use crate::session::Role;

const ADMIN_SECRET_HEADER: &str = "X-Admin-Secret";

impl ApiClient {
    pub async fn register(&self, req: &RegisterRequest) -> AppResult<AuthResponse> {
        req.validate()?;
        self.post("/auth/register", req).await
    }

    pub async fn login(&self, req: &LoginRequest) -> AppResult<AuthResponse> {
        req.validate()?;
        self.post("/auth/login", req).await
    }

    /// 无状态 JWT，服务端只是确认一下
    pub async fn logout(&self) -> AppResult<SuccessResponse> {
        self.post_empty("/auth/logout").await
    }

    pub async fn me(&self) -> AppResult<MeResponse> {
        self.get("/auth/me").await
    }

    pub async fn superuser_login(&self, admin_secret: &str) -> AppResult<AuthResponse> {
        let req = SuperuserLoginRequest {
            admin_secret: admin_secret.to_string(),
        };
        self.post("/auth/su-login", &req).await
    }

    /// 用管理密钥修改用户角色
    pub async fn set_role(
        &self,
        admin_secret: &str,
        email: &str,
        role: Role,
    ) -> AppResult<SetRoleResponse> {
        let req = SetRoleRequest {
            email: email.trim().to_lowercase(),
            role,
        };
        let builder = self
            .request(Method::POST, "/auth/set-role")
            .header(ADMIN_SECRET_HEADER, admin_secret)
            .json(&req);
        self.send(builder).await
    }
}
