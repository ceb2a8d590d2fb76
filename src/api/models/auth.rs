use serde::{Deserialize, Serialize};

use super::validation_result;
use crate::error::AppError;
use crate::session::{Role, UserProfile};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.name.is_empty() {
            errors.push("name is required".to_string());
        }
        if self.email.is_empty() {
            errors.push("email is required".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        validation_result(errors)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AppError::Validation(vec![
                "email and password are required".to_string(),
            ]));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuperuserLoginRequest {
    pub admin_secret: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetRoleRequest {
    pub email: String,
    pub role: Role,
}

/// 注册、登录、超级用户登录的统一响应
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRoleResponse {
    #[serde(default)]
    pub success: bool,
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_normalizes_and_validates() {
        let req = RegisterRequest::new("  Asha ", " Asha@Example.COM ", "secret1");
        assert_eq!(req.name, "Asha");
        assert_eq!(req.email, "asha@example.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn register_reports_every_problem() {
        let req = RegisterRequest::new("", "", "123");
        match req.validate() {
            Err(AppError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn login_needs_both_fields() {
        assert!(LoginRequest::new("a@b.c", "").validate().is_err());
        assert!(LoginRequest::new("  ", "pw").validate().is_err());
        assert!(LoginRequest::new("a@b.c", "pw").validate().is_ok());
    }

    #[test]
    fn auth_response_parses_backend_payload() {
        let resp: AuthResponse = serde_json::from_str(
            r#"{"token": "jwt", "user": {"id": 12, "name": "Asha", "email": "asha@example.com", "role": "user"}}"#,
        )
        .unwrap();
        assert_eq!(resp.token, "jwt");
        assert_eq!(resp.user.id.to_string(), "12");
    }
}
