use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::session::Role;

/// 后端签发的 JWT 载荷
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub iat: Option<i64>,
    pub exp: i64,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// 读取令牌载荷用于展示。
///
/// 客户端没有签名密钥，这里不校验签名，结果不能用于授权判断。
pub fn inspect_token(token: &str) -> Option<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Payload<'a> {
        sub: &'a str,
        email: &'a str,
        name: &'a str,
        role: &'a str,
        iat: i64,
        exp: i64,
    }

    fn issue(role: &str, exp: i64) -> String {
        encode(
            &Header::default(),
            &Payload {
                sub: "12",
                email: "asha@example.com",
                name: "Asha",
                role,
                iat: exp - 7 * 24 * 3600,
                exp,
            },
            &EncodingKey::from_secret(b"change-me-in-prod"),
        )
        .unwrap()
    }

    #[test]
    fn reads_claims_without_secret() {
        let exp = Utc::now().timestamp() + 3600;
        let claims = inspect_token(&issue("superuser", exp)).unwrap();
        assert_eq!(claims.sub, "12");
        assert_eq!(claims.role, Role::Superuser);
        assert_eq!(claims.expires_at().unwrap().timestamp(), exp);
        assert!(!claims.is_expired());
    }

    #[test]
    fn expired_tokens_still_decode() {
        let claims = inspect_token(&issue("user", 1_000)).unwrap();
        assert!(claims.is_expired());
    }

    #[test]
    fn opaque_tokens_are_none() {
        assert!(inspect_token("abc123").is_none());
        assert!(inspect_token("").is_none());
    }
}
