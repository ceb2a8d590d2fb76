use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// 用户标识：注册用户是数字，临时超级用户是字符串（如 `su-admin`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{}", id),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Superuser,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Superuser => "superuser",
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("superuser") {
            Role::Superuser
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// 未知或缺失的角色一律按普通用户处理
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Role::from).unwrap_or_default())
    }
}

/// 用户资料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl UserProfile {
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            role,
        }
    }

    pub fn is_superuser(&self) -> bool {
        self.role == Role::Superuser
    }

    /// 展示用名称，没有名字时退回邮箱或标识
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// 会话，同时也是持久化记录的格式 `{"token": ..., "user": ...}`
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn new(token: &str, user: Option<UserProfile>) -> Self {
        let token = Some(token)
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string);
        // 没有令牌就不保留用户
        let user = user.filter(|_| token.is_some());
        Self { token, user }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }

    pub fn is_superuser(&self) -> bool {
        self.is_authenticated() && self.user.as_ref().is_some_and(UserProfile::is_superuser)
    }

    /// 解析持久化记录。
    ///
    /// 非 JSON、非对象的内容视同不存在；`token` 必须是非空字符串，`user` 结构不对时丢弃。
    /// 没有令牌的记录不会恢复出用户资料。
    pub fn from_persisted(raw: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        let record = value.as_object()?;

        let token = record
            .get("token")
            .and_then(serde_json::Value::as_str)
            .filter(|t| !t.trim().is_empty())?
            .to_string();
        let user = record
            .get("user")
            .filter(|u| u.is_object())
            .and_then(|u| serde_json::from_value::<UserProfile>(u.clone()).ok());

        Some(Self {
            token: Some(token),
            user,
        })
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}
