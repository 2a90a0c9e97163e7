use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::Result;
use crate::utils::password::{hash_password, verify_password};

// 用户角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserRole {
    Admin,       // 管理员
    Coordinator, // 教研室主任
    Professor,   // 教授
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const COORDINATOR: &'static str = "coordinator";
    pub const PROFESSOR: &'static str = "professor";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn manager_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Coordinator]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: admin, coordinator, professor"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Coordinator => write!(f, "{}", UserRole::COORDINATOR),
            UserRole::Professor => write!(f, "{}", UserRole::PROFESSOR),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    // 同时接受名称与数值编码（1 = admin, 2 = coordinator, 3 = professor）
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "1" => Ok(UserRole::Admin),
            "coordinator" | "2" => Ok(UserRole::Coordinator),
            "professor" | "3" => Ok(UserRole::Professor),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub salt: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub professor_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// 使用当前盐值重新计算密码哈希
    pub fn set_password(&mut self, password: &str) -> Result<()> {
        self.password_hash = hash_password(password, &self.salt)?;
        Ok(())
    }

    /// 校验密码
    pub fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.salt, &self.password_hash)
    }

    // 生成访问令牌
    pub fn generate_access_token(&self) -> Result<String> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string())
            .map_err(|e| crate::errors::RecordsError::authentication(format!("生成令牌失败: {e}")))
    }
}
