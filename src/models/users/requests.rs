use super::entities::UserRole;
use crate::errors::Result;
use crate::utils::password::{generate_salt, hash_password};
use serde::Deserialize;
use ts_rs::TS;

// 用户注册请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub professor_id: Option<i64>,
}

// 待写入存储层的用户（已加盐哈希）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub salt: String,
    pub hashed_password: String,
    pub role: UserRole,
    pub professor_id: Option<i64>,
}

impl NewUser {
    /// 为新用户生成随机盐并计算密码哈希
    pub fn hashed(
        email: String,
        password: &str,
        role: UserRole,
        professor_id: Option<i64>,
    ) -> Result<Self> {
        let salt = generate_salt();
        let hashed_password = hash_password(password, &salt)?;
        Ok(Self {
            email,
            salt,
            hashed_password,
            role,
            professor_id,
        })
    }
}
