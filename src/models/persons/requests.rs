use super::entities::PersonalData;
use crate::models::users::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

// 创建教授请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "person.ts")]
pub struct CreateProfessorRequest {
    #[serde(flatten)]
    #[ts(flatten)]
    pub data: PersonalData,
    /// 关联账号的邮箱，初始密码为身份证号
    pub email: String,
    pub role: UserRole,
    /// 所属教研室代码
    #[serde(default)]
    pub cathedras: Vec<String>,
}

// 创建学生请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "person.ts")]
pub struct CreateStudentRequest {
    #[serde(flatten)]
    #[ts(flatten)]
    pub data: PersonalData,
}
