use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct Inscription {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 考核项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct Evaluation {
    pub id: i64,
    pub name: String,
    /// 权重百分比，不校验总和
    pub percentage: i32,
    pub course_id: i64,
}

// 成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct Grade {
    pub id: i64,
    pub value: f64,
    pub student_id: i64,
    pub evaluation_id: i64,
    pub inscription_id: i64,
}
