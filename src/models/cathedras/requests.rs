use crate::models::persons::entities::Career;
use serde::Deserialize;
use ts_rs::TS;

// 创建教研室请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "cathedra.ts")]
pub struct CreateCathedraRequest {
    pub name: String,
    pub code: String,
    pub credits: i32,
    pub career: Career,
}
