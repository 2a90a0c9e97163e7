use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::persons::entities::Career;

// 教研室
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "cathedra.ts")]
pub struct Cathedra {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub credits: i32,
    pub career: Career,
    /// 主任（教授 id），后设置者覆盖
    pub coordinator_id: Option<i64>,
}
