use super::entities::{Evaluation, Grade};
use serde::Serialize;
use ts_rs::TS;

// 登记成绩的结果：新建的考核项与成绩
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct RecordedGrade {
    pub evaluation: Evaluation,
    pub grade: Grade,
}
