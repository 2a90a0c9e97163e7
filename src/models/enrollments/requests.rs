use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct CreateInscriptionRequest {
    pub student_id: i64,
    pub course_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct CreateEvaluationRequest {
    pub name: String,
    pub percentage: i32,
    pub course_id: i64,
}

// 登记成绩请求：按课程代码与学生身份证号定位
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct RecordGradeRequest {
    pub course_code: String,
    pub student_ci: String,
    pub evaluation_name: String,
    pub percentage: i32,
    pub value: f64,
}
