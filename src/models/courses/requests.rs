use serde::Deserialize;
use ts_rs::TS;

// 创建课程请求，教研室按代码、教授按身份证号解析
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CreateCourseRequest {
    pub title: String,
    pub code: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[serde(default = "default_active")]
    pub active: bool,
    pub cathedra_code: String,
    pub professor_ci: String,
}

fn default_active() -> bool {
    true
}
