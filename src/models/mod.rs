pub mod auth;
pub mod cathedras;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod imports;
pub mod persons;
pub mod users;

pub use common::ApiResponse;

use serde::Serialize;

/// 程序启动时间
#[derive(Debug, Clone, Serialize)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证与用户
    AuthFailed = 2000,
    RegisterFailed = 2001,

    // 教研室
    CathedraCreationFailed = 3002,

    // 人员
    PersonCreationFailed = 3102,

    // 课程
    CourseCreationFailed = 3202,

    // 选课、考核与成绩
    InscriptionFailed = 3300,
    EvaluationFailed = 3301,
    GradeRecordFailed = 3302,

    // 文件与导入
    FileUploadFailed = 4000,
    FileSizeExceeded = 4001,
    ImportFileParseFailed = 4002,
    ImportFileDataInvalid = 4003,
    ImportFailed = 4004,
}
