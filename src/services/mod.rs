pub mod auth;
pub mod cathedras;
pub mod courses;
pub mod enrollments;
pub mod imports;
pub mod persons;

pub use auth::AuthService;
pub use cathedras::CathedraService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use imports::ImportService;
pub use persons::PersonService;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::RecordsError;
use crate::models::{ApiResponse, ErrorCode};

/// 将业务错误转换为 HTTP 响应
///
/// 4xx 原样返回错误信息；其余一律 500，细节只写日志。
pub(crate) fn error_response(err: &RecordsError, failure_code: ErrorCode) -> HttpResponse {
    match err {
        RecordsError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        RecordsError::AlreadyExists(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg))
        }
        RecordsError::Validation(msg) | RecordsError::DateParse(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        }
        RecordsError::ImportParse(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ImportFileParseFailed, msg),
        ),
        RecordsError::InvalidCredentials(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::AuthFailed, msg))
        }
        RecordsError::Authentication(msg) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg)),
        RecordsError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg))
        }
        other => {
            error!("{}", other.format_simple());
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                failure_code,
                "Internal server error",
            ))
        }
    }
}
