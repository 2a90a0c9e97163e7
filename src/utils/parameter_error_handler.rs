use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message))
}

/// JSON 请求体解析失败
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            format!("JSON payload exceeds limit of {limit} bytes")
        }
        other => format!("Invalid JSON payload: {other}"),
    };
    InternalError::from_response(err, bad_request(message)).into()
}

/// 查询参数解析失败
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("Invalid query parameters: {err}");
    InternalError::from_response(err, bad_request(message)).into()
}

/// 路径参数解析失败（例如 id 不是整数）
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> Error {
    let message = format!("Invalid path parameter: {err}");
    InternalError::from_response(err, bad_request(message)).into()
}
