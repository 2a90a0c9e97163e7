use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::errors::{RecordsError, Result};
use crate::models::{ApiResponse, ErrorCode, enrollments::entities::Evaluation};
use crate::services::error_response;
use crate::storage::Storage;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_courses().await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            courses,
            "Courses retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

pub async fn list_course_evaluations(
    service: &CourseService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match evaluations_of(storage.as_ref(), id).await {
        Ok(evaluations) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluations,
            "Evaluations retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

pub async fn evaluations_of(storage: &dyn Storage, course_id: i64) -> Result<Vec<Evaluation>> {
    if storage.get_course_by_id(course_id).await?.is_none() {
        return Err(RecordsError::not_found(format!(
            "Course {course_id} not found"
        )));
    }
    storage.list_course_evaluations(course_id).await
}
