use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PersonService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::entities::Grade,
    persons::{
        entities::{Person, PersonKind},
        requests::CreateStudentRequest,
    },
};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::validate::validate_personal_data;

pub async fn create_student(
    service: &PersonService,
    req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match create(storage.as_ref(), req).await {
        Ok(student) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(student, "Student created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::PersonCreationFailed)),
    }
}

pub async fn list_student_grades(
    service: &PersonService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match grades_of(storage.as_ref(), id).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grades,
            "Grades retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

/// 创建学生（不创建账号）
pub async fn create(storage: &dyn Storage, req: CreateStudentRequest) -> Result<Person> {
    validate_personal_data(&req.data).map_err(RecordsError::validation)?;
    storage.create_student(req.data).await
}

pub async fn grades_of(storage: &dyn Storage, student_id: i64) -> Result<Vec<Grade>> {
    if storage
        .get_person_by_id(PersonKind::Student, student_id)
        .await?
        .is_none()
    {
        return Err(RecordsError::not_found(format!(
            "Student {student_id} not found"
        )));
    }
    storage.list_student_grades(student_id).await
}
