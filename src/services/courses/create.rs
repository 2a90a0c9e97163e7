use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{entities::Course, requests::CreateCourseRequest},
};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::validate::validate_code;

pub async fn create_course(
    service: &CourseService,
    req: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match create(storage.as_ref(), req).await {
        Ok(course) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(course, "Course created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::CourseCreationFailed)),
    }
}

pub(crate) fn validate_course(req: &CreateCourseRequest) -> Result<()> {
    if req.title.trim().is_empty() {
        return Err(RecordsError::validation("Course title must not be empty"));
    }
    validate_code(&req.code).map_err(RecordsError::validation)?;
    if req.end_date < req.start_date {
        return Err(RecordsError::validation(
            "Course end date must not be before its start date",
        ));
    }
    Ok(())
}

/// 创建课程：教研室按代码解析，教授按身份证号解析，任一不存在返回 NotFound
pub async fn create(storage: &dyn Storage, req: CreateCourseRequest) -> Result<Course> {
    validate_course(&req)?;
    storage.create_course(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{
        SeaOrmStorage,
        fixtures::{cathedra, course},
    };

    #[tokio::test]
    async fn test_missing_cathedra_is_not_found() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let err = create(&storage, course("C1", "NOPE", "V-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_end_before_start_rejected() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_cathedra(cathedra("Mecánica", "MEC1")).await.unwrap();

        let mut req = course("C1", "MEC1", "V-1");
        std::mem::swap(&mut req.start_date, &mut req.end_date);
        let err = create(&storage, req).await.unwrap_err();
        assert!(matches!(err, RecordsError::Validation(_)));
    }
}
