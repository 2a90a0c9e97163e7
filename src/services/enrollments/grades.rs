use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use super::evaluations::validate_percentage;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{requests::RecordGradeRequest, responses::RecordedGrade},
};
use crate::services::error_response;
use crate::storage::Storage;

pub async fn record_grade(
    service: &EnrollmentService,
    req: RecordGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match record(storage.as_ref(), req).await {
        Ok(recorded) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(recorded, "Grade recorded successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::GradeRecordFailed)),
    }
}

pub(crate) fn validate_grade(req: &RecordGradeRequest) -> Result<()> {
    if req.evaluation_name.trim().is_empty() {
        return Err(RecordsError::validation("Evaluation name must not be empty"));
    }
    validate_percentage(req.percentage)?;
    if !req.value.is_finite() {
        return Err(RecordsError::validation("Grade value must be a number"));
    }
    Ok(())
}

/// 登记成绩：先建考核项，再建成绩，两次独立提交
pub async fn record(storage: &dyn Storage, req: RecordGradeRequest) -> Result<RecordedGrade> {
    validate_grade(&req)?;
    storage.record_grade(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures::personal};

    fn request() -> RecordGradeRequest {
        RecordGradeRequest {
            course_code: "MEC1-A".to_string(),
            student_ci: "V-7".to_string(),
            evaluation_name: "Parcial".to_string(),
            percentage: 25,
            value: 18.0,
        }
    }

    #[tokio::test]
    async fn test_unknown_course_is_not_found() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_student(personal("Eva", "V-7")).await.unwrap();
        let err = record(&storage, request()).await.unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));
    }

    #[test]
    fn test_nan_value_rejected() {
        let mut req = request();
        req.value = f64::NAN;
        assert!(validate_grade(&req).is_err());
    }
}
