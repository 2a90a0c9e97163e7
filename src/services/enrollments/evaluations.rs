use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{entities::Evaluation, requests::CreateEvaluationRequest},
};
use crate::services::error_response;
use crate::storage::Storage;

pub async fn create_evaluation(
    service: &EnrollmentService,
    req: CreateEvaluationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match create(storage.as_ref(), req).await {
        Ok(evaluation) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(evaluation, "Evaluation created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::EvaluationFailed)),
    }
}

/// 单项权重需在 0..=100 内；同一课程的权重总和不做检查
pub(crate) fn validate_percentage(percentage: i32) -> Result<()> {
    if !(0..=100).contains(&percentage) {
        return Err(RecordsError::validation(
            "Percentage must be between 0 and 100",
        ));
    }
    Ok(())
}

pub async fn create(storage: &dyn Storage, req: CreateEvaluationRequest) -> Result<Evaluation> {
    if req.name.trim().is_empty() {
        return Err(RecordsError::validation("Evaluation name must not be empty"));
    }
    validate_percentage(req.percentage)?;
    storage.create_evaluation(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_bounds() {
        assert!(validate_percentage(0).is_ok());
        assert!(validate_percentage(100).is_ok());
        assert!(validate_percentage(101).is_err());
        assert!(validate_percentage(-1).is_err());
    }
}
