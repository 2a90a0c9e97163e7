use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode, enrollments::requests::CreateInscriptionRequest};
use crate::services::error_response;

pub async fn create_inscription(
    service: &EnrollmentService,
    req: CreateInscriptionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .create_inscription(req.student_id, req.course_id)
        .await
    {
        Ok(inscription) => {
            info!(
                "Student {} enrolled in course {}",
                inscription.student_id, inscription.course_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(inscription, "Inscription created successfully")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::InscriptionFailed)),
    }
}
