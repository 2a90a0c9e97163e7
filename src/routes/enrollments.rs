use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::{
    CreateEvaluationRequest, CreateInscriptionRequest, RecordGradeRequest,
};
use crate::services::EnrollmentService;

// 懒加载的全局 ENROLLMENT_SERVICE 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn create_inscription(
    req: HttpRequest,
    inscription_data: web::Json<CreateInscriptionRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .create_inscription(inscription_data.into_inner(), &req)
        .await
}

pub async fn create_evaluation(
    req: HttpRequest,
    evaluation_data: web::Json<CreateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .create_evaluation(evaluation_data.into_inner(), &req)
        .await
}

pub async fn record_grade(
    req: HttpRequest,
    grade_data: web::Json<RecordGradeRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .record_grade(grade_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/inscriptions")
            .wrap(middlewares::RequireJWT)
            .route(web::post().to(create_inscription)),
    )
    .service(
        web::resource("/api/v1/evaluations")
            .wrap(middlewares::RequireJWT)
            .route(web::post().to(create_evaluation)),
    )
    .service(
        web::resource("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .route(web::post().to(record_grade)),
    );
}
