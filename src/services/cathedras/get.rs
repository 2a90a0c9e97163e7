use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CathedraService;
use crate::errors::RecordsError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_cathedra(
    service: &CathedraService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_cathedra_by_id(id).await {
        Ok(Some(cathedra)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            cathedra,
            "Cathedra retrieved successfully",
        ))),
        Ok(None) => Ok(error_response(
            &RecordsError::not_found(format!("Cathedra {id} not found")),
            ErrorCode::InternalServerError,
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
