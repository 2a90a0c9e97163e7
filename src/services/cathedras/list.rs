use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CathedraService;
use crate::errors::{RecordsError, Result};
use crate::models::{ApiResponse, ErrorCode, persons::entities::Person};
use crate::services::error_response;
use crate::storage::Storage;

pub async fn list_cathedras(
    service: &CathedraService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_cathedras().await {
        Ok(cathedras) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            cathedras,
            "Cathedras retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

pub async fn list_cathedra_professors(
    service: &CathedraService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match professors_of(storage.as_ref(), id).await {
        Ok(professors) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            professors,
            "Professors retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

/// 教研室不存在时返回 NotFound，而不是空列表
pub async fn professors_of(storage: &dyn Storage, cathedra_id: i64) -> Result<Vec<Person>> {
    if storage.get_cathedra_by_id(cathedra_id).await?.is_none() {
        return Err(RecordsError::not_found(format!(
            "Cathedra {cathedra_id} not found"
        )));
    }
    storage.list_cathedra_professors(cathedra_id).await
}
