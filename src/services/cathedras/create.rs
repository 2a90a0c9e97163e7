use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CathedraService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    cathedras::{entities::Cathedra, requests::CreateCathedraRequest},
};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::validate::validate_code;

pub async fn create_cathedra(
    service: &CathedraService,
    req: CreateCathedraRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match create(storage.as_ref(), req).await {
        Ok(cathedra) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(cathedra, "Cathedra created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::CathedraCreationFailed)),
    }
}

/// 校验请求
pub(crate) fn validate_cathedra(req: &CreateCathedraRequest) -> Result<()> {
    if req.name.trim().is_empty() {
        return Err(RecordsError::validation("Cathedra name must not be empty"));
    }
    validate_code(&req.code).map_err(RecordsError::validation)?;
    if req.credits < 0 {
        return Err(RecordsError::validation("Credits must not be negative"));
    }
    Ok(())
}

/// 创建教研室，名称或代码重复返回 AlreadyExists
pub async fn create(storage: &dyn Storage, req: CreateCathedraRequest) -> Result<Cathedra> {
    validate_cathedra(&req)?;
    storage.create_cathedra(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures::cathedra};

    #[tokio::test]
    async fn test_second_cathedra_with_same_code() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let first = create(&storage, cathedra("Mecánica", "MEC1")).await.unwrap();

        let err = create(&storage, cathedra("Termodinámica", "MEC1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::AlreadyExists(_)));

        let kept = storage.get_cathedra_by_code("MEC1").await.unwrap().unwrap();
        assert_eq!(kept.id, first.id);
        assert_eq!(kept.name, "Mecánica");
    }

    #[tokio::test]
    async fn test_invalid_code_rejected() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let err = create(&storage, cathedra("Mecánica", "MEC 1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::Validation(_)));
    }
}
