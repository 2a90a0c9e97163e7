use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::ImportService;

// 懒加载的全局 IMPORT_SERVICE 实例
static IMPORT_SERVICE: Lazy<ImportService> = Lazy::new(ImportService::new_lazy);

pub async fn import(
    req: HttpRequest,
    target: web::Path<String>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    IMPORT_SERVICE
        .import(&target.into_inner(), payload, &req)
        .await
}

// 配置路由
pub fn configure_imports_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/imports")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/{target}", web::post().to(import)),
            ),
    );
}
