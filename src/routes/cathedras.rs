use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::cathedras::requests::CreateCathedraRequest;
use crate::models::users::entities::UserRole;
use crate::services::CathedraService;

// 懒加载的全局 CATHEDRA_SERVICE 实例
static CATHEDRA_SERVICE: Lazy<CathedraService> = Lazy::new(CathedraService::new_lazy);

pub async fn list_cathedras(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATHEDRA_SERVICE.list_cathedras(&req).await
}

pub async fn create_cathedra(
    req: HttpRequest,
    cathedra_data: web::Json<CreateCathedraRequest>,
) -> ActixResult<HttpResponse> {
    CATHEDRA_SERVICE
        .create_cathedra(cathedra_data.into_inner(), &req)
        .await
}

pub async fn get_cathedra(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    CATHEDRA_SERVICE.get_cathedra(id.into_inner(), &req).await
}

pub async fn list_cathedra_professors(
    req: HttpRequest,
    id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CATHEDRA_SERVICE
        .list_cathedra_professors(id.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_cathedras_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/cathedras")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_cathedras)).route(
                    web::post()
                        .to(create_cathedra)
                        .wrap(middlewares::RequireRole::new_any(UserRole::manager_roles())),
                ),
            )
            .service(web::resource("/{id}").route(web::get().to(get_cathedra)))
            .service(
                web::resource("/{id}/professors").route(web::get().to(list_cathedra_professors)),
            ),
    );
}
