pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::cathedras::requests::CreateCathedraRequest;
use crate::storage::Storage;

pub struct CathedraService {
    storage: Option<Arc<dyn Storage>>,
}

impl CathedraService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 教研室列表
    pub async fn list_cathedras(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_cathedras(self, request).await
    }

    // 创建教研室
    pub async fn create_cathedra(
        &self,
        req: CreateCathedraRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_cathedra(self, req, request).await
    }

    pub async fn get_cathedra(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_cathedra(self, id, request).await
    }

    // 教研室下的教授
    pub async fn list_cathedra_professors(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_cathedra_professors(self, id, request).await
    }
}
