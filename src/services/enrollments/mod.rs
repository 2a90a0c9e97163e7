pub mod evaluations;
pub mod grades;
pub mod inscriptions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::{
    CreateEvaluationRequest, CreateInscriptionRequest, RecordGradeRequest,
};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    // 选课
    pub async fn create_inscription(
        &self,
        req: CreateInscriptionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        inscriptions::create_inscription(self, req, request).await
    }

    // 创建考核项
    pub async fn create_evaluation(
        &self,
        req: CreateEvaluationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        evaluations::create_evaluation(self, req, request).await
    }

    // 登记成绩
    pub async fn record_grade(
        &self,
        req: RecordGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::record_grade(self, req, request).await
    }
}
