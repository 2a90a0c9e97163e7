pub mod professors;
pub mod students;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::RecordsError;
use crate::models::{
    ApiResponse, ErrorCode,
    persons::{
        entities::PersonKind,
        requests::{CreateProfessorRequest, CreateStudentRequest},
    },
};
use crate::services::error_response;
use crate::storage::Storage;

pub struct PersonService {
    storage: Option<Arc<dyn Storage>>,
}

impl PersonService {
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

    // 创建教授（同时创建账号）
    pub async fn create_professor(
        &self,
        req: CreateProfessorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        professors::create_professor(self, req, request).await
    }

    // 创建学生
    pub async fn create_student(
        &self,
        req: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::create_student(self, req, request).await
    }

    pub async fn list_persons(
        &self,
        kind: PersonKind,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.list_persons(kind).await {
            Ok(persons) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                persons,
                format!("{kind} list retrieved successfully"),
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }

    pub async fn get_person(
        &self,
        kind: PersonKind,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_person_by_id(kind, id).await {
            Ok(Some(person)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                person,
                format!("{kind} retrieved successfully"),
            ))),
            Ok(None) => Ok(error_response(
                &RecordsError::not_found(format!("{kind} {id} not found")),
                ErrorCode::InternalServerError,
            )),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }

    // 学生成绩
    pub async fn list_student_grades(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::list_student_grades(self, id, request).await
    }
}
