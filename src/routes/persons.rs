use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::persons::{
    entities::PersonKind,
    requests::{CreateProfessorRequest, CreateStudentRequest},
};
use crate::models::users::entities::UserRole;
use crate::services::PersonService;

// 懒加载的全局 PERSON_SERVICE 实例
static PERSON_SERVICE: Lazy<PersonService> = Lazy::new(PersonService::new_lazy);

pub async fn list_professors(req: HttpRequest) -> ActixResult<HttpResponse> {
    PERSON_SERVICE
        .list_persons(PersonKind::Professor, &req)
        .await
}

pub async fn create_professor(
    req: HttpRequest,
    professor_data: web::Json<CreateProfessorRequest>,
) -> ActixResult<HttpResponse> {
    PERSON_SERVICE
        .create_professor(professor_data.into_inner(), &req)
        .await
}

pub async fn get_professor(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    PERSON_SERVICE
        .get_person(PersonKind::Professor, id.into_inner(), &req)
        .await
}

pub async fn list_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    PERSON_SERVICE.list_persons(PersonKind::Student, &req).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    PERSON_SERVICE
        .create_student(student_data.into_inner(), &req)
        .await
}

pub async fn get_student(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    PERSON_SERVICE
        .get_person(PersonKind::Student, id.into_inner(), &req)
        .await
}

pub async fn list_student_grades(
    req: HttpRequest,
    id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    PERSON_SERVICE
        .list_student_grades(id.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_persons_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/professors")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_professors)).route(
                    web::post()
                        .to(create_professor)
                        .wrap(middlewares::RequireRole::new_any(UserRole::manager_roles())),
                ),
            )
            .service(web::resource("/{id}").route(web::get().to(get_professor))),
    )
    .service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_students)).route(
                    web::post()
                        .to(create_student)
                        .wrap(middlewares::RequireRole::new_any(UserRole::manager_roles())),
                ),
            )
            .service(web::resource("/{id}").route(web::get().to(get_student)))
            .service(web::resource("/{id}/grades").route(web::get().to(list_student_grades))),
    );
}
