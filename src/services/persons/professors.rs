use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PersonService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    persons::{entities::Person, requests::CreateProfessorRequest},
};
use crate::services::{auth::hash_account, error_response};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_personal_data};

pub async fn create_professor(
    service: &PersonService,
    req: CreateProfessorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match create(storage.as_ref(), req).await {
        Ok(professor) => {
            info!("Professor {} registered", professor.data.ci);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(professor, "Professor created successfully")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::PersonCreationFailed)),
    }
}

pub(crate) fn validate_professor(req: &CreateProfessorRequest) -> Result<()> {
    validate_personal_data(&req.data).map_err(RecordsError::validation)?;
    validate_email(&req.email).map_err(RecordsError::validation)?;
    Ok(())
}

/// 创建教授
///
/// 一个事务内完成：人员记录、教研室分配、主任设置（角色为 coordinator 时）、
/// 关联账号。账号初始密码为身份证号。
pub async fn create(storage: &dyn Storage, req: CreateProfessorRequest) -> Result<Person> {
    validate_professor(&req)?;

    let account = hash_account(req.email, req.data.ci.clone(), req.role, None).await?;
    storage.create_professor(req.data, req.cathedras, account).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::auth::login::authenticate;
    use crate::storage::sea_orm_storage::{
        SeaOrmStorage,
        fixtures::{cathedra, personal},
    };

    fn request(ci: &str, email: &str, role: UserRole, cathedras: &[&str]) -> CreateProfessorRequest {
        CreateProfessorRequest {
            data: personal("Ana Gómez", ci),
            email: email.to_string(),
            role,
            cathedras: cathedras.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_coordinator_reads_back_on_cathedra() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_cathedra(cathedra("Mecánica", "MEC1")).await.unwrap();

        let professor = create(
            &storage,
            request("V-1", "ana@uni.edu", UserRole::Coordinator, &["MEC1"]),
        )
        .await
        .unwrap();

        let cathedra = storage.get_cathedra_by_code("MEC1").await.unwrap().unwrap();
        assert_eq!(cathedra.coordinator_id, Some(professor.id));
    }

    #[tokio::test]
    async fn test_professor_logs_in_with_ci() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        create(&storage, request("V-1", "ana@uni.edu", UserRole::Professor, &[]))
            .await
            .unwrap();

        let (user, _) = authenticate(&storage, "ana@uni.edu", "V-1".to_string())
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Professor);
        assert!(user.professor_id.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_leaves_no_professor() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        create(&storage, request("V-1", "ana@uni.edu", UserRole::Professor, &[]))
            .await
            .unwrap();

        let err = create(&storage, request("V-2", "ana@uni.edu", UserRole::Professor, &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::AlreadyExists(_)));
        assert!(
            storage
                .get_person_by_ci(crate::models::persons::entities::PersonKind::Professor, "V-2")
                .await
                .unwrap()
                .is_none()
        );
    }
}
