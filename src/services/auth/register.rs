use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    persons::entities::PersonKind,
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_password};

use super::{AuthService, hash_account};

pub async fn handle_register(
    service: &AuthService,
    create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match register(storage.as_ref(), create_request).await {
        Ok(user) => {
            info!("User {} registered with role {}", user.email, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Registration successful")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::RegisterFailed)),
    }
}

/// 注册新用户
///
/// 邮箱已存在时返回 Validation；并发注册撞上唯一约束时只返回通用失败。
/// 非管理员必须关联一位已存在且尚无账号的教授。
pub async fn register(storage: &dyn Storage, req: CreateUserRequest) -> Result<User> {
    validate_email(&req.email).map_err(RecordsError::validation)?;
    validate_password(&req.password).map_err(RecordsError::validation)?;

    if storage.get_user_by_email(&req.email).await?.is_some() {
        return Err(RecordsError::validation("Email is already registered"));
    }

    let professor_id = match (&req.role, req.professor_id) {
        (UserRole::Admin, professor_id) => professor_id,
        (_, None) => {
            return Err(RecordsError::validation(
                "A professor_id is required for non-admin users",
            ));
        }
        (_, Some(id)) => Some(id),
    };

    if let Some(id) = professor_id
        && storage
            .get_person_by_id(PersonKind::Professor, id)
            .await?
            .is_none()
    {
        return Err(RecordsError::not_found(format!("Professor {id} not found")));
    }

    if let Some(id) = professor_id
        && storage.get_user_by_professor_id(id).await?.is_some()
    {
        return Err(RecordsError::validation(format!(
            "Professor {id} already has an account"
        )));
    }

    let account = hash_account(req.email, req.password, req.role, professor_id).await?;

    storage.create_user(account).await.map_err(|e| match e {
        RecordsError::AlreadyExists(msg) => RecordsError::persistence_failure(msg),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{
        SeaOrmStorage,
        fixtures::{account, personal},
    };

    fn request(email: &str, role: UserRole, professor_id: Option<i64>) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: "Secret123".to_string(),
            role,
            professor_id,
        }
    }

    #[tokio::test]
    async fn test_register_admin() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = register(&storage, request("root@uni.edu", UserRole::Admin, None))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert!(user.check_password("Secret123"));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_validation_error() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        register(&storage, request("root@uni.edu", UserRole::Admin, None))
            .await
            .unwrap();
        let err = register(&storage, request("root@uni.edu", UserRole::Admin, None))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_non_admin_requires_existing_professor() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();

        let err = register(&storage, request("p@uni.edu", UserRole::Professor, None))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::Validation(_)));

        let err = register(&storage, request("p@uni.edu", UserRole::Professor, Some(42)))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));

        // 学生不能作为账号关联的教授
        let student = storage
            .create_student_impl(personal("Eva", "V-7"))
            .await
            .unwrap();
        let err = register(
            &storage,
            request("p@uni.edu", UserRole::Professor, Some(student.id)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_professor_with_account_rejects_second_user() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let professor = storage
            .create_professor(
                personal("Ana Gómez", "V-1"),
                vec![],
                account("ana@uni.edu", "V-1", UserRole::Professor),
            )
            .await
            .unwrap();

        let err = register(
            &storage,
            request("ana.other@uni.edu", UserRole::Professor, Some(professor.id)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RecordsError::Validation(_)));
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let err = register(&storage, request("not-an-email", UserRole::Admin, None))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::Validation(_)));
    }
}
