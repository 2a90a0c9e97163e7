use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
    users::entities::User,
};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match authenticate(storage.as_ref(), &login_request.email, login_request.password).await {
        Ok((user, access_token)) => {
            info!("User {} logged in successfully", user.email);
            let response = LoginResponse {
                access_token,
                expires_in: JwtUtils::access_token_expires_in(),
                user,
                created_at: chrono::Utc::now(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::AuthFailed)),
    }
}

/// 校验邮箱与密码，成功后签发 access token
pub async fn authenticate(
    storage: &dyn Storage,
    email: &str,
    password: String,
) -> Result<(User, String)> {
    let user = storage
        .get_user_by_email(email)
        .await?
        .ok_or_else(|| RecordsError::not_found(format!("User {email} not found")))?;

    // argon2 校验较慢，放到阻塞线程池
    let candidate = user.clone();
    let matches = tokio::task::spawn_blocking(move || candidate.check_password(&password))
        .await
        .map_err(|e| RecordsError::authentication(format!("密码校验失败: {e}")))?;

    if !matches {
        return Err(RecordsError::invalid_credentials(
            "Email or password is incorrect",
        ));
    }

    let token = user.generate_access_token()?;
    Ok((user, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::services::auth::register::register;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn with_admin() -> SeaOrmStorage {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        register(
            &storage,
            CreateUserRequest {
                email: "root@uni.edu".to_string(),
                password: "Secret123".to_string(),
                role: UserRole::Admin,
                professor_id: None,
            },
        )
        .await
        .unwrap();
        storage
    }

    #[tokio::test]
    async fn test_correct_password_issues_token() {
        let storage = with_admin().await;
        let (user, token) = authenticate(&storage, "root@uni.edu", "Secret123".to_string())
            .await
            .unwrap();

        let claims = JwtUtils::verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(user.id));
        assert_eq!(claims.role, "admin");
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let storage = with_admin().await;
        let err = authenticate(&storage, "root@uni.edu", "Wrong1234".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let storage = with_admin().await;
        let err = authenticate(&storage, "ghost@uni.edu", "Secret123".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));
    }
}
