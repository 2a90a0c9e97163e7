use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{RecordsError, Result};
use crate::models::users::{entities::User, requests::NewUser};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

/// 插入用户（可在事务中调用）
pub(super) async fn insert_user<C: ConnectionTrait>(conn: &C, user: NewUser) -> Result<User> {
    let model = ActiveModel {
        email: Set(user.email),
        salt: Set(user.salt),
        hashed_password: Set(user.hashed_password),
        role: Set(user.role.to_string()),
        professor_id: Set(user.professor_id),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| RecordsError::from_db("创建用户失败", e))?;

    Ok(result.into_user())
}

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, user: NewUser) -> Result<User> {
        insert_user(&self.db, user).await
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过关联教授获取账号
    pub async fn get_user_by_professor_id_impl(&self, professor_id: i64) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::ProfessorId.eq(professor_id))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询用户总数失败", e))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{account, personal};
    use super::*;
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_create_and_find_user() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let created = storage
            .create_user_impl(account("ana@uni.edu", "Secret123", UserRole::Admin))
            .await
            .unwrap();

        let found = storage
            .get_user_by_email_impl("ana@uni.edu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.role, UserRole::Admin);
        assert!(found.check_password("Secret123"));
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_already_exists() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_user_impl(account("ana@uni.edu", "Secret123", UserRole::Admin))
            .await
            .unwrap();

        let err = storage
            .create_user_impl(account("ana@uni.edu", "Other1234", UserRole::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::AlreadyExists(_)));
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_user() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        assert!(storage.get_user_by_id_impl(99).await.unwrap().is_none());
        assert!(
            storage
                .get_user_by_email_impl("nobody@uni.edu")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_one_account_per_professor() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let professor = storage
            .create_professor_impl(
                personal("Ana Gómez", "V-1"),
                vec![],
                account("ana@uni.edu", "V-1", UserRole::Professor),
            )
            .await
            .unwrap();

        let linked = storage
            .get_user_by_professor_id_impl(professor.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(linked.email, "ana@uni.edu");

        let mut second = account("ana2@uni.edu", "Secret123", UserRole::Professor);
        second.professor_id = Some(professor.id);
        let err = storage.create_user_impl(second).await.unwrap_err();
        assert!(matches!(err, RecordsError::AlreadyExists(_)));

        // 未关联教授的账号可以有多个
        storage
            .create_user_impl(account("root@uni.edu", "Secret123", UserRole::Admin))
            .await
            .unwrap();
        storage
            .create_user_impl(account("root2@uni.edu", "Secret123", UserRole::Admin))
            .await
            .unwrap();
        assert_eq!(storage.count_users_impl().await.unwrap(), 3);
    }
}
