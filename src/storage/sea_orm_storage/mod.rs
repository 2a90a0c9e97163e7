//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 多步写操作在方法内部显式开启事务，事务句柄只在该方法内传递。

mod cathedras;
mod courses;
mod enrollments;
mod persons;
mod users;

use crate::config::AppConfig;
use crate::errors::{RecordsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 基于已有连接创建实例并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| RecordsError::persistence_failure(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 内存数据库（单连接，连接关闭即丢失数据）
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RecordsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| RecordsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Self::from_connection(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)).await
    }

    /// 开启事务
    pub(crate) async fn begin(&self) -> Result<DatabaseTransaction> {
        self.db
            .begin()
            .await
            .map_err(|e| RecordsError::from_db("开启事务失败", e))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| RecordsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| RecordsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| RecordsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(RecordsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    cathedras::{entities::Cathedra, requests::CreateCathedraRequest},
    courses::{entities::Course, requests::CreateCourseRequest},
    enrollments::{
        entities::{Evaluation, Grade, Inscription},
        requests::{CreateEvaluationRequest, RecordGradeRequest},
        responses::RecordedGrade,
    },
    persons::entities::{Person, PersonKind, PersonalData},
    users::{entities::User, requests::NewUser},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_professor_id(&self, professor_id: i64) -> Result<Option<User>> {
        self.get_user_by_professor_id_impl(professor_id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 人员模块
    async fn create_professor(
        &self,
        data: PersonalData,
        cathedra_codes: Vec<String>,
        account: NewUser,
    ) -> Result<Person> {
        self.create_professor_impl(data, cathedra_codes, account)
            .await
    }

    async fn create_professor_record(
        &self,
        data: PersonalData,
        account: NewUser,
    ) -> Result<Person> {
        self.create_professor_record_impl(data, account).await
    }

    async fn assign_cathedras(
        &self,
        professor_id: i64,
        cathedra_codes: Vec<String>,
        coordinator: bool,
    ) -> Result<Vec<Cathedra>> {
        self.assign_cathedras_impl(professor_id, cathedra_codes, coordinator)
            .await
    }

    async fn create_student(&self, data: PersonalData) -> Result<Person> {
        self.create_student_impl(data).await
    }

    async fn enroll_student(
        &self,
        student_id: i64,
        course_codes: Vec<String>,
    ) -> Result<Vec<Inscription>> {
        self.enroll_student_impl(student_id, course_codes).await
    }

    async fn get_person_by_id(&self, kind: PersonKind, id: i64) -> Result<Option<Person>> {
        self.get_person_by_id_impl(kind, id).await
    }

    async fn get_person_by_ci(&self, kind: PersonKind, ci: &str) -> Result<Option<Person>> {
        self.get_person_by_ci_impl(kind, ci).await
    }

    async fn list_persons(&self, kind: PersonKind) -> Result<Vec<Person>> {
        self.list_persons_impl(kind).await
    }

    // 教研室模块
    async fn create_cathedra(&self, req: CreateCathedraRequest) -> Result<Cathedra> {
        self.create_cathedra_impl(req).await
    }

    async fn create_cathedras(&self, reqs: Vec<CreateCathedraRequest>) -> Result<Vec<Cathedra>> {
        self.create_cathedras_impl(reqs).await
    }

    async fn get_cathedra_by_id(&self, id: i64) -> Result<Option<Cathedra>> {
        self.get_cathedra_by_id_impl(id).await
    }

    async fn get_cathedra_by_code(&self, code: &str) -> Result<Option<Cathedra>> {
        self.get_cathedra_by_code_impl(code).await
    }

    async fn list_cathedras(&self) -> Result<Vec<Cathedra>> {
        self.list_cathedras_impl().await
    }

    async fn list_cathedra_professors(&self, cathedra_id: i64) -> Result<Vec<Person>> {
        self.list_cathedra_professors_impl(cathedra_id).await
    }

    // 课程模块
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(req).await
    }

    async fn create_courses(&self, reqs: Vec<CreateCourseRequest>) -> Result<Vec<Course>> {
        self.create_courses_impl(reqs).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(code).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    // 选课、考核与成绩模块
    async fn create_inscription(&self, student_id: i64, course_id: i64) -> Result<Inscription> {
        self.create_inscription_impl(student_id, course_id).await
    }

    async fn create_evaluation(&self, req: CreateEvaluationRequest) -> Result<Evaluation> {
        self.create_evaluation_impl(req).await
    }

    async fn record_grade(&self, req: RecordGradeRequest) -> Result<RecordedGrade> {
        self.record_grade_impl(req).await
    }

    async fn list_course_evaluations(&self, course_id: i64) -> Result<Vec<Evaluation>> {
        self.list_course_evaluations_impl(course_id).await
    }

    async fn list_student_grades(&self, student_id: i64) -> Result<Vec<Grade>> {
        self.list_student_grades_impl(student_id).await
    }
}

/// 测试用数据构造
#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::persons::entities::{Career, PersonalData};
    use crate::models::users::{entities::UserRole, requests::NewUser};

    pub fn personal(full_name: &str, ci: &str) -> PersonalData {
        PersonalData {
            full_name: full_name.to_string(),
            ci: ci.to_string(),
            phone_number: Some("0414-0000000".to_string()),
            age: 35,
            nationality: Some("VE".to_string()),
            residence: Some("Caracas".to_string()),
            career: Career::Fisica,
        }
    }

    pub fn account(email: &str, password: &str, role: UserRole) -> NewUser {
        NewUser::hashed(email.to_string(), password, role, None).unwrap()
    }

    pub fn cathedra(name: &str, code: &str) -> crate::models::cathedras::requests::CreateCathedraRequest {
        crate::models::cathedras::requests::CreateCathedraRequest {
            name: name.to_string(),
            code: code.to_string(),
            credits: 4,
            career: Career::Fisica,
        }
    }

    pub fn course(
        code: &str,
        cathedra_code: &str,
        professor_ci: &str,
    ) -> crate::models::courses::requests::CreateCourseRequest {
        crate::models::courses::requests::CreateCourseRequest {
            title: format!("Course {code}"),
            code: code.to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            active: true,
            cathedra_code: cathedra_code.to_string(),
            professor_ci: professor_ci.to_string(),
        }
    }
}
