use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储接口
///
/// 每个写方法就是一个事务范围：方法内部的所有步骤要么一起提交，要么一起回滚。
/// 需要多次提交的流程（逐行导入、登记成绩）由调用方组合多个方法完成。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已加盐哈希）
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过关联教授获取账号
    async fn get_user_by_professor_id(&self, professor_id: i64) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 人员管理方法
    // 创建教授：人员、教研室分配、主任设置与关联账号在同一事务中
    async fn create_professor(
        &self,
        data: PersonalData,
        cathedra_codes: Vec<String>,
        account: NewUser,
    ) -> Result<Person>;
    // 仅创建教授与关联账号（不含教研室）
    async fn create_professor_record(&self, data: PersonalData, account: NewUser)
    -> Result<Person>;
    // 为教授分配教研室，coordinator 为真时同时设为主任
    async fn assign_cathedras(
        &self,
        professor_id: i64,
        cathedra_codes: Vec<String>,
        coordinator: bool,
    ) -> Result<Vec<Cathedra>>;
    // 创建学生
    async fn create_student(&self, data: PersonalData) -> Result<Person>;
    // 学生按课程代码选课
    async fn enroll_student(
        &self,
        student_id: i64,
        course_codes: Vec<String>,
    ) -> Result<Vec<Inscription>>;
    async fn get_person_by_id(&self, kind: PersonKind, id: i64) -> Result<Option<Person>>;
    async fn get_person_by_ci(&self, kind: PersonKind, ci: &str) -> Result<Option<Person>>;
    async fn list_persons(&self, kind: PersonKind) -> Result<Vec<Person>>;

    /// 教研室管理方法
    async fn create_cathedra(&self, req: CreateCathedraRequest) -> Result<Cathedra>;
    // 批量创建，任一失败则全部回滚
    async fn create_cathedras(&self, reqs: Vec<CreateCathedraRequest>) -> Result<Vec<Cathedra>>;
    async fn get_cathedra_by_id(&self, id: i64) -> Result<Option<Cathedra>>;
    async fn get_cathedra_by_code(&self, code: &str) -> Result<Option<Cathedra>>;
    async fn list_cathedras(&self) -> Result<Vec<Cathedra>>;
    async fn list_cathedra_professors(&self, cathedra_id: i64) -> Result<Vec<Person>>;

    /// 课程管理方法
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course>;
    // 批量创建，遇到无法解析的引用即中止，不提交
    async fn create_courses(&self, reqs: Vec<CreateCourseRequest>) -> Result<Vec<Course>>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    async fn list_courses(&self) -> Result<Vec<Course>>;

    /// 选课、考核与成绩
    async fn create_inscription(&self, student_id: i64, course_id: i64) -> Result<Inscription>;
    async fn create_evaluation(&self, req: CreateEvaluationRequest) -> Result<Evaluation>;
    // 先提交考核项，再提交成绩（两次独立提交）
    async fn record_grade(&self, req: RecordGradeRequest) -> Result<RecordedGrade>;
    async fn list_course_evaluations(&self, course_id: i64) -> Result<Vec<Evaluation>>;
    async fn list_student_grades(&self, student_id: i64) -> Result<Vec<Grade>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
