//! 人员存储操作（教授与学生）

use super::SeaOrmStorage;
use super::cathedras::assign_cathedras_in;
use super::users::insert_user;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::inscriptions::ActiveModel as InscriptionActiveModel;
use crate::entity::persons::{ActiveModel, Column, Entity as Persons, Model};
use crate::errors::{RecordsError, Result};
use crate::models::{
    cathedras::entities::Cathedra,
    enrollments::entities::Inscription,
    persons::entities::{Person, PersonKind, PersonalData},
    users::{entities::UserRole, requests::NewUser},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

/// 插入人员记录
pub(super) async fn insert_person<C: ConnectionTrait>(
    conn: &C,
    kind: PersonKind,
    data: PersonalData,
) -> Result<Person> {
    let model = ActiveModel {
        kind: Set(kind.to_string()),
        full_name: Set(data.full_name),
        ci: Set(data.ci),
        phone_number: Set(data.phone_number),
        age: Set(data.age),
        nationality: Set(data.nationality),
        residence: Set(data.residence),
        career: Set(data.career.to_string()),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| RecordsError::from_db(&format!("创建{kind}失败"), e))?;

    Ok(result.into_person())
}

/// 按身份证号查找指定类型的人员
pub(super) async fn find_person_by_ci<C: ConnectionTrait>(
    conn: &C,
    kind: PersonKind,
    ci: &str,
) -> Result<Option<Model>> {
    Persons::find()
        .filter(Column::Ci.eq(ci))
        .filter(Column::Kind.eq(kind.to_string()))
        .one(conn)
        .await
        .map_err(|e| RecordsError::from_db("查询人员失败", e))
}

/// 按 id 查找指定类型的人员
pub(super) async fn find_person_by_id<C: ConnectionTrait>(
    conn: &C,
    kind: PersonKind,
    id: i64,
) -> Result<Option<Model>> {
    Persons::find_by_id(id)
        .filter(Column::Kind.eq(kind.to_string()))
        .one(conn)
        .await
        .map_err(|e| RecordsError::from_db("查询人员失败", e))
}

impl SeaOrmStorage {
    /// 创建教授：人员、教研室分配、主任设置与关联账号，一个事务
    pub async fn create_professor_impl(
        &self,
        data: PersonalData,
        cathedra_codes: Vec<String>,
        account: NewUser,
    ) -> Result<Person> {
        let txn = self.begin().await?;

        let professor = insert_person(&txn, PersonKind::Professor, data).await?;
        let coordinator = account.role == UserRole::Coordinator;
        assign_cathedras_in(&txn, professor.id, &cathedra_codes, coordinator).await?;
        insert_user(
            &txn,
            NewUser {
                professor_id: Some(professor.id),
                ..account
            },
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| RecordsError::from_db("提交事务失败", e))?;

        info!(
            "Professor {} created with {} cathedra(s)",
            professor.data.ci,
            cathedra_codes.len()
        );
        Ok(professor)
    }

    /// 创建教授与关联账号（不含教研室分配）
    pub async fn create_professor_record_impl(
        &self,
        data: PersonalData,
        account: NewUser,
    ) -> Result<Person> {
        let txn = self.begin().await?;

        let professor = insert_person(&txn, PersonKind::Professor, data).await?;
        insert_user(
            &txn,
            NewUser {
                professor_id: Some(professor.id),
                ..account
            },
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| RecordsError::from_db("提交事务失败", e))?;

        Ok(professor)
    }

    /// 为已有教授分配教研室，独立事务
    pub async fn assign_cathedras_impl(
        &self,
        professor_id: i64,
        cathedra_codes: Vec<String>,
        coordinator: bool,
    ) -> Result<Vec<Cathedra>> {
        let txn = self.begin().await?;

        if find_person_by_id(&txn, PersonKind::Professor, professor_id)
            .await?
            .is_none()
        {
            return Err(RecordsError::not_found(format!(
                "Professor {professor_id} not found"
            )));
        }
        let cathedras = assign_cathedras_in(&txn, professor_id, &cathedra_codes, coordinator).await?;

        txn.commit()
            .await
            .map_err(|e| RecordsError::from_db("提交事务失败", e))?;

        Ok(cathedras)
    }

    /// 创建学生，不创建账号
    pub async fn create_student_impl(&self, data: PersonalData) -> Result<Person> {
        let student = insert_person(&self.db, PersonKind::Student, data).await?;
        info!("Student {} created", student.data.ci);
        Ok(student)
    }

    /// 学生按课程代码选课，独立事务；任一课程不存在则全部回滚
    pub async fn enroll_student_impl(
        &self,
        student_id: i64,
        course_codes: Vec<String>,
    ) -> Result<Vec<Inscription>> {
        let txn = self.begin().await?;

        if find_person_by_id(&txn, PersonKind::Student, student_id)
            .await?
            .is_none()
        {
            return Err(RecordsError::not_found(format!(
                "Student {student_id} not found"
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let mut inscriptions = Vec::with_capacity(course_codes.len());
        for code in &course_codes {
            let course = Courses::find()
                .filter(CourseColumn::Code.eq(code.as_str()))
                .one(&txn)
                .await
                .map_err(|e| RecordsError::from_db("查询课程失败", e))?
                .ok_or_else(|| RecordsError::not_found(format!("Course {code} not found")))?;

            let inscription = InscriptionActiveModel {
                student_id: Set(student_id),
                course_id: Set(course.id),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| RecordsError::from_db("创建选课记录失败", e))?;

            inscriptions.push(inscription.into_inscription());
        }

        txn.commit()
            .await
            .map_err(|e| RecordsError::from_db("提交事务失败", e))?;

        Ok(inscriptions)
    }

    pub async fn get_person_by_id_impl(&self, kind: PersonKind, id: i64) -> Result<Option<Person>> {
        Ok(find_person_by_id(&self.db, kind, id)
            .await?
            .map(|m| m.into_person()))
    }

    pub async fn get_person_by_ci_impl(&self, kind: PersonKind, ci: &str) -> Result<Option<Person>> {
        Ok(find_person_by_ci(&self.db, kind, ci)
            .await?
            .map(|m| m.into_person()))
    }

    pub async fn list_persons_impl(&self, kind: PersonKind) -> Result<Vec<Person>> {
        let persons = Persons::find()
            .filter(Column::Kind.eq(kind.to_string()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询人员列表失败", e))?;

        Ok(persons.into_iter().map(|m| m.into_person()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{account, cathedra, course, personal};
    use super::*;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_coordinator_is_set_on_cathedra() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_cathedra_impl(cathedra("Mecánica", "MEC1"))
            .await
            .unwrap();

        let professor = storage
            .create_professor_impl(
                personal("Ana Gómez", "V-1"),
                vec!["MEC1".to_string()],
                account("ana@uni.edu", "V-1", UserRole::Coordinator),
            )
            .await
            .unwrap();

        let cathedra = storage
            .get_cathedra_by_code_impl("MEC1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cathedra.coordinator_id, Some(professor.id));

        let professors = storage
            .list_cathedra_professors_impl(cathedra.id)
            .await
            .unwrap();
        assert_eq!(professors.len(), 1);
        assert_eq!(professors[0].data.ci, "V-1");

        let user = storage
            .get_user_by_email_impl("ana@uni.edu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.professor_id, Some(professor.id));
        assert!(user.check_password("V-1"));
    }

    #[tokio::test]
    async fn test_plain_professor_does_not_become_coordinator() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_cathedra_impl(cathedra("Óptica", "OPT1"))
            .await
            .unwrap();
        storage
            .create_professor_impl(
                personal("Luis Rey", "V-2"),
                vec!["OPT1".to_string()],
                account("luis@uni.edu", "V-2", UserRole::Professor),
            )
            .await
            .unwrap();

        let cathedra = storage
            .get_cathedra_by_code_impl("OPT1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cathedra.coordinator_id, None);
    }

    #[tokio::test]
    async fn test_last_coordinator_wins() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_cathedra_impl(cathedra("Química Orgánica", "QO1"))
            .await
            .unwrap();
        storage
            .create_professor_impl(
                personal("Primero", "V-10"),
                vec!["QO1".to_string()],
                account("p1@uni.edu", "V-10", UserRole::Coordinator),
            )
            .await
            .unwrap();
        let second = storage
            .create_professor_impl(
                personal("Segundo", "V-11"),
                vec!["QO1".to_string()],
                account("p2@uni.edu", "V-11", UserRole::Coordinator),
            )
            .await
            .unwrap();

        let cathedra = storage
            .get_cathedra_by_code_impl("QO1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cathedra.coordinator_id, Some(second.id));
    }

    #[tokio::test]
    async fn test_unknown_cathedra_rolls_back_professor() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let err = storage
            .create_professor_impl(
                personal("Ana Gómez", "V-1"),
                vec!["NOPE".to_string()],
                account("ana@uni.edu", "V-1", UserRole::Professor),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, RecordsError::NotFound(_)));
        assert!(
            storage
                .get_person_by_ci_impl(PersonKind::Professor, "V-1")
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(storage.count_users_impl().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_ci_is_already_exists() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_student_impl(personal("Eva", "V-7"))
            .await
            .unwrap();
        let err = storage
            .create_student_impl(personal("Eva bis", "V-7"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_kind_separates_lookups() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let student = storage
            .create_student_impl(personal("Eva", "V-7"))
            .await
            .unwrap();

        assert!(student.is_student());
        assert!(
            storage
                .get_person_by_id_impl(PersonKind::Professor, student.id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(
            storage
                .list_persons_impl(PersonKind::Student)
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(
            storage
                .list_persons_impl(PersonKind::Professor)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_enroll_student_is_atomic() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_cathedra_impl(cathedra("Mecánica", "MEC1"))
            .await
            .unwrap();
        storage
            .create_professor_impl(
                personal("Ana", "V-1"),
                vec![],
                account("ana@uni.edu", "V-1", UserRole::Professor),
            )
            .await
            .unwrap();
        let course = storage
            .create_course_impl(course("MEC1-2025", "MEC1", "V-1"))
            .await
            .unwrap();
        let student = storage
            .create_student_impl(personal("Eva", "V-7"))
            .await
            .unwrap();

        let err = storage
            .enroll_student_impl(
                student.id,
                vec!["MEC1-2025".to_string(), "MISSING".to_string()],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));
        let leftover = crate::entity::inscriptions::Entity::find()
            .count(&storage.db)
            .await
            .unwrap();
        assert_eq!(leftover, 0);

        let inscriptions = storage
            .enroll_student_impl(student.id, vec!["MEC1-2025".to_string()])
            .await
            .unwrap();
        assert_eq!(inscriptions.len(), 1);
        assert_eq!(inscriptions[0].course_id, course.id);
    }
}
