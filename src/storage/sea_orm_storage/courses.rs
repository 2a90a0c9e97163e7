//! 课程存储操作

use super::SeaOrmStorage;
use super::persons::find_person_by_ci;
use crate::entity::cathedras::{Column as CathedraColumn, Entity as Cathedras};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{RecordsError, Result};
use crate::models::{
    courses::{entities::Course, requests::CreateCourseRequest},
    persons::entities::PersonKind,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

/// 解析教研室代码与教授身份证号后插入课程
async fn insert_course<C: ConnectionTrait>(conn: &C, req: CreateCourseRequest) -> Result<Course> {
    let cathedra = Cathedras::find()
        .filter(CathedraColumn::Code.eq(req.cathedra_code.as_str()))
        .one(conn)
        .await
        .map_err(|e| RecordsError::from_db("查询教研室失败", e))?
        .ok_or_else(|| {
            RecordsError::not_found(format!("Cathedra {} not found", req.cathedra_code))
        })?;

    let professor = find_person_by_ci(conn, PersonKind::Professor, &req.professor_ci)
        .await?
        .ok_or_else(|| {
            RecordsError::not_found(format!("Professor {} not found", req.professor_ci))
        })?;

    let model = ActiveModel {
        title: Set(req.title),
        code: Set(req.code),
        start_date: Set(req.start_date),
        end_date: Set(req.end_date),
        active: Set(req.active),
        cathedra_id: Set(cathedra.id),
        professor_id: Set(professor.id),
        ..Default::default()
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| RecordsError::from_db("创建课程失败", e))?;

    Ok(result.into_course())
}

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let course = insert_course(&self.db, req).await?;
        info!("Course {} created", course.code);
        Ok(course)
    }

    /// 批量创建课程，单一事务；出错时事务不提交
    pub async fn create_courses_impl(&self, reqs: Vec<CreateCourseRequest>) -> Result<Vec<Course>> {
        let txn = self.begin().await?;

        let mut created = Vec::with_capacity(reqs.len());
        for req in reqs {
            created.push(insert_course(&txn, req).await?);
        }

        txn.commit()
            .await
            .map_err(|e| RecordsError::from_db("提交事务失败", e))?;

        Ok(created)
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询课程失败", e))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn get_course_by_code_impl(&self, code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询课程失败", e))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询课程列表失败", e))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{account, cathedra, course, personal};
    use super::*;
    use crate::models::users::entities::UserRole;

    async fn seeded() -> SeaOrmStorage {
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
        storage
    }

    #[tokio::test]
    async fn test_create_course_resolves_references() {
        let storage = seeded().await;
        let created = storage
            .create_course_impl(course("MEC1-A", "MEC1", "V-1"))
            .await
            .unwrap();

        let found = storage
            .get_course_by_code_impl("MEC1-A")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.start_date, chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(found.end_date, chrono::NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());
        assert!(found.active);
    }

    #[tokio::test]
    async fn test_unknown_references_are_not_found() {
        let storage = seeded().await;
        let err = storage
            .create_course_impl(course("X", "NOPE", "V-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));

        let err = storage
            .create_course_impl(course("X", "MEC1", "V-404"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_student_ci_is_not_a_professor() {
        let storage = seeded().await;
        storage
            .create_student_impl(personal("Eva", "V-7"))
            .await
            .unwrap();
        let err = storage
            .create_course_impl(course("X", "MEC1", "V-7"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_batch_aborts_without_commit() {
        let storage = seeded().await;
        let err = storage
            .create_courses_impl(vec![
                course("C1", "MEC1", "V-1"),
                course("C2", "MISSING", "V-1"),
                course("C3", "MEC1", "V-1"),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, RecordsError::NotFound(_)));
        assert!(storage.list_courses_impl().await.unwrap().is_empty());
    }
}
