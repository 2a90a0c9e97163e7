//! 选课、考核与成绩存储操作

use super::SeaOrmStorage;
use super::persons::{find_person_by_ci, find_person_by_id};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::evaluations::{
    ActiveModel as EvaluationActiveModel, Column as EvaluationColumn, Entity as Evaluations,
};
use crate::entity::grades::{ActiveModel as GradeActiveModel, Column as GradeColumn, Entity as Grades};
use crate::entity::inscriptions::{
    ActiveModel as InscriptionActiveModel, Column as InscriptionColumn, Entity as Inscriptions,
};
use crate::errors::{RecordsError, Result};
use crate::models::{
    enrollments::{
        entities::{Evaluation, Grade, Inscription},
        requests::{CreateEvaluationRequest, RecordGradeRequest},
        responses::RecordedGrade,
    },
    persons::entities::PersonKind,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

impl SeaOrmStorage {
    /// 创建选课记录，不做重复检查
    pub async fn create_inscription_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Inscription> {
        if find_person_by_id(&self.db, PersonKind::Student, student_id)
            .await?
            .is_none()
        {
            return Err(RecordsError::not_found(format!(
                "Student {student_id} not found"
            )));
        }
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Err(RecordsError::not_found(format!(
                "Course {course_id} not found"
            )));
        }

        let result = InscriptionActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| RecordsError::from_db("创建选课记录失败", e))?;

        Ok(result.into_inscription())
    }

    /// 创建考核项，不校验百分比总和
    pub async fn create_evaluation_impl(&self, req: CreateEvaluationRequest) -> Result<Evaluation> {
        if self.get_course_by_id_impl(req.course_id).await?.is_none() {
            return Err(RecordsError::not_found(format!(
                "Course {} not found",
                req.course_id
            )));
        }

        let result = EvaluationActiveModel {
            name: Set(req.name),
            percentage: Set(req.percentage),
            course_id: Set(req.course_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| RecordsError::from_db("创建考核项失败", e))?;

        Ok(result.into_evaluation())
    }

    /// 登记成绩
    ///
    /// 选课记录只按学生查找（取 id 最小的一条），不限定课程。
    /// 考核项与成绩分两次提交，第二步失败会留下孤立的考核项。
    pub async fn record_grade_impl(&self, req: RecordGradeRequest) -> Result<RecordedGrade> {
        let course = Courses::find()
            .filter(CourseColumn::Code.eq(req.course_code.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询课程失败", e))?
            .ok_or_else(|| RecordsError::not_found(format!("Course {} not found", req.course_code)))?;

        let student = find_person_by_ci(&self.db, PersonKind::Student, &req.student_ci)
            .await?
            .ok_or_else(|| {
                RecordsError::not_found(format!("Student {} not found", req.student_ci))
            })?;

        let inscription = Inscriptions::find()
            .filter(InscriptionColumn::StudentId.eq(student.id))
            .order_by_asc(InscriptionColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询选课记录失败", e))?
            .ok_or_else(|| {
                RecordsError::not_found(format!("Student {} is not enrolled", req.student_ci))
            })?;

        // 第一次提交
        let evaluation = EvaluationActiveModel {
            name: Set(req.evaluation_name),
            percentage: Set(req.percentage),
            course_id: Set(course.id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| RecordsError::from_db("创建考核项失败", e))?;

        // 第二次提交
        let grade = GradeActiveModel {
            value: Set(req.value),
            student_id: Set(student.id),
            evaluation_id: Set(evaluation.id),
            inscription_id: Set(inscription.id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| RecordsError::from_db("登记成绩失败", e))?;

        info!(
            "Grade {} recorded for student {} in course {}",
            grade.value, req.student_ci, req.course_code
        );

        Ok(RecordedGrade {
            evaluation: evaluation.into_evaluation(),
            grade: grade.into_grade(),
        })
    }

    pub async fn list_course_evaluations_impl(&self, course_id: i64) -> Result<Vec<Evaluation>> {
        let evaluations = Evaluations::find()
            .filter(EvaluationColumn::CourseId.eq(course_id))
            .order_by_asc(EvaluationColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询考核项失败", e))?;

        Ok(evaluations.into_iter().map(|m| m.into_evaluation()).collect())
    }

    pub async fn list_student_grades_impl(&self, student_id: i64) -> Result<Vec<Grade>> {
        let grades = Grades::find()
            .filter(GradeColumn::StudentId.eq(student_id))
            .order_by_asc(GradeColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::from_db("查询成绩失败", e))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }
}
