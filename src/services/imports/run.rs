//! 按导入策略执行写入

use tracing::{info, warn};

use super::{parse::SheetRow, rows};
use crate::errors::{RecordsError, Result};
use crate::models::{
    imports::{ImportPolicy, ImportSummary, ImportTarget},
    users::entities::UserRole,
};
use crate::services::{
    auth::hash_account,
    cathedras::create::validate_cathedra,
    courses::create::validate_course,
    enrollments::grades::validate_grade,
    persons::professors::validate_professor,
};
use crate::storage::Storage;
use crate::utils::validate::validate_personal_data;

/// 执行导入
///
/// 第一处失败即停止；返回给调用方的错误只保留类别，不指明是哪一行。
pub async fn run_import(
    storage: &dyn Storage,
    target: ImportTarget,
    rows: Vec<SheetRow>,
) -> Result<ImportSummary> {
    let total = rows.len();

    let outcome = match target.policy() {
        ImportPolicy::Batch => import_batch(storage, target, &rows).await,
        ImportPolicy::PerRow => import_per_row(storage, target, &rows).await,
        ImportPolicy::PerStep => import_per_step(storage, &rows).await,
    };

    match outcome {
        Ok(created) => Ok(ImportSummary {
            target,
            total,
            created,
        }),
        Err(e) => {
            warn!("Import of {target} rows stopped: {e}");
            Err(e.with_message(format!("Import of {target} rows failed")))
        }
    }
}

fn row_failure(row: &SheetRow, err: RecordsError) -> RecordsError {
    if row.sheet.is_empty() {
        warn!("Import row {} rejected: {}", row.line, err);
    } else {
        warn!("Import row {}!{} rejected: {}", row.sheet, row.line, err);
    }
    err
}

/// 先解析全部行，再在一个事务中写入
async fn import_batch(
    storage: &dyn Storage,
    target: ImportTarget,
    rows: &[SheetRow],
) -> Result<usize> {
    match target {
        ImportTarget::Cathedra => {
            let mut reqs = Vec::with_capacity(rows.len());
            for row in rows {
                let req = rows::cathedra(row)
                    .and_then(|req| validate_cathedra(&req).map(|_| req))
                    .map_err(|e| row_failure(row, e))?;
                reqs.push(req);
            }
            Ok(storage.create_cathedras(reqs).await?.len())
        }
        ImportTarget::Course => {
            let mut reqs = Vec::with_capacity(rows.len());
            for row in rows {
                let req = rows::course(row)
                    .and_then(|req| validate_course(&req).map(|_| req))
                    .map_err(|e| row_failure(row, e))?;
                reqs.push(req);
            }
            Ok(storage.create_courses(reqs).await?.len())
        }
        other => Err(RecordsError::validation(format!(
            "{other} rows are not imported as a batch"
        ))),
    }
}

/// 每行先提交实体，再在第二个事务中提交关联代码
async fn import_per_row(
    storage: &dyn Storage,
    target: ImportTarget,
    rows: &[SheetRow],
) -> Result<usize> {
    let mut created = 0;

    for row in rows {
        match target {
            ImportTarget::Professor => {
                let req = rows::professor(row)
                    .and_then(|req| validate_professor(&req).map(|_| req))
                    .map_err(|e| row_failure(row, e))?;
                let coordinator = req.role == UserRole::Coordinator;
                let account = hash_account(req.email, req.data.ci.clone(), req.role, None)
                    .await
                    .map_err(|e| row_failure(row, e))?;

                let professor = storage
                    .create_professor_record(req.data, account)
                    .await
                    .map_err(|e| row_failure(row, e))?;
                created += 1;

                if !req.cathedras.is_empty() {
                    storage
                        .assign_cathedras(professor.id, req.cathedras, coordinator)
                        .await
                        .map_err(|e| row_failure(row, e))?;
                }
            }
            ImportTarget::Student => {
                let parsed = rows::student(row)
                    .and_then(|parsed| {
                        validate_personal_data(&parsed.request.data)
                            .map_err(RecordsError::validation)?;
                        Ok(parsed)
                    })
                    .map_err(|e| row_failure(row, e))?;

                let student = storage
                    .create_student(parsed.request.data)
                    .await
                    .map_err(|e| row_failure(row, e))?;
                created += 1;

                if !parsed.courses.is_empty() {
                    storage
                        .enroll_student(student.id, parsed.courses)
                        .await
                        .map_err(|e| row_failure(row, e))?;
                }
            }
            other => {
                return Err(RecordsError::validation(format!(
                    "{other} rows are not imported row by row"
                )));
            }
        }
    }

    info!("Committed {created} {target} row(s)");
    Ok(created)
}

/// 成绩：每行先提交考核项，再提交成绩
async fn import_per_step(storage: &dyn Storage, rows: &[SheetRow]) -> Result<usize> {
    let mut created = 0;

    for row in rows {
        let req = rows::grade(row)
            .and_then(|req| validate_grade(&req).map(|_| req))
            .map_err(|e| row_failure(row, e))?;
        storage
            .record_grade(req)
            .await
            .map_err(|e| row_failure(row, e))?;
        created += 1;
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::persons::entities::PersonKind;
    use crate::storage::sea_orm_storage::{
        SeaOrmStorage,
        fixtures::{account, cathedra, course, personal},
    };

    fn sheet(lines: &[&[&str]]) -> Vec<SheetRow> {
        lines
            .iter()
            .enumerate()
            .map(|(i, cells)| SheetRow {
                sheet: "Hoja1".to_string(),
                line: i + 2,
                cells: cells.iter().map(|c| c.to_string()).collect(),
            })
            .collect()
    }

    fn professor_line<'a>(ci: &'a str, email: &'a str, age: &'a str) -> Vec<&'a str> {
        vec![
            "Ana Gómez", ci, "", age, "VE", "Caracas", "fisica", email, "professor", "[]",
        ]
    }

    #[tokio::test]
    async fn test_cathedra_bad_row_persists_nothing() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let rows = sheet(&[
            &["Mecánica", "MEC1", "4", "1"],
            &["Óptica", "OPT1", "3", "1"],
            &["Orgánica", "MEC1", "4", "2"],
            &["Costos", "COS1", "2", "3"],
            &["Auditoría", "AUD1", "2", "3"],
        ]);

        let err = run_import(&storage, ImportTarget::Cathedra, rows).await.unwrap_err();
        assert!(matches!(err, RecordsError::AlreadyExists(_)));
        assert!(storage.list_cathedras().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cathedra_unparsable_row_persists_nothing() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let rows = sheet(&[
            &["Mecánica", "MEC1", "4", "1"],
            &["Óptica", "OPT1", "3", "1"],
            &["Orgánica", "ORG1", "many", "2"],
            &["Costos", "COS1", "2", "3"],
            &["Auditoría", "AUD1", "2", "3"],
        ]);

        let err = run_import(&storage, ImportTarget::Cathedra, rows).await.unwrap_err();
        assert!(matches!(err, RecordsError::Validation(_)));
        assert!(storage.list_cathedras().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cathedra_import_summary() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let rows = sheet(&[&["Mecánica", "MEC1", "4", "1"], &["Óptica", "OPT1", "3", "física"]]);

        let summary = run_import(&storage, ImportTarget::Cathedra, rows).await.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.created, 2);
        assert_eq!(storage.list_cathedras().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_professor_bad_row_keeps_earlier_rows() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let lines = [
            professor_line("V-1", "p1@uni.edu", "40"),
            professor_line("V-2", "p2@uni.edu", "41"),
            professor_line("V-3", "p3@uni.edu", "forty"),
            professor_line("V-4", "p4@uni.edu", "43"),
            professor_line("V-5", "p5@uni.edu", "44"),
        ];
        let refs: Vec<&[&str]> = lines.iter().map(|l| l.as_slice()).collect();

        let err = run_import(&storage, ImportTarget::Professor, sheet(&refs))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::Validation(_)));

        let professors = storage.list_persons(PersonKind::Professor).await.unwrap();
        let cis: Vec<&str> = professors.iter().map(|p| p.data.ci.as_str()).collect();
        assert_eq!(cis, vec!["V-1", "V-2"]);
        assert_eq!(storage.count_users().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_professor_relation_failure_keeps_entity() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_cathedra(cathedra("Mecánica", "MEC1")).await.unwrap();
        let rows = sheet(&[&[
            "Ana Gómez", "V-1", "", "40", "VE", "Caracas", "1", "ana@uni.edu", "coordinator",
            "[MEC1, NOPE]",
        ]]);

        let err = run_import(&storage, ImportTarget::Professor, rows).await.unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));

        let professor = storage
            .get_person_by_ci(PersonKind::Professor, "V-1")
            .await
            .unwrap();
        assert!(professor.is_some());
        let mec = storage.get_cathedra_by_code("MEC1").await.unwrap().unwrap();
        assert_eq!(mec.coordinator_id, None);
        assert!(storage.list_cathedra_professors(mec.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_professor_import_sets_coordinator() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_cathedra(cathedra("Mecánica", "MEC1")).await.unwrap();
        let rows = sheet(&[&[
            "Ana Gómez", "V-1", "", "40", "VE", "Caracas", "1", "ana@uni.edu", "2", "[MEC1]",
        ]]);

        run_import(&storage, ImportTarget::Professor, rows).await.unwrap();

        let professor = storage
            .get_person_by_ci(PersonKind::Professor, "V-1")
            .await
            .unwrap()
            .unwrap();
        let mec = storage.get_cathedra_by_code("MEC1").await.unwrap().unwrap();
        assert_eq!(mec.coordinator_id, Some(professor.id));

        let user = storage.get_user_by_email("ana@uni.edu").await.unwrap().unwrap();
        assert_eq!(user.professor_id, Some(professor.id));
        assert!(user.check_password("V-1"));
    }

    #[tokio::test]
    async fn test_student_import_enrolls() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_cathedra(cathedra("Mecánica", "MEC1")).await.unwrap();
        storage
            .create_professor(personal("Ana", "V-1"), vec![], account("ana@uni.edu", "V-1", UserRole::Professor))
            .await
            .unwrap();
        storage.create_course(course("C1", "MEC1", "V-1")).await.unwrap();

        let rows = sheet(&[
            &["Eva", "V-7", "", "20", "", "", "1", "[C1]"],
            &["Leo", "V-8", "", "21", "", "", "1", ""],
        ]);
        let summary = run_import(&storage, ImportTarget::Student, rows).await.unwrap();
        assert_eq!(summary.created, 2);
        assert_eq!(storage.list_persons(PersonKind::Student).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_student_relation_failure_keeps_entity() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_cathedra(cathedra("Mecánica", "MEC1")).await.unwrap();
        storage
            .create_professor(personal("Ana", "V-1"), vec![], account("ana@uni.edu", "V-1", UserRole::Professor))
            .await
            .unwrap();
        storage.create_course(course("C1", "MEC1", "V-1")).await.unwrap();

        let rows = sheet(&[
            &["Eva", "V-7", "", "20", "", "", "1", "[C1, NOPE]"],
            &["Leo", "V-8", "", "21", "", "", "1", "[C1]"],
        ]);
        let err = run_import(&storage, ImportTarget::Student, rows).await.unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));

        let eva = storage
            .get_person_by_ci(PersonKind::Student, "V-7")
            .await
            .unwrap()
            .unwrap();
        // 关联在独立事务中回滚，C1 的选课也不保留
        assert!(storage.list_student_grades(eva.id).await.unwrap().is_empty());
        let c1 = storage.get_course_by_code("C1").await.unwrap().unwrap();
        let err = storage
            .record_grade(crate::models::enrollments::requests::RecordGradeRequest {
                course_code: c1.code.clone(),
                student_ci: "V-7".to_string(),
                evaluation_name: "Parcial".to_string(),
                percentage: 25,
                value: 18.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));

        // 导入在第一行停止，第二行未写入
        assert!(
            storage
                .get_person_by_ci(PersonKind::Student, "V-8")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_course_unresolved_cathedra_persists_nothing() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_cathedra(cathedra("Mecánica", "MEC1")).await.unwrap();
        storage
            .create_professor(personal("Ana", "V-1"), vec![], account("ana@uni.edu", "V-1", UserRole::Professor))
            .await
            .unwrap();

        let rows = sheet(&[
            &["Mecánica I", "C1", "2025-03-01", "2025-07-15", "1", "MEC1", "V-1"],
            &["Mecánica II", "C2", "2025-03-01", "2025-07-15", "1", "NOPE", "V-1"],
        ]);

        let err = run_import(&storage, ImportTarget::Course, rows).await.unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));
        assert!(storage.list_courses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_grade_import_keeps_earlier_steps() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_cathedra(cathedra("Mecánica", "MEC1")).await.unwrap();
        storage
            .create_professor(personal("Ana", "V-1"), vec![], account("ana@uni.edu", "V-1", UserRole::Professor))
            .await
            .unwrap();
        let c1 = storage.create_course(course("C1", "MEC1", "V-1")).await.unwrap();
        let eva = storage.create_student(personal("Eva", "V-7")).await.unwrap();
        storage.create_student(personal("Leo", "V-8")).await.unwrap();
        storage.enroll_student(eva.id, vec!["C1".to_string()]).await.unwrap();

        let rows = sheet(&[
            &["C1", "V-7", "Parcial 1", "25", "18"],
            &["C1", "V-7", "Parcial 2", "25", "15.5"],
            &["C1", "V-8", "Parcial 1", "25", "12"],
        ]);

        let err = run_import(&storage, ImportTarget::Grade, rows).await.unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));

        assert_eq!(storage.list_student_grades(eva.id).await.unwrap().len(), 2);
        assert_eq!(storage.list_course_evaluations(c1.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_error_does_not_name_the_row() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let rows = sheet(&[&["Mecánica", "MEC1", "4", "biologia"]]);

        let err = run_import(&storage, ImportTarget::Cathedra, rows).await.unwrap_err();
        assert_eq!(err.message(), "Import of cathedra rows failed");
    }
}
