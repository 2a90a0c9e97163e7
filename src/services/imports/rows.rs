//! 表格行到创建请求的转换（按列位置）

use chrono::NaiveDate;

use super::parse::{SheetRow, parse_related_codes};
use crate::errors::{RecordsError, Result};
use crate::models::{
    cathedras::requests::CreateCathedraRequest,
    courses::requests::CreateCourseRequest,
    enrollments::requests::RecordGradeRequest,
    imports::ImportTarget,
    persons::{
        entities::{Career, PersonalData},
        requests::{CreateProfessorRequest, CreateStudentRequest},
    },
    users::entities::UserRole,
};

/// 学生行：个人信息与选课代码
#[derive(Debug, Clone)]
pub struct StudentRow {
    pub request: CreateStudentRequest,
    pub courses: Vec<String>,
}

/// 按目标列数规整一行：去掉行尾空单元格，缺少的列视为空
pub fn shape<'a>(target: ImportTarget, row: &'a SheetRow) -> Result<Vec<&'a str>> {
    let mut cells: Vec<&str> = row.cells.iter().map(|c| c.trim()).collect();
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }

    let expected = target.column_count();
    if cells.len() > expected {
        return Err(RecordsError::validation(format!(
            "Row {} has {} cells, expected {expected}",
            row.line,
            cells.len()
        )));
    }
    cells.resize(expected, "");
    Ok(cells)
}

fn required<'a>(value: &'a str, column: &str) -> Result<&'a str> {
    if value.is_empty() {
        Err(RecordsError::validation(format!("Column {column} is empty")))
    } else {
        Ok(value)
    }
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// 整数列；XLSX 的数字单元格可能带 `.0`
fn integer(value: &str, column: &str) -> Result<i32> {
    let value = required(value, column)?;
    if let Ok(n) = value.parse::<i32>() {
        return Ok(n);
    }
    match value.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => Ok(f as i32),
        _ => Err(RecordsError::validation(format!(
            "Column {column} is not an integer: {value}"
        ))),
    }
}

/// 小数；逗号只能作为唯一的小数点，不接受千位分隔符。
/// 逗号后恰好三位数字（如 `1,000`）有歧义，按错误处理。
fn number(value: &str, column: &str) -> Result<f64> {
    let value = required(value, column)?;
    let invalid = || RecordsError::validation(format!("Column {column} is not a number: {value}"));

    let normalized = match value.matches(',').count() {
        0 => value.to_string(),
        1 if !value.contains('.') => {
            let fraction = value.rsplit(',').next().unwrap_or_default();
            if fraction.len() == 3 && fraction.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            value.replacen(',', ".", 1)
        }
        _ => return Err(invalid()),
    };
    normalized.parse::<f64>().map_err(|_| invalid())
}

fn date(value: &str, column: &str) -> Result<NaiveDate> {
    let value = required(value, column)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| RecordsError::validation(format!("Column {column} is not a date: {e}")))
}

fn flag(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "" | "true" | "1" | "1.0" | "yes" | "si" | "sí" => Ok(true),
        "false" | "0" | "0.0" | "no" => Ok(false),
        other => Err(RecordsError::validation(format!("Invalid active flag: {other}"))),
    }
}

fn career(value: &str) -> Result<Career> {
    required(value, "career")?
        .parse::<Career>()
        .map_err(RecordsError::validation)
}

fn personal_data(cells: &[&str]) -> Result<PersonalData> {
    Ok(PersonalData {
        full_name: required(cells[0], "full_name")?.to_string(),
        ci: required(cells[1], "ci")?.to_string(),
        phone_number: optional(cells[2]),
        age: integer(cells[3], "age")?,
        nationality: optional(cells[4]),
        residence: optional(cells[5]),
        career: career(cells[6])?,
    })
}

// name, code, credits, career
pub fn cathedra(row: &SheetRow) -> Result<CreateCathedraRequest> {
    let cells = shape(ImportTarget::Cathedra, row)?;
    Ok(CreateCathedraRequest {
        name: required(cells[0], "name")?.to_string(),
        code: required(cells[1], "code")?.to_string(),
        credits: integer(cells[2], "credits")?,
        career: career(cells[3])?,
    })
}

// full_name, ci, phone_number, age, nationality, residence, career, email, role, cathedras
pub fn professor(row: &SheetRow) -> Result<CreateProfessorRequest> {
    let cells = shape(ImportTarget::Professor, row)?;
    Ok(CreateProfessorRequest {
        data: personal_data(&cells)?,
        email: required(cells[7], "email")?.to_string(),
        role: required(cells[8], "role")?
            .parse::<UserRole>()
            .map_err(RecordsError::validation)?,
        cathedras: parse_related_codes(cells[9]),
    })
}

// full_name, ci, phone_number, age, nationality, residence, career, courses
pub fn student(row: &SheetRow) -> Result<StudentRow> {
    let cells = shape(ImportTarget::Student, row)?;
    Ok(StudentRow {
        request: CreateStudentRequest {
            data: personal_data(&cells)?,
        },
        courses: parse_related_codes(cells[7]),
    })
}

// title, code, start_date, end_date, active, cathedra_code, professor_ci
pub fn course(row: &SheetRow) -> Result<CreateCourseRequest> {
    let cells = shape(ImportTarget::Course, row)?;
    Ok(CreateCourseRequest {
        title: required(cells[0], "title")?.to_string(),
        code: required(cells[1], "code")?.to_string(),
        start_date: date(cells[2], "start_date")?,
        end_date: date(cells[3], "end_date")?,
        active: flag(cells[4])?,
        cathedra_code: required(cells[5], "cathedra_code")?.to_string(),
        professor_ci: required(cells[6], "professor_ci")?.to_string(),
    })
}

// course_code, student_ci, evaluation_name, percentage, value
pub fn grade(row: &SheetRow) -> Result<RecordGradeRequest> {
    let cells = shape(ImportTarget::Grade, row)?;
    Ok(RecordGradeRequest {
        course_code: required(cells[0], "course_code")?.to_string(),
        student_ci: required(cells[1], "student_ci")?.to_string(),
        evaluation_name: required(cells[2], "evaluation_name")?.to_string(),
        percentage: integer(cells[3], "percentage")?,
        value: number(cells[4], "value")?,
    })
}
