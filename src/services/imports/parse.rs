//! 上传文件读取与表格解析

use actix_multipart::Multipart;
use calamine::{Data, Reader, Xlsx};
use futures_util::StreamExt;
use std::io::Cursor;
use tracing::warn;

use crate::errors::{RecordsError, Result};

/// XLSX 是 zip 容器
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

const CSV_PARSE_FAILED: &str = "CSV file could not be parsed";
const XLSX_PARSE_FAILED: &str = "XLSX workbook could not be parsed";

/// 上传的文件
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 表格中的一行（不含表头）
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 所在工作表，CSV 为空
    pub sheet: String,
    /// 1 起始的行号，含表头
    pub line: usize,
    pub cells: Vec<String>,
}

pub enum UploadError {
    TooLarge,
    Invalid(String),
}

pub async fn read_file_from_multipart(
    payload: &mut Multipart,
    max_size: usize,
) -> std::result::Result<Upload, UploadError> {
    let mut bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadError::Invalid(format!("读取字段失败: {e}")))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            if let Some(content_disposition) = field.content_disposition() {
                file_name = content_disposition
                    .get_filename()
                    .unwrap_or("upload.csv")
                    .to_string();
            }

            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| UploadError::Invalid(format!("读取数据失败: {e}")))?;
                if bytes.len() + data.len() > max_size {
                    return Err(UploadError::TooLarge);
                }
                bytes.extend_from_slice(&data);
            }
        }
    }

    if bytes.is_empty() {
        return Err(UploadError::Invalid("未找到文件字段或文件为空".to_string()));
    }

    Ok(Upload { file_name, bytes })
}

/// 按扩展名或文件头判断格式
pub fn parse_upload(upload: &Upload) -> Result<Vec<SheetRow>> {
    if upload.file_name.to_lowercase().ends_with(".xlsx") || upload.bytes.starts_with(ZIP_MAGIC) {
        parse_xlsx(&upload.bytes)
    } else {
        parse_csv(&upload.bytes)
    }
}

fn is_blank(cells: &[String]) -> bool {
    cells.iter().all(|c| c.is_empty())
}

pub fn parse_csv(data: &[u8]) -> Result<Vec<SheetRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(data));

    let mut rows = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            warn!("CSV 第 {} 行解析失败: {e}", index + 2);
            RecordsError::import_parse(CSV_PARSE_FAILED)
        })?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if is_blank(&cells) {
            continue;
        }
        rows.push(SheetRow {
            sheet: String::new(),
            line: index + 2,
            cells,
        });
    }

    Ok(rows)
}

/// 读取工作簿中所有工作表，每个工作表跳过第一行
pub fn parse_xlsx(data: &[u8]) -> Result<Vec<SheetRow>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data)).map_err(|e| {
        warn!("打开 XLSX 失败: {e}");
        RecordsError::import_parse(XLSX_PARSE_FAILED)
    })?;

    let mut rows = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            warn!("读取工作表 {sheet_name} 失败: {e}");
            RecordsError::import_parse(XLSX_PARSE_FAILED)
        })?;
        let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

        for (offset, row) in range.rows().enumerate().skip(1) {
            let cells: Vec<String> = row.iter().map(cell_to_string).collect();
            if is_blank(&cells) {
                continue;
            }
            rows.push(SheetRow {
                sheet: sheet_name.clone(),
                line: first_line + offset,
                cells,
            });
        }
    }

    Ok(rows)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::DateTimeIso(s) => s.chars().take(10).collect(),
        other => other.to_string().trim().to_string(),
    }
}

/// Excel 日期序列号（1900 日期系统）转 YYYY-MM-DD
fn excel_serial_to_date(serial: f64) -> String {
    let epoch = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    epoch
        .checked_add_signed(chrono::Duration::days(serial.trunc() as i64))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// 解析关联代码列：`[MAT1, FIS2]`、`MAT1, FIS2`、`[]` 或空白
pub fn parse_related_codes(cell: &str) -> Vec<String> {
    let inner = cell.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    inner
        .split(',')
        .map(|code| code.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_codes() {
        assert_eq!(parse_related_codes("[MAT1, FIS2]"), vec!["MAT1", "FIS2"]);
        assert_eq!(parse_related_codes("['MAT1','FIS2']"), vec!["MAT1", "FIS2"]);
        assert_eq!(parse_related_codes("MAT1"), vec!["MAT1"]);
        assert!(parse_related_codes("[]").is_empty());
        assert!(parse_related_codes("   ").is_empty());
        assert!(parse_related_codes("").is_empty());
    }

    #[test]
    fn test_csv_skips_header_and_blank_rows() {
        let data = "name,code,credits,career\nMecánica,MEC1,4,fisica\n,,,\nÓptica, OPT1 ,3,1\n";
        let rows = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].cells, vec!["Mecánica", "MEC1", "4", "fisica"]);
        assert_eq!(rows[1].line, 4);
        assert_eq!(rows[1].cells[1], "OPT1");
    }

    #[test]
    fn test_csv_quoted_list_cell() {
        let data = "full_name,ci,courses\nEva,V-7,\"[C1, C2]\"\n";
        let rows = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(parse_related_codes(&rows[0].cells[2]), vec!["C1", "C2"]);
    }

    #[test]
    fn test_excel_serial_date() {
        assert_eq!(excel_serial_to_date(45_717.0), "2025-03-01");
    }

    #[test]
    fn test_xlsx_skips_header_of_every_sheet() {
        let mut workbook = rust_xlsxwriter::Workbook::new();

        let fisica = workbook.add_worksheet();
        fisica.set_name("Fisica").unwrap();
        for (col, header) in ["name", "code", "credits", "career"].iter().enumerate() {
            fisica.write_string(0, col as u16, *header).unwrap();
        }
        fisica.write_string(1, 0, "Mecánica").unwrap();
        fisica.write_string(1, 1, "MEC1").unwrap();
        fisica.write_number(1, 2, 4.0).unwrap();
        fisica.write_number(1, 3, 1.0).unwrap();

        let quimica = workbook.add_worksheet();
        quimica.set_name("Quimica").unwrap();
        for (col, header) in ["name", "code", "credits", "career"].iter().enumerate() {
            quimica.write_string(0, col as u16, *header).unwrap();
        }
        quimica.write_string(1, 0, "Orgánica").unwrap();
        quimica.write_string(1, 1, "ORG1").unwrap();
        quimica.write_number(1, 2, 3.0).unwrap();
        quimica.write_string(1, 3, "quimica").unwrap();
        // 第 3 行留空
        quimica.write_string(3, 0, "Analítica").unwrap();
        quimica.write_string(3, 1, "ANA1").unwrap();
        quimica.write_number(3, 2, 2.0).unwrap();
        quimica.write_number(3, 3, 2.0).unwrap();

        let bytes = workbook.save_to_buffer().unwrap();
        let upload = Upload {
            file_name: "cathedras.bin".to_string(),
            bytes,
        };
        let rows = parse_upload(&upload).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].sheet, "Fisica");
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].cells, vec!["Mecánica", "MEC1", "4", "1"]);
        assert_eq!(rows[1].sheet, "Quimica");
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[1].cells[1], "ORG1");
        assert_eq!(rows[2].sheet, "Quimica");
        assert_eq!(rows[2].line, 4);
        assert_eq!(rows[2].cells[1], "ANA1");
        assert!(rows.iter().all(|r| r.cells[0] != "name"));
    }

    #[test]
    fn test_csv_error_does_not_name_the_row() {
        let mut data = b"name,code,credits,career\nMecanica,MEC1,4,1\n".to_vec();
        data.extend_from_slice(b"Optica,\xff\xfe,3,1\n");

        let err = parse_csv(&data).unwrap_err();
        assert_eq!(err, RecordsError::ImportParse(CSV_PARSE_FAILED.to_string()));
    }

    #[test]
    fn test_garbage_xlsx_is_parse_error() {
        let err = parse_xlsx(b"PK\x03\x04 not really a workbook").unwrap_err();
        assert!(matches!(err, RecordsError::ImportParse(_)));
    }
}
