//! 批量导入服务
//!
//! 支持 CSV 与 XLSX（所有工作表），每个工作表第一行为表头。
//! 各目标的事务粒度由 `ImportTarget::policy` 决定。

pub mod parse;
pub mod rows;
pub mod run;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::RecordsError;
use crate::models::{ApiResponse, ErrorCode, imports::ImportTarget};
use crate::services::error_response;
use crate::storage::Storage;

pub struct ImportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ImportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 导入上传的表格
    pub async fn import(
        &self,
        target: &str,
        mut payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let target = match target.parse::<ImportTarget>() {
            Ok(target) => target,
            Err(msg) => {
                return Ok(error_response(
                    &RecordsError::validation(msg),
                    ErrorCode::ImportFailed,
                ));
            }
        };

        let config = &AppConfig::get().import;
        let upload = match parse::read_file_from_multipart(&mut payload, config.max_file_size).await
        {
            Ok(upload) => upload,
            Err(parse::UploadError::TooLarge) => {
                return Ok(HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    format!("File exceeds limit of {} bytes", config.max_file_size),
                )));
            }
            Err(parse::UploadError::Invalid(msg)) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::FileUploadFailed, msg)));
            }
        };

        let rows = match parse::parse_upload(&upload) {
            Ok(rows) => rows,
            Err(e) => return Ok(error_response(&e, ErrorCode::ImportFailed)),
        };

        if rows.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ImportFileDataInvalid,
                "File contains no data rows",
            )));
        }
        if rows.len() > config.max_rows {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ImportFileDataInvalid,
                format!("At most {} rows can be imported at once", config.max_rows),
            )));
        }

        let storage = self.get_storage(request);
        match run::run_import(storage.as_ref(), target, rows).await {
            Ok(summary) => {
                info!(
                    "Imported {} of {} {} row(s) from {}",
                    summary.created, summary.total, summary.target, upload.file_name
                );
                Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "Import completed")))
            }
            Err(e) => Ok(error_response(&e, ErrorCode::ImportFailed)),
        }
    }
}
