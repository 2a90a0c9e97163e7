//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - with_message() 方法 - 同类别、新详情
/// - 便捷构造函数
macro_rules! define_records_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum RecordsError {
            $($variant(String),)*
        }

        impl RecordsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(RecordsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(RecordsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(RecordsError::$variant(msg) => msg,)*
                }
            }

            /// 保留错误类别，替换错误详情
            pub fn with_message<T: Into<String>>(&self, msg: T) -> Self {
                match self {
                    $(RecordsError::$variant(_) => RecordsError::$variant(msg.into()),)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl RecordsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        RecordsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_records_errors! {
    NotFound("E001", "Resource Not Found"),
    AlreadyExists("E002", "Resource Already Exists"),
    Validation("E003", "Validation Error"),
    InvalidCredentials("E004", "Invalid Credentials"),
    PersistenceFailure("E005", "Persistence Failure"),
    DatabaseConfig("E006", "Database Configuration Error"),
    DatabaseConnection("E007", "Database Connection Error"),
    Authentication("E008", "Authentication Error"),
    Authorization("E009", "Authorization Error"),
    ImportParse("E010", "Import Parse Error"),
    FileOperation("E011", "File Operation Error"),
    Serialization("E012", "Serialization Error"),
    DateParse("E013", "Date Parse Error"),
    Internal("E014", "Internal Error"),
}

impl RecordsError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 将数据库错误归类：唯一约束冲突视为 AlreadyExists，其余为持久化失败
    pub fn from_db(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                RecordsError::already_exists(format!("{context}: {detail}"))
            }
            _ => RecordsError::persistence_failure(format!("{context}: {err}")),
        }
    }
}

impl fmt::Display for RecordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RecordsError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for RecordsError {
    fn from(err: DbErr) -> Self {
        RecordsError::from_db("数据库操作失败", err)
    }
}

impl From<std::io::Error> for RecordsError {
    fn from(err: std::io::Error) -> Self {
        RecordsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for RecordsError {
    fn from(err: serde_json::Error) -> Self {
        RecordsError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for RecordsError {
    fn from(err: chrono::ParseError) -> Self {
        RecordsError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RecordsError::not_found("test").code(), "E001");
        assert_eq!(RecordsError::already_exists("test").code(), "E002");
        assert_eq!(RecordsError::validation("test").code(), "E003");
        assert_eq!(RecordsError::invalid_credentials("test").code(), "E004");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            RecordsError::persistence_failure("test").error_type(),
            "Persistence Failure"
        );
        assert_eq!(
            RecordsError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = RecordsError::not_found("Cathedra MAT1 not found");
        assert_eq!(err.message(), "Cathedra MAT1 not found");
    }

    #[test]
    fn test_format_simple() {
        let err = RecordsError::validation("Invalid career");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid career"));
    }

    #[test]
    fn test_with_message_keeps_variant() {
        let err = RecordsError::not_found("Cathedra MAT1 not found").with_message("Import failed");
        assert_eq!(err, RecordsError::NotFound("Import failed".to_string()));
    }

    #[test]
    fn test_internal_error_code() {
        let err = RecordsError::internal("argon2 failed");
        assert_eq!(err.code(), "E014");
        assert_eq!(err.error_type(), "Internal Error");
    }

    #[test]
    fn test_plain_db_error_is_persistence_failure() {
        let err: RecordsError = DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E005");
    }
}
