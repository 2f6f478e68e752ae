//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，每个变体带有稳定的错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() / error_type() / message() 方法
/// - snake_case 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    CacheConnection("S001", "Cache Connection Error"),
    CachePluginNotFound("S002", "Cache Plugin Not Found"),
    DatabaseConfig("S003", "Database Configuration Error"),
    DatabaseConnection("S004", "Database Connection Error"),
    DatabaseOperation("S005", "Database Operation Error"),
    Io("S006", "IO Error"),
    Validation("S007", "Validation Error"),
    NotFound("S008", "Resource Not Found"),
    Conflict("S009", "Resource Conflict"),
    Serialization("S010", "Serialization Error"),
    DateParse("S011", "Date Parse Error"),
    Authentication("S012", "Authentication Error"),
    Authorization("S013", "Authorization Error"),
    AttendanceSave("S014", "Attendance Save Error"),
}

impl SchoolError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SchoolError::NotFound(_))
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

impl From<sea_orm::DbErr> for SchoolError {
    fn from(err: sea_orm::DbErr) -> Self {
        SchoolError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SchoolError {
    fn from(err: std::io::Error) -> Self {
        SchoolError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::cache_connection("x").code(), "S001");
        assert_eq!(SchoolError::validation("x").code(), "S007");
        assert_eq!(SchoolError::conflict("x").code(), "S009");
        assert_eq!(SchoolError::attendance_save("x").code(), "S014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolError::not_found("x").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            SchoolError::attendance_save("x").error_type(),
            "Attendance Save Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::validation("score out of range");
        assert_eq!(err.message(), "score out of range");
        assert_eq!(
            err.format_simple(),
            "Validation Error: score out of range"
        );
        assert!(!err.is_not_found());
        assert!(SchoolError::not_found("lesson").is_not_found());
    }

    #[test]
    fn test_from_db_err() {
        let err: SchoolError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "S005");
        assert!(err.message().contains("boom"));
    }
}
