//! 业务模型定义
//!
//! 与 `entity` 中的数据库实体分离，供 storage、services 与 routes 共用。

pub mod academics;
pub mod auth;
pub mod common;
pub mod content;
pub mod profiles;
pub mod users;

pub use common::{ApiResponse, ErrorCode, PageQuery, PaginatedResponse, PaginationInfo};

/// 程序启动时间，用于启动耗时日志
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
