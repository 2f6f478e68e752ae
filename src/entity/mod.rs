//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod admin_profiles;
pub mod articles;
pub mod attendance_records;
pub mod blog_comments;
pub mod contact_messages;
pub mod gallery_images;
pub mod grades;
pub mod lesson_students;
pub mod lessons;
pub mod news;
pub mod parent_children;
pub mod parent_comments;
pub mod parents;
pub mod students;
pub mod teacher_contacts;
pub mod teachers;
pub mod users;

use chrono::{DateTime, Utc};

/// 数据库中的秒级时间戳转换为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
