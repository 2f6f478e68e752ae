use super::entities::UserRole;
use crate::models::profiles::entities::GradeLevel;
use serde::Deserialize;

// 管理员创建用户请求，同时携带对应角色的资料字段
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub is_staff: bool,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// 教师英文名（公开 URL 键），缺省时使用用户名
    pub full_name_en: Option<String>,
    pub grade_level: Option<GradeLevel>,
    pub title: Option<String>,
    pub description: Option<String>,
}
