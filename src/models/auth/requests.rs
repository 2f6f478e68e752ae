use serde::Deserialize;

use crate::models::profiles::entities::GradeLevel;
use crate::models::users::entities::UserRole;

// 用户登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 公开注册请求，仅允许学生与家长
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password1: String,
    pub password2: String,
    pub phone_number: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub grade_level: Option<GradeLevel>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}
