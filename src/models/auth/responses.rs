use serde::Serialize;

use crate::models::profiles::entities::GradeLevel;
use crate::models::users::entities::{User, UserRole};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// 令牌有效期（秒）
    pub expires_in: i64,
    pub remember_me: bool,
    pub user: User,
}

/// GET /account/login 返回的会话状态
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user: Option<User>,
}

/// GET /account/register 返回的可选项
#[derive(Debug, Serialize)]
pub struct RegisterOptions {
    pub roles: Vec<UserRole>,
    pub grade_levels: Vec<GradeLevel>,
}
