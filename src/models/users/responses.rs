use serde::Serialize;

use super::entities::User;
use crate::models::profiles::entities::Profile;

/// 管理员创建用户后的返回
#[derive(Debug, Clone, Serialize)]
pub struct UserWithProfile {
    pub user: User,
    pub profile: Profile,
}
