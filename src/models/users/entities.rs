use serde::{Deserialize, Serialize};

// 用户角色，每个用户恰好拥有一种
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,   // 管理员
    Teacher, // 教师
    Student, // 学生
    Parent,  // 家长
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";
    pub const PARENT: &'static str = "parent";

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => Self::ADMIN,
            UserRole::Teacher => Self::TEACHER,
            UserRole::Student => Self::STUDENT,
            UserRole::Parent => Self::PARENT,
        }
    }

    /// 允许公开注册的角色
    pub fn self_registrable() -> &'static [UserRole] {
        &[UserRole::Student, UserRole::Parent]
    }

    pub fn all_roles() -> &'static [UserRole] {
        &[
            UserRole::Admin,
            UserRole::Teacher,
            UserRole::Student,
            UserRole::Parent,
        ]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: admin, teacher, student, parent"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::PARENT => Ok(UserRole::Parent),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,   // 活跃
    Inactive, // 停用
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub is_staff: bool,
    pub phone_number: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing, default)]
    pub token_version: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// 写入用户表所需的字段，密码已哈希
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_staff: bool,
    pub phone_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in UserRole::all_roles() {
            assert_eq!(role.as_str().parse::<UserRole>().ok(), Some(*role));
        }
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_error_lists_roles() {
        let err = serde_json::from_str::<UserRole>("\"guest\"").unwrap_err();
        assert!(err.to_string().contains("admin, teacher, student, parent"));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let now = chrono::Utc::now();
        let user = User {
            id: 1,
            username: "teacher01".into(),
            password_hash: "secret-hash".into(),
            role: UserRole::Teacher,
            status: UserStatus::Active,
            is_staff: false,
            phone_number: None,
            last_login: None,
            token_version: 3,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("token_version"));
        assert!(json.contains("\"role\":\"teacher\""));
    }
}
