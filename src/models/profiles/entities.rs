use serde::{Deserialize, Serialize};

use crate::models::users::entities::UserRole;

// 学生年级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GradeLevel {
    Seventh,
    Eighth,
    Ninth,
    #[default]
    TenthComputer,
    TenthAccounting,
    EleventhComputer,
    EleventhAccounting,
    TwelfthComputer,
    TwelfthAccounting,
}

impl GradeLevel {
    pub fn all() -> &'static [GradeLevel] {
        &[
            GradeLevel::Seventh,
            GradeLevel::Eighth,
            GradeLevel::Ninth,
            GradeLevel::TenthComputer,
            GradeLevel::TenthAccounting,
            GradeLevel::EleventhComputer,
            GradeLevel::EleventhAccounting,
            GradeLevel::TwelfthComputer,
            GradeLevel::TwelfthAccounting,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLevel::Seventh => "seventh",
            GradeLevel::Eighth => "eighth",
            GradeLevel::Ninth => "ninth",
            GradeLevel::TenthComputer => "tenth_computer",
            GradeLevel::TenthAccounting => "tenth_accounting",
            GradeLevel::EleventhComputer => "eleventh_computer",
            GradeLevel::EleventhAccounting => "eleventh_accounting",
            GradeLevel::TwelfthComputer => "twelfth_computer",
            GradeLevel::TwelfthAccounting => "twelfth_accounting",
        }
    }
}

impl std::fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GradeLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GradeLevel::all()
            .iter()
            .find(|level| level.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Invalid grade level: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub full_name_en: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub degree: Option<String>,
    pub teaching_experience: i32,
    /// 是否允许录入成绩
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub grade_level: GradeLevel,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parent {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// 创建用户时一并写入的资料行，变体必须与用户角色一致
#[derive(Debug, Clone)]
pub enum NewProfile {
    Admin {
        first_name: String,
        last_name: String,
        title: Option<String>,
        description: Option<String>,
    },
    Teacher {
        full_name: String,
        full_name_en: String,
    },
    Student {
        first_name: String,
        last_name: String,
        grade_level: GradeLevel,
    },
    Parent {
        first_name: String,
        last_name: String,
    },
}

impl NewProfile {
    pub fn role(&self) -> UserRole {
        match self {
            NewProfile::Admin { .. } => UserRole::Admin,
            NewProfile::Teacher { .. } => UserRole::Teacher,
            NewProfile::Student { .. } => UserRole::Student,
            NewProfile::Parent { .. } => UserRole::Parent,
        }
    }
}

/// 已创建的资料行
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Profile {
    Admin(AdminProfile),
    Teacher(Teacher),
    Student(Student),
    Parent(Parent),
}

/// “关于我们”页面中的管理团队成员
#[derive(Debug, Clone, Serialize)]
pub struct StaffMember {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_level_default_and_parse() {
        assert_eq!(GradeLevel::default(), GradeLevel::TenthComputer);
        assert_eq!(
            "twelfth_accounting".parse::<GradeLevel>().ok(),
            Some(GradeLevel::TwelfthAccounting)
        );
        assert!("thirteenth".parse::<GradeLevel>().is_err());
    }

    #[test]
    fn test_new_profile_role() {
        let profile = NewProfile::Parent {
            first_name: "Sara".into(),
            last_name: "Ahmadi".into(),
        };
        assert_eq!(profile.role(), UserRole::Parent);
    }
}
