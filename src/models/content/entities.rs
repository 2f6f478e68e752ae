use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub subject: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub views: i64,
    pub read_minutes: i32,
    /// 审核通过后公开
    pub status: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub subject: String,
    pub image_url: Option<String>,
    pub views: i64,
    pub read_minutes: i32,
    pub status: bool,
    pub special: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogComment {
    pub id: i64,
    pub article_id: i64,
    pub author_id: i64,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub phone_number: String,
    pub comment: String,
    pub approved: bool,
    pub visible: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 家长意见的主题
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommentSubject {
    SchoolFacilities,
    TeachingMethod,
    Behavior,
    #[default]
    Other,
}

impl std::fmt::Display for CommentSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommentSubject::SchoolFacilities => write!(f, "school_facilities"),
            CommentSubject::TeachingMethod => write!(f, "teaching_method"),
            CommentSubject::Behavior => write!(f, "behavior"),
            CommentSubject::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for CommentSubject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "school_facilities" => Ok(CommentSubject::SchoolFacilities),
            "teaching_method" => Ok(CommentSubject::TeachingMethod),
            "behavior" => Ok(CommentSubject::Behavior),
            "other" => Ok(CommentSubject::Other),
            _ => Err(format!("Invalid comment subject: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentComment {
    pub id: i64,
    pub parent_id: i64,
    pub full_name: String,
    pub student_name: String,
    #[serde(skip_serializing, default)]
    pub phone_number: String,
    pub subject: CommentSubject,
    pub comment: String,
    pub approved: bool,
    pub visible: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub status: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
