use serde::Deserialize;

use super::entities::CommentSubject;

// 教师新增文章
#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub subject: String,
    /// 缺省时由标题生成
    pub slug: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub read_minutes: i32,
}

// 教师修改自己的文章
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub subject: Option<String>,
    pub image_url: Option<String>,
    pub read_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlogCommentRequest {
    pub name: String,
    pub phone_number: String,
    pub comment: String,
}

// 联系我们
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub full_name: String,
    pub phone_number: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ParentCommentRequest {
    pub full_name: String,
    pub student_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub subject: CommentSubject,
    pub comment: String,
}

// 学生给教师留言
#[derive(Debug, Deserialize)]
pub struct TeacherContactRequest {
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub content: String,
    pub subject: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub read_minutes: i32,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub special: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateGalleryImageRequest {
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub status: bool,
}

// 设置发布状态
#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub status: bool,
}

// 评论审核
#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    pub approved: Option<bool>,
    pub visible: Option<bool>,
}
