use serde::Serialize;

use super::entities::{Article, BlogComment, GalleryImage, News, ParentComment};
use crate::models::PaginatedResponse;
use crate::models::profiles::entities::{StaffMember, Teacher};

#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetailResponse {
    pub article: Article,
    pub comments: PaginatedResponse<BlogComment>,
    pub other_articles: Vec<Article>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsListResponse {
    pub items: Vec<News>,
    pub pagination: crate::models::PaginationInfo,
    /// 最新的一条特别新闻
    pub special: Option<News>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsDetailResponse {
    pub news: News,
    pub recent_news: Vec<News>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HomeCounters {
    pub news: u64,
    pub teachers: u64,
    pub students: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeResponse {
    pub news: Vec<News>,
    pub articles: Vec<Article>,
    pub gallery: Vec<GalleryImage>,
    pub counters: HomeCounters,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherDetailResponse {
    pub teacher: Teacher,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherContactPage {
    pub teacher: Teacher,
    pub teachers: Vec<Teacher>,
    pub student_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutResponse {
    pub management_team: Vec<StaffMember>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParentCommentsResponse {
    pub items: Vec<ParentComment>,
}
