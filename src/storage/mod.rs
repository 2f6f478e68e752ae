use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    PaginatedResponse,
    academics::{
        entities::{AttendanceRecord, AttendanceStatus, Grade, Lesson, TeacherContact},
        requests::{CreateLessonRequest, GradeEntry, UpdateGradeRequest},
        responses::{AttendanceCounts, GradeBatchSummary, GradeRow},
    },
    content::{
        entities::{Article, BlogComment, ContactMessage, GalleryImage, News, ParentComment},
        requests::{
            ContactRequest, CreateArticleRequest, CreateBlogCommentRequest,
            CreateGalleryImageRequest, CreateNewsRequest, ModerateRequest, ParentCommentRequest,
            TeacherContactRequest, UpdateArticleRequest,
        },
    },
    profiles::{
        entities::{NewProfile, Parent, Profile, StaffMember, Student, Teacher},
        requests::UpdateTeacherRequest,
    },
    users::entities::{NewUser, User},
};
use crate::utils::calendar::SchoolDay;

use crate::errors::Result;

pub mod sea_orm_storage;

/// 写入考勤后的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceOutcome {
    pub inserted: usize,
    pub updated: usize,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户与资料
    // 在同一事务中创建用户及其资料
    async fn create_user_with_profile(
        &self,
        user: NewUser,
        profile: NewProfile,
    ) -> Result<(User, Profile)>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;
    // 管理团队（is_staff）
    async fn list_staff(&self) -> Result<Vec<StaffMember>>;

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_full_name_en(&self, full_name_en: &str) -> Result<Option<Teacher>>;
    async fn list_teachers(
        &self,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<Teacher>>;
    async fn list_all_teachers(&self) -> Result<Vec<Teacher>>;
    async fn update_teacher(&self, teacher_id: i64, update: UpdateTeacherRequest)
    -> Result<Teacher>;
    async fn set_teacher_status(&self, teacher_id: i64, status: bool) -> Result<bool>;
    async fn count_teachers(&self) -> Result<u64>;

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn count_students(&self) -> Result<u64>;

    async fn get_parent_by_user_id(&self, user_id: i64) -> Result<Option<Parent>>;
    async fn list_children(&self, parent_id: i64) -> Result<Vec<Student>>;
    async fn link_parent_child(&self, parent_id: i64, student_id: i64) -> Result<()>;

    /// 课程
    async fn create_lesson(&self, req: CreateLessonRequest) -> Result<Lesson>;
    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>>;
    // None 表示全部课程
    async fn list_lessons(&self, teacher_id: Option<i64>) -> Result<Vec<Lesson>>;
    // 按姓氏排序
    async fn list_lesson_students(&self, lesson_id: i64) -> Result<Vec<Student>>;
    async fn set_lesson_roster(&self, lesson_id: i64, student_ids: Vec<i64>) -> Result<usize>;
    async fn count_student_lessons(&self, student_id: i64) -> Result<u64>;

    /// 成绩
    async fn record_grade_batch(
        &self,
        teacher_id: i64,
        entries: Vec<Option<GradeEntry>>,
    ) -> Result<GradeBatchSummary>;
    async fn list_lesson_grades(&self, lesson_id: i64) -> Result<Vec<GradeRow>>;
    async fn list_student_grades(&self, student_id: i64) -> Result<Vec<GradeRow>>;
    async fn get_grade(&self, lesson_id: i64, grade_id: i64) -> Result<Option<Grade>>;
    async fn update_grade(
        &self,
        lesson_id: i64,
        grade_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>>;
    async fn delete_grade(&self, lesson_id: i64, grade_id: i64) -> Result<bool>;

    /// 考勤
    // 整批在一个事务中完成
    async fn record_attendance(
        &self,
        lesson_id: i64,
        day: SchoolDay,
        selections: HashMap<i64, AttendanceStatus>,
    ) -> Result<AttendanceOutcome>;
    async fn list_day_attendance(&self, lesson_id: i64, day: SchoolDay)
    -> Result<Vec<AttendanceRecord>>;
    async fn recent_student_attendance(
        &self,
        student_id: i64,
        limit: u64,
    ) -> Result<Vec<AttendanceRecord>>;
    async fn student_attendance_counts(&self, student_id: i64) -> Result<AttendanceCounts>;

    /// 留言与意见
    async fn create_contact_message(&self, req: ContactRequest) -> Result<ContactMessage>;
    async fn list_contact_messages(
        &self,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<ContactMessage>>;
    async fn mark_contact_message_read(&self, id: i64) -> Result<bool>;
    async fn create_teacher_contact(
        &self,
        teacher_id: i64,
        student: &Student,
        req: TeacherContactRequest,
    ) -> Result<TeacherContact>;
    async fn list_teacher_contacts(&self, teacher_id: i64) -> Result<Vec<TeacherContact>>;
    async fn create_parent_comment(
        &self,
        parent_id: i64,
        req: ParentCommentRequest,
    ) -> Result<ParentComment>;
    async fn list_public_parent_comments(&self) -> Result<Vec<ParentComment>>;
    async fn moderate_parent_comment(
        &self,
        id: i64,
        moderation: ModerateRequest,
    ) -> Result<Option<ParentComment>>;

    /// 博客文章
    async fn list_published_articles(
        &self,
        page: Option<&str>,
        search: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<Article>>;
    async fn latest_published_articles(&self, limit: u64) -> Result<Vec<Article>>;
    // 读取已发布文章并将浏览量加一
    async fn view_published_article(&self, slug: &str) -> Result<Option<Article>>;
    async fn list_other_articles(&self, exclude_id: i64, limit: u64) -> Result<Vec<Article>>;
    async fn list_public_blog_comments(
        &self,
        article_id: i64,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<BlogComment>>;
    async fn get_published_article_by_slug(&self, slug: &str) -> Result<Option<Article>>;
    async fn create_blog_comment(
        &self,
        article_id: i64,
        author_id: i64,
        req: CreateBlogCommentRequest,
    ) -> Result<BlogComment>;
    async fn moderate_blog_comment(
        &self,
        id: i64,
        moderation: ModerateRequest,
    ) -> Result<Option<BlogComment>>;
    async fn create_article(
        &self,
        author_id: i64,
        slug: String,
        req: CreateArticleRequest,
    ) -> Result<Article>;
    async fn get_article_for_author(&self, slug: &str, author_id: i64) -> Result<Option<Article>>;
    async fn update_article(&self, id: i64, update: UpdateArticleRequest) -> Result<Article>;
    async fn delete_article(&self, id: i64) -> Result<bool>;
    async fn list_articles_by_author(&self, author_id: i64) -> Result<Vec<Article>>;
    async fn set_article_status(&self, id: i64, status: bool) -> Result<bool>;

    /// 新闻
    async fn list_published_news(
        &self,
        page: Option<&str>,
        search: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<News>>;
    async fn latest_special_news(&self, search: Option<&str>) -> Result<Option<News>>;
    async fn latest_published_news(&self, limit: u64) -> Result<Vec<News>>;
    async fn view_published_news(&self, id: i64) -> Result<Option<News>>;
    async fn recent_news(&self, exclude_id: i64, limit: u64) -> Result<Vec<News>>;
    async fn create_news(&self, author_id: i64, req: CreateNewsRequest) -> Result<News>;
    async fn set_news_status(&self, id: i64, status: bool) -> Result<bool>;
    async fn count_published_news(&self) -> Result<u64>;

    /// 相册
    async fn list_published_gallery(
        &self,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<GalleryImage>>;
    async fn latest_gallery_images(&self, limit: u64) -> Result<Vec<GalleryImage>>;
    async fn create_gallery_image(&self, req: CreateGalleryImageRequest) -> Result<GalleryImage>;
    async fn set_gallery_status(&self, id: i64, status: bool) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
