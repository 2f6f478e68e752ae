//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod articles;
mod attendance;
mod gallery;
mod grades;
mod lessons;
mod messages;
mod news;
mod profiles;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::models::{PaginationInfo, common::pagination::resolve_page};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Select,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 单连接的内存数据库，已执行迁移
    pub async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("内存数据库连接失败: {e}")))?;

        Self::migrate(&db).await?;
        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 按原始页码参数取一页；页码非法时回到第一页，越界时取末页
pub(crate) async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    raw_page: Option<&str>,
    size: u64,
    what: &str,
) -> Result<(Vec<E::Model>, PaginationInfo)>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    let paginator = select.paginate(db, size);
    let total = paginator
        .num_items()
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询{what}总数失败: {e}")))?;
    let pages = paginator
        .num_pages()
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询{what}页数失败: {e}")))?;

    let page = resolve_page(raw_page, pages);
    let items = paginator
        .fetch_page(page - 1)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询{what}列表失败: {e}")))?;

    Ok((
        items,
        PaginationInfo {
            page: page as i64,
            page_size: size as i64,
            total: total as i64,
            total_pages: pages as i64,
        },
    ))
}

// Storage trait 实现
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
use crate::storage::{AttendanceOutcome, Storage};
use crate::utils::calendar::SchoolDay;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user_with_profile(
        &self,
        user: NewUser,
        profile: NewProfile,
    ) -> Result<(User, Profile)> {
        self.create_user_with_profile_impl(user, profile).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_password_impl(id, password_hash).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn list_staff(&self) -> Result<Vec<StaffMember>> {
        self.list_staff_impl().await
    }

    // 资料模块
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn get_teacher_by_full_name_en(&self, full_name_en: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_full_name_en_impl(full_name_en).await
    }

    async fn list_teachers(
        &self,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<Teacher>> {
        self.list_teachers_impl(page, size).await
    }

    async fn list_all_teachers(&self) -> Result<Vec<Teacher>> {
        self.list_all_teachers_impl().await
    }

    async fn update_teacher(
        &self,
        teacher_id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Teacher> {
        self.update_teacher_impl(teacher_id, update).await
    }

    async fn set_teacher_status(&self, teacher_id: i64, status: bool) -> Result<bool> {
        self.set_teacher_status_impl(teacher_id, status).await
    }

    async fn count_teachers(&self) -> Result<u64> {
        self.count_teachers_impl().await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    async fn get_parent_by_user_id(&self, user_id: i64) -> Result<Option<Parent>> {
        self.get_parent_by_user_id_impl(user_id).await
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<Student>> {
        self.list_children_impl(parent_id).await
    }

    async fn link_parent_child(&self, parent_id: i64, student_id: i64) -> Result<()> {
        self.link_parent_child_impl(parent_id, student_id).await
    }

    // 课程模块
    async fn create_lesson(&self, req: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(req).await
    }

    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_by_id_impl(lesson_id).await
    }

    async fn list_lessons(&self, teacher_id: Option<i64>) -> Result<Vec<Lesson>> {
        self.list_lessons_impl(teacher_id).await
    }

    async fn list_lesson_students(&self, lesson_id: i64) -> Result<Vec<Student>> {
        self.list_lesson_students_impl(lesson_id).await
    }

    async fn set_lesson_roster(&self, lesson_id: i64, student_ids: Vec<i64>) -> Result<usize> {
        self.set_lesson_roster_impl(lesson_id, student_ids).await
    }

    async fn count_student_lessons(&self, student_id: i64) -> Result<u64> {
        self.count_student_lessons_impl(student_id).await
    }

    // 成绩模块
    async fn record_grade_batch(
        &self,
        teacher_id: i64,
        entries: Vec<Option<GradeEntry>>,
    ) -> Result<GradeBatchSummary> {
        self.record_grade_batch_impl(teacher_id, entries).await
    }

    async fn list_lesson_grades(&self, lesson_id: i64) -> Result<Vec<GradeRow>> {
        self.list_lesson_grades_impl(lesson_id).await
    }

    async fn list_student_grades(&self, student_id: i64) -> Result<Vec<GradeRow>> {
        self.list_student_grades_impl(student_id).await
    }

    async fn get_grade(&self, lesson_id: i64, grade_id: i64) -> Result<Option<Grade>> {
        self.get_grade_impl(lesson_id, grade_id).await
    }

    async fn update_grade(
        &self,
        lesson_id: i64,
        grade_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        self.update_grade_impl(lesson_id, grade_id, update).await
    }

    async fn delete_grade(&self, lesson_id: i64, grade_id: i64) -> Result<bool> {
        self.delete_grade_impl(lesson_id, grade_id).await
    }

    // 考勤模块
    async fn record_attendance(
        &self,
        lesson_id: i64,
        day: SchoolDay,
        selections: HashMap<i64, AttendanceStatus>,
    ) -> Result<AttendanceOutcome> {
        self.record_attendance_impl(lesson_id, day, selections).await
    }

    async fn list_day_attendance(
        &self,
        lesson_id: i64,
        day: SchoolDay,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_day_attendance_impl(lesson_id, day).await
    }

    async fn recent_student_attendance(
        &self,
        student_id: i64,
        limit: u64,
    ) -> Result<Vec<AttendanceRecord>> {
        self.recent_student_attendance_impl(student_id, limit).await
    }

    async fn student_attendance_counts(&self, student_id: i64) -> Result<AttendanceCounts> {
        self.student_attendance_counts_impl(student_id).await
    }

    // 留言模块
    async fn create_contact_message(&self, req: ContactRequest) -> Result<ContactMessage> {
        self.create_contact_message_impl(req).await
    }

    async fn list_contact_messages(
        &self,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<ContactMessage>> {
        self.list_contact_messages_impl(page, size).await
    }

    async fn mark_contact_message_read(&self, id: i64) -> Result<bool> {
        self.mark_contact_message_read_impl(id).await
    }

    async fn create_teacher_contact(
        &self,
        teacher_id: i64,
        student: &Student,
        req: TeacherContactRequest,
    ) -> Result<TeacherContact> {
        self.create_teacher_contact_impl(teacher_id, student, req)
            .await
    }

    async fn list_teacher_contacts(&self, teacher_id: i64) -> Result<Vec<TeacherContact>> {
        self.list_teacher_contacts_impl(teacher_id).await
    }

    async fn create_parent_comment(
        &self,
        parent_id: i64,
        req: ParentCommentRequest,
    ) -> Result<ParentComment> {
        self.create_parent_comment_impl(parent_id, req).await
    }

    async fn list_public_parent_comments(&self) -> Result<Vec<ParentComment>> {
        self.list_public_parent_comments_impl().await
    }

    async fn moderate_parent_comment(
        &self,
        id: i64,
        moderation: ModerateRequest,
    ) -> Result<Option<ParentComment>> {
        self.moderate_parent_comment_impl(id, moderation).await
    }

    // 博客模块
    async fn list_published_articles(
        &self,
        page: Option<&str>,
        search: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<Article>> {
        self.list_published_articles_impl(page, search, size).await
    }

    async fn latest_published_articles(&self, limit: u64) -> Result<Vec<Article>> {
        self.latest_published_articles_impl(limit).await
    }

    async fn view_published_article(&self, slug: &str) -> Result<Option<Article>> {
        self.view_published_article_impl(slug).await
    }

    async fn list_other_articles(&self, exclude_id: i64, limit: u64) -> Result<Vec<Article>> {
        self.list_other_articles_impl(exclude_id, limit).await
    }

    async fn list_public_blog_comments(
        &self,
        article_id: i64,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<BlogComment>> {
        self.list_public_blog_comments_impl(article_id, page, size)
            .await
    }

    async fn get_published_article_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        self.get_published_article_by_slug_impl(slug).await
    }

    async fn create_blog_comment(
        &self,
        article_id: i64,
        author_id: i64,
        req: CreateBlogCommentRequest,
    ) -> Result<BlogComment> {
        self.create_blog_comment_impl(article_id, author_id, req)
            .await
    }

    async fn moderate_blog_comment(
        &self,
        id: i64,
        moderation: ModerateRequest,
    ) -> Result<Option<BlogComment>> {
        self.moderate_blog_comment_impl(id, moderation).await
    }

    async fn create_article(
        &self,
        author_id: i64,
        slug: String,
        req: CreateArticleRequest,
    ) -> Result<Article> {
        self.create_article_impl(author_id, slug, req).await
    }

    async fn get_article_for_author(&self, slug: &str, author_id: i64) -> Result<Option<Article>> {
        self.get_article_for_author_impl(slug, author_id).await
    }

    async fn update_article(&self, id: i64, update: UpdateArticleRequest) -> Result<Article> {
        self.update_article_impl(id, update).await
    }

    async fn delete_article(&self, id: i64) -> Result<bool> {
        self.delete_article_impl(id).await
    }

    async fn list_articles_by_author(&self, author_id: i64) -> Result<Vec<Article>> {
        self.list_articles_by_author_impl(author_id).await
    }

    async fn set_article_status(&self, id: i64, status: bool) -> Result<bool> {
        self.set_article_status_impl(id, status).await
    }

    // 新闻模块
    async fn list_published_news(
        &self,
        page: Option<&str>,
        search: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<News>> {
        self.list_published_news_impl(page, search, size).await
    }

    async fn latest_special_news(&self, search: Option<&str>) -> Result<Option<News>> {
        self.latest_special_news_impl(search).await
    }

    async fn latest_published_news(&self, limit: u64) -> Result<Vec<News>> {
        self.latest_published_news_impl(limit).await
    }

    async fn view_published_news(&self, id: i64) -> Result<Option<News>> {
        self.view_published_news_impl(id).await
    }

    async fn recent_news(&self, exclude_id: i64, limit: u64) -> Result<Vec<News>> {
        self.recent_news_impl(exclude_id, limit).await
    }

    async fn create_news(&self, author_id: i64, req: CreateNewsRequest) -> Result<News> {
        self.create_news_impl(author_id, req).await
    }

    async fn set_news_status(&self, id: i64, status: bool) -> Result<bool> {
        self.set_news_status_impl(id, status).await
    }

    async fn count_published_news(&self) -> Result<u64> {
        self.count_published_news_impl().await
    }

    // 相册模块
    async fn list_published_gallery(
        &self,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<GalleryImage>> {
        self.list_published_gallery_impl(page, size).await
    }

    async fn latest_gallery_images(&self, limit: u64) -> Result<Vec<GalleryImage>> {
        self.latest_gallery_images_impl(limit).await
    }

    async fn create_gallery_image(&self, req: CreateGalleryImageRequest) -> Result<GalleryImage> {
        self.create_gallery_image_impl(req).await
    }

    async fn set_gallery_status(&self, id: i64, status: bool) -> Result<bool> {
        self.set_gallery_status_impl(id, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("school.db").ok().as_deref(),
            Some("sqlite://school.db?mode=rwc")
        );
        assert!(SeaOrmStorage::build_database_url("postgres://localhost/school").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }
}
