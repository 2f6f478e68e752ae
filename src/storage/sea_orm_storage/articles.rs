//! 博客文章与评论存储操作

use super::{SeaOrmStorage, fetch_page};
use crate::entity::articles::Column;
use crate::entity::blog_comments;
use crate::entity::prelude::*;
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse,
    content::{
        entities::{Article, BlogComment},
        requests::{
            CreateArticleRequest, CreateBlogCommentRequest, ModerateRequest, UpdateArticleRequest,
        },
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 分页列出已发布文章，可按正文子串搜索
    pub async fn list_published_articles_impl(
        &self,
        page: Option<&str>,
        search: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<Article>> {
        let mut select = Articles::find().filter(Column::Status.eq(true));
        if let Some(search) = search {
            select = select.filter(Column::Content.like(contains_pattern(search)));
        }
        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (items, pagination) = fetch_page(&self.db, select, page, size, "文章").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_article()).collect(),
            pagination,
        })
    }

    pub async fn latest_published_articles_impl(&self, limit: u64) -> Result<Vec<Article>> {
        let result = Articles::find()
            .filter(Column::Status.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询文章失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_article()).collect())
    }

    pub async fn get_published_article_by_slug_impl(&self, slug: &str) -> Result<Option<Article>> {
        let result = Articles::find()
            .filter(Column::Slug.eq(slug))
            .filter(Column::Status.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询文章失败: {e}")))?;

        Ok(result.map(|m| m.into_article()))
    }

    /// 浏览量在数据库中原子加一，再读取最新行
    pub async fn view_published_article_impl(&self, slug: &str) -> Result<Option<Article>> {
        let Some(article) = self.get_published_article_by_slug_impl(slug).await? else {
            return Ok(None);
        };

        Articles::update_many()
            .col_expr(Column::Views, Expr::cust("views + 1"))
            .filter(Column::Id.eq(article.id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新浏览量失败: {e}")))?;

        let result = Articles::find_by_id(article.id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询文章失败: {e}")))?;

        Ok(result.map(|m| m.into_article()))
    }

    pub async fn list_other_articles_impl(
        &self,
        exclude_id: i64,
        limit: u64,
    ) -> Result<Vec<Article>> {
        let result = Articles::find()
            .filter(Column::Status.eq(true))
            .filter(Column::Id.ne(exclude_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询文章失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_article()).collect())
    }

    /// 仅已审核且可见的评论
    pub async fn list_public_blog_comments_impl(
        &self,
        article_id: i64,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<BlogComment>> {
        let select = BlogComments::find()
            .filter(blog_comments::Column::ArticleId.eq(article_id))
            .filter(blog_comments::Column::Approved.eq(true))
            .filter(blog_comments::Column::Visible.eq(true))
            .order_by_desc(blog_comments::Column::CreatedAt)
            .order_by_desc(blog_comments::Column::Id);

        let (items, pagination) = fetch_page(&self.db, select, page, size, "评论").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_blog_comment()).collect(),
            pagination,
        })
    }

    /// 新评论默认未审核且隐藏
    pub async fn create_blog_comment_impl(
        &self,
        article_id: i64,
        author_id: i64,
        req: CreateBlogCommentRequest,
    ) -> Result<BlogComment> {
        let result = BlogCommentActiveModel {
            article_id: Set(article_id),
            author_id: Set(author_id),
            name: Set(req.name),
            phone_number: Set(req.phone_number),
            comment: Set(req.comment),
            approved: Set(false),
            visible: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("保存评论失败: {e}")))?;

        Ok(result.into_blog_comment())
    }

    pub async fn moderate_blog_comment_impl(
        &self,
        id: i64,
        moderation: ModerateRequest,
    ) -> Result<Option<BlogComment>> {
        let existing = BlogComments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询评论失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(approved) = moderation.approved {
            model.approved = Set(approved);
        }
        if let Some(visible) = moderation.visible {
            model.visible = Set(visible);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("审核评论失败: {e}")))?;

        Ok(Some(result.into_blog_comment()))
    }

    /// 新文章待审核，默认不发布
    pub async fn create_article_impl(
        &self,
        author_id: i64,
        slug: String,
        req: CreateArticleRequest,
    ) -> Result<Article> {
        let taken = Articles::find()
            .filter(Column::Slug.eq(&slug))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询文章失败: {e}")))?;
        if taken.is_some() {
            return Err(SchoolError::conflict(format!("文章地址已存在: {slug}")));
        }

        let now = chrono::Utc::now().timestamp();
        let result = ArticleActiveModel {
            author_id: Set(author_id),
            title: Set(req.title),
            content: Set(req.content),
            subject: Set(req.subject),
            slug: Set(slug),
            image_url: Set(req.image_url),
            views: Set(0),
            read_minutes: Set(req.read_minutes.max(0)),
            status: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("创建文章失败: {e}")))?;

        Ok(result.into_article())
    }

    /// 作者本人的文章（不论是否发布）
    pub async fn get_article_for_author_impl(
        &self,
        slug: &str,
        author_id: i64,
    ) -> Result<Option<Article>> {
        let result = Articles::find()
            .filter(Column::Slug.eq(slug))
            .filter(Column::AuthorId.eq(author_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询文章失败: {e}")))?;

        Ok(result.map(|m| m.into_article()))
    }

    pub async fn update_article_impl(
        &self,
        id: i64,
        update: UpdateArticleRequest,
    ) -> Result<Article> {
        let existing = Articles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询文章失败: {e}")))?
            .ok_or_else(|| SchoolError::not_found(format!("文章不存在: {id}")))?;

        let mut model = existing.into_active_model();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }
        if let Some(image_url) = update.image_url {
            model.image_url = Set(Some(image_url));
        }
        if let Some(read_minutes) = update.read_minutes {
            model.read_minutes = Set(read_minutes.max(0));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新文章失败: {e}")))?;

        Ok(result.into_article())
    }

    pub async fn delete_article_impl(&self, id: i64) -> Result<bool> {
        let result = Articles::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除文章失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_articles_by_author_impl(&self, author_id: i64) -> Result<Vec<Article>> {
        let result = Articles::find()
            .filter(Column::AuthorId.eq(author_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询文章失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_article()).collect())
    }

    pub async fn set_article_status_impl(&self, id: i64, status: bool) -> Result<bool> {
        let result = Articles::update_many()
            .col_expr(Column::Status, Expr::value(status))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新文章状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::lessons::tests::add_teacher;

    fn article(title: &str, content: &str) -> CreateArticleRequest {
        CreateArticleRequest {
            title: title.to_string(),
            content: content.to_string(),
            subject: "science".into(),
            slug: None,
            image_url: None,
            read_minutes: 3,
        }
    }

    #[tokio::test]
    async fn test_views_increment_once_per_view() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let created = storage
            .create_article_impl(teacher.user_id, "first-post".into(), article("First", "body"))
            .await
            .expect("create");
        assert!(!created.status);
        assert!(
            storage
                .view_published_article_impl("first-post")
                .await
                .expect("view")
                .is_none()
        );

        storage
            .set_article_status_impl(created.id, true)
            .await
            .expect("publish");
        let mut last = None;
        for _ in 0..3 {
            last = storage
                .view_published_article_impl("first-post")
                .await
                .expect("view");
        }
        assert_eq!(last.map(|a| a.views), Some(3));
    }

    #[tokio::test]
    async fn test_slug_conflict_and_search() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let a = storage
            .create_article_impl(teacher.user_id, "a".into(), article("A", "about 100% rust"))
            .await
            .expect("a");
        let b = storage
            .create_article_impl(teacher.user_id, "b".into(), article("B", "about python"))
            .await
            .expect("b");
        for id in [a.id, b.id] {
            storage.set_article_status_impl(id, true).await.expect("publish");
        }

        let err = storage
            .create_article_impl(teacher.user_id, "a".into(), article("A2", "x"))
            .await
            .expect_err("duplicate slug");
        assert!(matches!(err, SchoolError::Conflict(_)));

        let found = storage
            .list_published_articles_impl(None, Some("100%"), 6)
            .await
            .expect("search");
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].slug, "a");

        let wildcard = storage
            .list_published_articles_impl(None, Some("%"), 6)
            .await
            .expect("search");
        assert_eq!(wildcard.items.len(), 1);

        let beyond = storage
            .list_published_articles_impl(Some("50"), None, 1)
            .await
            .expect("page");
        assert_eq!(beyond.pagination.page, 2);
        assert_eq!(beyond.items.len(), 1);
    }

    #[tokio::test]
    async fn test_blog_comments_need_approval_and_visibility() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let post = storage
            .create_article_impl(teacher.user_id, "post".into(), article("P", "x"))
            .await
            .expect("post");
        let comment = storage
            .create_blog_comment_impl(
                post.id,
                teacher.user_id,
                CreateBlogCommentRequest {
                    name: "Reader".into(),
                    phone_number: "09120000000".into(),
                    comment: "Nice".into(),
                },
            )
            .await
            .expect("comment");

        storage
            .moderate_blog_comment_impl(
                comment.id,
                ModerateRequest {
                    approved: Some(true),
                    visible: Some(false),
                },
            )
            .await
            .expect("moderate");
        let hidden = storage
            .list_public_blog_comments_impl(post.id, None, 4)
            .await
            .expect("list");
        assert!(hidden.items.is_empty());

        storage
            .moderate_blog_comment_impl(
                comment.id,
                ModerateRequest {
                    approved: None,
                    visible: Some(true),
                },
            )
            .await
            .expect("moderate");
        let shown = storage
            .list_public_blog_comments_impl(post.id, None, 4)
            .await
            .expect("list");
        assert_eq!(shown.items.len(), 1);
    }
}
