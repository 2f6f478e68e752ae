//! 新闻存储操作

use super::{SeaOrmStorage, fetch_page};
use crate::entity::news::{ActiveModel, Column, Entity as NewsEntity};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse,
    content::{entities::News, requests::CreateNewsRequest},
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, sea_query::Expr,
};

/// 已发布新闻，可按正文子串搜索，最新在前
fn published(search: Option<&str>) -> Select<NewsEntity> {
    let mut select = NewsEntity::find().filter(Column::Status.eq(true));
    if let Some(search) = search {
        select = select.filter(Column::Content.like(contains_pattern(search)));
    }
    select
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
}

impl SeaOrmStorage {
    pub async fn list_published_news_impl(
        &self,
        page: Option<&str>,
        search: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<News>> {
        let (items, pagination) =
            fetch_page(&self.db, published(search), page, size, "新闻").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_news()).collect(),
            pagination,
        })
    }

    /// 最新的一条特别新闻
    pub async fn latest_special_news_impl(&self, search: Option<&str>) -> Result<Option<News>> {
        let result = published(search)
            .filter(Column::Special.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询特别新闻失败: {e}")))?;

        Ok(result.map(|m| m.into_news()))
    }

    pub async fn latest_published_news_impl(&self, limit: u64) -> Result<Vec<News>> {
        let result = published(None)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询新闻失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_news()).collect())
    }

    /// 浏览量在数据库中原子加一，再读取最新行
    pub async fn view_published_news_impl(&self, id: i64) -> Result<Option<News>> {
        let result = NewsEntity::update_many()
            .col_expr(Column::Views, Expr::cust("views + 1"))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新浏览量失败: {e}")))?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        let news = NewsEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询新闻失败: {e}")))?;

        Ok(news.map(|m| m.into_news()))
    }

    pub async fn recent_news_impl(&self, exclude_id: i64, limit: u64) -> Result<Vec<News>> {
        let result = published(None)
            .filter(Column::Id.ne(exclude_id))
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询新闻失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_news()).collect())
    }

    pub async fn create_news_impl(&self, author_id: i64, req: CreateNewsRequest) -> Result<News> {
        let now = chrono::Utc::now().timestamp();
        let result = ActiveModel {
            author_id: Set(author_id),
            title: Set(req.title),
            content: Set(req.content),
            subject: Set(req.subject),
            image_url: Set(req.image_url),
            views: Set(0),
            read_minutes: Set(req.read_minutes.max(0)),
            status: Set(req.status),
            special: Set(req.special),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("创建新闻失败: {e}")))?;

        Ok(result.into_news())
    }

    pub async fn set_news_status_impl(&self, id: i64, status: bool) -> Result<bool> {
        let result = NewsEntity::update_many()
            .col_expr(Column::Status, Expr::value(status))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新新闻状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_published_news_impl(&self) -> Result<u64> {
        NewsEntity::find()
            .filter(Column::Status.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计新闻失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::lessons::tests::add_teacher;

    fn news(title: &str, status: bool, special: bool) -> CreateNewsRequest {
        CreateNewsRequest {
            title: title.to_string(),
            content: format!("{title} body"),
            subject: "school".into(),
            image_url: None,
            read_minutes: 2,
            status,
            special,
        }
    }

    #[tokio::test]
    async fn test_special_and_listing() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let author = add_teacher(&storage, "t1").await.user_id;
        storage
            .create_news_impl(author, news("old special", true, true))
            .await
            .expect("news");
        let newest = storage
            .create_news_impl(author, news("new special", true, true))
            .await
            .expect("news");
        storage
            .create_news_impl(author, news("draft", false, true))
            .await
            .expect("news");

        let special = storage.latest_special_news_impl(None).await.expect("special");
        assert_eq!(special.map(|n| n.id), Some(newest.id));
        assert_eq!(storage.count_published_news_impl().await.expect("count"), 2);

        let page = storage
            .list_published_news_impl(None, Some("old"), 6)
            .await
            .expect("list");
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_unpublished_news_not_viewable() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let author = add_teacher(&storage, "t1").await.user_id;
        let draft = storage
            .create_news_impl(author, news("draft", false, false))
            .await
            .expect("news");
        assert!(storage.view_published_news_impl(draft.id).await.expect("view").is_none());

        storage.set_news_status_impl(draft.id, true).await.expect("publish");
        let viewed = storage
            .view_published_news_impl(draft.id)
            .await
            .expect("view")
            .expect("published");
        assert_eq!(viewed.views, 1);
    }
}
