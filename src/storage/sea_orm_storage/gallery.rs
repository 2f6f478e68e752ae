//! 相册存储操作

use super::{SeaOrmStorage, fetch_page};
use crate::entity::gallery_images::{ActiveModel, Column, Entity as GalleryImages};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse,
    content::{entities::GalleryImage, requests::CreateGalleryImageRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn list_published_gallery_impl(
        &self,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<GalleryImage>> {
        let select = GalleryImages::find()
            .filter(Column::Status.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);
        let (items, pagination) = fetch_page(&self.db, select, page, size, "图片").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_gallery_image()).collect(),
            pagination,
        })
    }

    pub async fn latest_gallery_images_impl(&self, limit: u64) -> Result<Vec<GalleryImage>> {
        let result = GalleryImages::find()
            .filter(Column::Status.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询图片失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_gallery_image()).collect())
    }

    pub async fn create_gallery_image_impl(
        &self,
        req: CreateGalleryImageRequest,
    ) -> Result<GalleryImage> {
        let result = ActiveModel {
            title: Set(req.title),
            image_url: Set(req.image_url),
            status: Set(req.status),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("添加图片失败: {e}")))?;

        Ok(result.into_gallery_image())
    }

    pub async fn set_gallery_status_impl(&self, id: i64, status: bool) -> Result<bool> {
        let result = GalleryImages::update_many()
            .col_expr(Column::Status, Expr::value(status))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新图片状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_published_images_listed() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        for (i, status) in [true, false, true].into_iter().enumerate() {
            storage
                .create_gallery_image_impl(CreateGalleryImageRequest {
                    title: format!("img{i}"),
                    image_url: format!("/media/gallery/{i}.jpg"),
                    status,
                })
                .await
                .expect("image");
        }

        let page = storage
            .list_published_gallery_impl(Some("x"), 9)
            .await
            .expect("list");
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 2);
        assert_eq!(storage.latest_gallery_images_impl(1).await.expect("latest").len(), 1);
    }
}
