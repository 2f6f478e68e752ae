//! 相册图片实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gallery_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub status: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_gallery_image(self) -> crate::models::content::entities::GalleryImage {
        crate::models::content::entities::GalleryImage {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            status: self.status,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
