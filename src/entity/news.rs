//! 新闻实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub subject: String,
    pub image_url: Option<String>,
    pub views: i64,
    pub read_minutes: i32,
    pub status: bool,
    pub special: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id"
    )]
    Author,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_news(self) -> crate::models::content::entities::News {
        crate::models::content::entities::News {
            id: self.id,
            author_id: self.author_id,
            title: self.title,
            content: self.content,
            subject: self.subject,
            image_url: self.image_url,
            views: self.views,
            read_minutes: self.read_minutes,
            status: self.status,
            special: self.special,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
