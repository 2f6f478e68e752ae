//! 博客评论实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub article_id: i64,
    pub author_id: i64,
    pub name: String,
    pub phone_number: String,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub approved: bool,
    pub visible: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::articles::Entity",
        from = "Column::ArticleId",
        to = "super::articles::Column::Id"
    )]
    Article,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id"
    )]
    Author,
}

impl Related<super::articles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_blog_comment(self) -> crate::models::content::entities::BlogComment {
        crate::models::content::entities::BlogComment {
            id: self.id,
            article_id: self.article_id,
            author_id: self.author_id,
            name: self.name,
            phone_number: self.phone_number,
            comment: self.comment,
            approved: self.approved,
            visible: self.visible,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
