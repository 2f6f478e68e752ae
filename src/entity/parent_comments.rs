//! 家长意见实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parent_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub parent_id: i64,
    pub full_name: String,
    pub student_name: String,
    pub phone_number: String,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub approved: bool,
    pub visible: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parents::Entity",
        from = "Column::ParentId",
        to = "super::parents::Column::Id"
    )]
    Parent,
}

impl Related<super::parents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_parent_comment(self) -> crate::models::content::entities::ParentComment {
        use crate::models::content::entities::{CommentSubject, ParentComment};

        ParentComment {
            id: self.id,
            parent_id: self.parent_id,
            full_name: self.full_name,
            student_name: self.student_name,
            phone_number: self.phone_number,
            subject: self.subject.parse::<CommentSubject>().unwrap_or_default(),
            comment: self.comment,
            approved: self.approved,
            visible: self.visible,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
