//! 家长资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::parent_children::Entity")]
    ParentChildren,
    #[sea_orm(has_many = "super::parent_comments::Entity")]
    ParentComments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::parent_children::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentChildren.def()
    }
}

impl Related<super::parent_comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentComments.def()
    }
}

// 通过关联表获取子女
impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        super::parent_children::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::parent_children::Relation::Parent.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_parent(self) -> crate::models::profiles::entities::Parent {
        crate::models::profiles::entities::Parent {
            id: self.id,
            user_id: self.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}
