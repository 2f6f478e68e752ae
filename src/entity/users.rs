//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub is_staff: bool,
    pub phone_number: Option<String>,
    pub last_login: Option<i64>,
    pub token_version: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::admin_profiles::Entity")]
    AdminProfile,
    #[sea_orm(has_one = "super::teachers::Entity")]
    Teacher,
    #[sea_orm(has_one = "super::students::Entity")]
    Student,
    #[sea_orm(has_one = "super::parents::Entity")]
    Parent,
    #[sea_orm(has_many = "super::articles::Entity")]
    Articles,
}

impl Related<super::admin_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminProfile.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::parents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parent.def()
    }
}

impl Related<super::articles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Articles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserRole, UserStatus};

        User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Student),
            status: self
                .status
                .parse::<UserStatus>()
                .unwrap_or(UserStatus::Inactive),
            is_staff: self.is_staff,
            phone_number: self.phone_number,
            last_login: self.last_login.map(super::to_datetime),
            token_version: self.token_version,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
