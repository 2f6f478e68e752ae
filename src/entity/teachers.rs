//! 教师资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub full_name: String,
    #[sea_orm(unique)]
    pub full_name_en: String,
    pub image_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub degree: Option<String>,
    pub teaching_experience: i32,
    pub status: bool,
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
    #[sea_orm(has_many = "super::lessons::Entity")]
    Lessons,
    #[sea_orm(has_many = "super::teacher_contacts::Entity")]
    TeacherContacts,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::lessons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lessons.def()
    }
}

impl Related<super::teacher_contacts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherContacts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(self) -> crate::models::profiles::entities::Teacher {
        crate::models::profiles::entities::Teacher {
            id: self.id,
            user_id: self.user_id,
            full_name: self.full_name,
            full_name_en: self.full_name_en,
            image_url: self.image_url,
            description: self.description,
            degree: self.degree,
            teaching_experience: self.teaching_experience,
            status: self.status,
        }
    }
}
