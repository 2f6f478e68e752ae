//! 学生资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub grade_level: String,
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
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
    #[sea_orm(has_many = "super::attendance_records::Entity")]
    AttendanceRecords,
    #[sea_orm(has_many = "super::lesson_students::Entity")]
    LessonStudents,
    #[sea_orm(has_many = "super::parent_children::Entity")]
    ParentChildren,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl Related<super::attendance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl Related<super::lesson_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonStudents.def()
    }
}

impl Related<super::parent_children::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentChildren.def()
    }
}

// 通过名单表关联课程
impl Related<super::lessons::Entity> for Entity {
    fn to() -> RelationDef {
        super::lesson_students::Relation::Lesson.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::lesson_students::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::profiles::entities::Student {
        use crate::models::profiles::entities::{GradeLevel, Student};

        Student {
            id: self.id,
            user_id: self.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            grade_level: self.grade_level.parse::<GradeLevel>().unwrap_or_default(),
        }
    }
}
