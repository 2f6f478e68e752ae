//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub teacher_id: i64,
    pub grade_level: String,
    pub year: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
    #[sea_orm(has_many = "super::attendance_records::Entity")]
    AttendanceRecords,
    #[sea_orm(has_many = "super::lesson_students::Entity")]
    LessonStudents,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
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

// 通过名单表关联学生
impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        super::lesson_students::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::lesson_students::Relation::Lesson.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_lesson(self) -> crate::models::academics::entities::Lesson {
        crate::models::academics::entities::Lesson {
            id: self.id,
            name: self.name,
            teacher_id: self.teacher_id,
            grade_level: self.grade_level,
            year: self.year,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
