use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lessons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lessons::Name).string().not_null())
                    .col(ColumnDef::new(Lessons::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::GradeLevel).string().not_null())
                    .col(ColumnDef::new(Lessons::Year).string().not_null())
                    .col(ColumnDef::new(Lessons::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Lessons::Table, Lessons::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程学生名单
        manager
            .create_table(
                Table::create()
                    .table(LessonStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonStudents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LessonStudents::LessonId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LessonStudents::Table, LessonStudents::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LessonStudents::Table, LessonStudents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 成绩表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::LessonId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::Month).string().not_null())
                    .col(ColumnDef::new(Grades::Score).double().not_null())
                    .col(ColumnDef::new(Grades::ClassActivity).double().not_null())
                    .col(ColumnDef::new(Grades::Status).string().not_null())
                    .col(ColumnDef::new(Grades::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考勤记录表
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::LessonId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::Status).string().not_null())
                    .col(
                        ColumnDef::new(AttendanceRecords::AttendedOn)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生给教师的留言
        manager
            .create_table(
                Table::create()
                    .table(TeacherContacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherContacts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherContacts::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherContacts::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherContacts::StudentName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeacherContacts::Subject).string().not_null())
                    .col(ColumnDef::new(TeacherContacts::Message).text().not_null())
                    .col(
                        ColumnDef::new(TeacherContacts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherContacts::Table, TeacherContacts::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherContacts::Table, TeacherContacts::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lessons_teacher_id")
                    .table(Lessons::Table)
                    .col(Lessons::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_lesson_students_pair")
                    .table(LessonStudents::Table)
                    .col(LessonStudents::LessonId)
                    .col(LessonStudents::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_lesson_id")
                    .table(Grades::Table)
                    .col(Grades::LessonId)
                    .to_owned(),
            )
            .await?;

        // 每个学生每节课每天最多一条考勤记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attendance_student_lesson_day")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::StudentId)
                    .col(AttendanceRecords::LessonId)
                    .col(AttendanceRecords::AttendedOn)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeacherContacts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LessonStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Teachers {
    #[sea_orm(iden = "teachers")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Lessons {
    #[sea_orm(iden = "lessons")]
    Table,
    Id,
    Name,
    TeacherId,
    GradeLevel,
    Year,
    CreatedAt,
}

#[derive(DeriveIden)]
enum LessonStudents {
    #[sea_orm(iden = "lesson_students")]
    Table,
    Id,
    LessonId,
    StudentId,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    StudentId,
    LessonId,
    Month,
    Score,
    ClassActivity,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceRecords {
    #[sea_orm(iden = "attendance_records")]
    Table,
    Id,
    StudentId,
    LessonId,
    Status,
    AttendedOn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeacherContacts {
    #[sea_orm(iden = "teacher_contacts")]
    Table,
    Id,
    TeacherId,
    StudentId,
    StudentName,
    Subject,
    Message,
    CreatedAt,
}
