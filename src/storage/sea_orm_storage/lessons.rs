//! 课程与名单存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{lesson_students, lessons, students};
use crate::errors::{Result, SchoolError};
use crate::models::{
    academics::{entities::Lesson, requests::CreateLessonRequest},
    profiles::entities::Student,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use std::collections::BTreeSet;

impl SeaOrmStorage {
    /// 创建课程并写入初始名单
    pub async fn create_lesson_impl(&self, req: CreateLessonRequest) -> Result<Lesson> {
        let teacher = Teachers::find_by_id(req.teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;
        if teacher.is_none() {
            return Err(SchoolError::not_found(format!(
                "教师不存在: {}",
                req.teacher_id
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let lesson = LessonActiveModel {
            name: Set(req.name),
            teacher_id: Set(req.teacher_id),
            grade_level: Set(req.grade_level),
            year: Set(req.year),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("创建课程失败: {e}")))?;

        replace_roster(&txn, lesson.id, req.student_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(lesson.into_lesson())
    }

    pub async fn get_lesson_by_id_impl(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    pub async fn list_lessons_impl(&self, teacher_id: Option<i64>) -> Result<Vec<Lesson>> {
        let mut select = Lessons::find();
        if let Some(teacher_id) = teacher_id {
            select = select.filter(lessons::Column::TeacherId.eq(teacher_id));
        }

        let result = select
            .order_by_asc(lessons::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_lesson()).collect())
    }

    /// 课程名单，按姓氏排序
    pub async fn list_lesson_students_impl(&self, lesson_id: i64) -> Result<Vec<Student>> {
        let result = roster_select(lesson_id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程名单失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    /// 整体替换课程名单，返回写入的人数
    pub async fn set_lesson_roster_impl(
        &self,
        lesson_id: i64,
        student_ids: Vec<i64>,
    ) -> Result<usize> {
        let lesson = Lessons::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?;
        if lesson.is_none() {
            return Err(SchoolError::not_found(format!("课程不存在: {lesson_id}")));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;
        let count = replace_roster(&txn, lesson_id, student_ids).await?;
        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(count)
    }

    pub async fn count_student_lessons_impl(&self, student_id: i64) -> Result<u64> {
        LessonStudents::find()
            .filter(lesson_students::Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计学生课程失败: {e}")))
    }
}

/// 名单查询（学生按姓氏、名字排序）
pub(super) fn roster_select(lesson_id: i64) -> sea_orm::Select<Students> {
    Students::find()
        .join(JoinType::InnerJoin, students::Relation::LessonStudents.def())
        .filter(lesson_students::Column::LessonId.eq(lesson_id))
        .order_by_asc(students::Column::LastName)
        .order_by_asc(students::Column::FirstName)
}

/// 删除旧名单并写入去重后的有效学生
async fn replace_roster<C: ConnectionTrait>(
    conn: &C,
    lesson_id: i64,
    student_ids: Vec<i64>,
) -> Result<usize> {
    LessonStudents::delete_many()
        .filter(lesson_students::Column::LessonId.eq(lesson_id))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清空课程名单失败: {e}")))?;

    let wanted: BTreeSet<i64> = student_ids.into_iter().collect();
    if wanted.is_empty() {
        return Ok(0);
    }

    let existing = Students::find()
        .filter(students::Column::Id.is_in(wanted))
        .all(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

    for student in &existing {
        LessonStudentActiveModel {
            lesson_id: Set(lesson_id),
            student_id: Set(student.id),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("写入课程名单失败: {e}")))?;
    }

    Ok(existing.len())
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use crate::models::profiles::entities::{GradeLevel, NewProfile, Profile, Teacher};
    use crate::models::users::entities::NewUser;

    pub(crate) async fn add_user(
        storage: &SeaOrmStorage,
        username: &str,
        profile: NewProfile,
    ) -> Profile {
        storage
            .create_user_with_profile_impl(
                NewUser {
                    username: username.to_string(),
                    password_hash: "hash".into(),
                    role: profile.role(),
                    is_staff: false,
                    phone_number: None,
                },
                profile,
            )
            .await
            .expect("create user")
            .1
    }

    pub(crate) async fn add_teacher(storage: &SeaOrmStorage, username: &str) -> Teacher {
        match add_user(
            storage,
            username,
            NewProfile::Teacher {
                full_name: username.to_uppercase(),
                full_name_en: username.to_string(),
            },
        )
        .await
        {
            Profile::Teacher(t) => t,
            other => panic!("unexpected profile: {other:?}"),
        }
    }

    pub(crate) async fn add_student(
        storage: &SeaOrmStorage,
        username: &str,
        last_name: &str,
    ) -> Student {
        match add_user(
            storage,
            username,
            NewProfile::Student {
                first_name: username.to_string(),
                last_name: last_name.to_string(),
                grade_level: GradeLevel::TenthComputer,
            },
        )
        .await
        {
            Profile::Student(s) => s,
            other => panic!("unexpected profile: {other:?}"),
        }
    }

    pub(crate) async fn add_lesson(
        storage: &SeaOrmStorage,
        name: &str,
        teacher_id: i64,
        student_ids: Vec<i64>,
    ) -> Lesson {
        storage
            .create_lesson_impl(CreateLessonRequest {
                name: name.to_string(),
                teacher_id,
                grade_level: "tenth_computer".into(),
                year: "1403".into(),
                student_ids,
            })
            .await
            .expect("create lesson")
    }

    #[tokio::test]
    async fn test_roster_sorted_by_last_name() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let b = add_student(&storage, "s1", "Bahrami").await;
        let a = add_student(&storage, "s2", "Ahmadi").await;
        let lesson = add_lesson(&storage, "math", teacher.id, vec![b.id, a.id, a.id]).await;

        let roster = storage
            .list_lesson_students_impl(lesson.id)
            .await
            .expect("roster");
        let names: Vec<_> = roster.iter().map(|s| s.last_name.as_str()).collect();
        assert_eq!(names, vec!["Ahmadi", "Bahrami"]);
        assert_eq!(storage.count_student_lessons_impl(a.id).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_set_roster_replaces_and_skips_unknown() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let s1 = add_student(&storage, "s1", "A").await;
        let s2 = add_student(&storage, "s2", "B").await;
        let lesson = add_lesson(&storage, "physics", teacher.id, vec![s1.id]).await;

        let count = storage
            .set_lesson_roster_impl(lesson.id, vec![s2.id, 9999])
            .await
            .expect("set roster");
        assert_eq!(count, 1);

        let roster = storage
            .list_lesson_students_impl(lesson.id)
            .await
            .expect("roster");
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, s2.id);

        let err = storage
            .set_lesson_roster_impl(lesson.id + 10, vec![])
            .await
            .expect_err("missing lesson");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_lesson_requires_teacher() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let err = storage
            .create_lesson_impl(CreateLessonRequest {
                name: "x".into(),
                teacher_id: 42,
                grade_level: "ninth".into(),
                year: "1403".into(),
                student_ids: vec![],
            })
            .await
            .expect_err("no teacher");
        assert!(err.is_not_found());
    }
}
