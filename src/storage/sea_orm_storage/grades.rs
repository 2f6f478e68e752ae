//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{grades, lessons, students, users};
use crate::errors::{Result, SchoolError};
use crate::models::{
    academics::{
        entities::Grade,
        requests::{GradeEntry, UpdateGradeRequest},
        responses::{GradeBatchSummary, GradeRow},
    },
    users::entities::UserRole,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

impl SeaOrmStorage {
    /// 批量录入成绩，单条失败只计数不中断
    pub async fn record_grade_batch_impl(
        &self,
        teacher_id: i64,
        entries: Vec<Option<GradeEntry>>,
    ) -> Result<GradeBatchSummary> {
        let mut summary = GradeBatchSummary::default();

        for (index, entry) in entries.into_iter().enumerate() {
            let Some(entry) = entry else {
                summary.failed += 1;
                continue;
            };

            match self.insert_grade_entry(teacher_id, entry).await {
                Ok(true) => summary.succeeded += 1,
                Ok(false) => summary.failed += 1,
                Err(e) => {
                    warn!("第 {} 条成绩写入失败: {}", index + 1, e);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// 解析学生与课程后写入；任一方无法解析时返回 false
    async fn insert_grade_entry(&self, teacher_id: i64, entry: GradeEntry) -> Result<bool> {
        let student = Students::find()
            .find_also_related(Users)
            .filter(users::Column::Username.eq(&entry.student_username))
            .filter(users::Column::Role.eq(UserRole::Student.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;
        let Some((student, _)) = student else {
            return Ok(false);
        };

        let lesson = Lessons::find()
            .filter(lessons::Column::Name.eq(&entry.lesson_name))
            .filter(lessons::Column::TeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?;
        let Some(lesson) = lesson else {
            return Ok(false);
        };

        let now = chrono::Utc::now().timestamp();
        GradeActiveModel {
            student_id: Set(student.id),
            lesson_id: Set(lesson.id),
            month: Set(entry.month.as_str().to_string()),
            score: Set(entry.score),
            class_activity: Set(entry.class_activity),
            status: Set(entry.status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("创建成绩失败: {e}")))?;

        Ok(true)
    }

    pub async fn list_lesson_grades_impl(&self, lesson_id: i64) -> Result<Vec<GradeRow>> {
        let result = Grades::find()
            .filter(grades::Column::LessonId.eq(lesson_id))
            .order_by_desc(grades::Column::CreatedAt)
            .order_by_desc(grades::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程成绩失败: {e}")))?;

        grade_rows(&self.db, result).await
    }

    pub async fn list_student_grades_impl(&self, student_id: i64) -> Result<Vec<GradeRow>> {
        let result = Grades::find()
            .filter(grades::Column::StudentId.eq(student_id))
            .order_by_desc(grades::Column::CreatedAt)
            .order_by_desc(grades::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生成绩失败: {e}")))?;

        grade_rows(&self.db, result).await
    }

    /// 成绩必须属于该课程
    pub async fn get_grade_impl(&self, lesson_id: i64, grade_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id)
            .filter(grades::Column::LessonId.eq(lesson_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn update_grade_impl(
        &self,
        lesson_id: i64,
        grade_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        let existing = Grades::find_by_id(grade_id)
            .filter(grades::Column::LessonId.eq(lesson_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.score = Set(update.score);
        model.class_activity = Set(update.class_activity);
        if let Some(month) = update.month {
            model.month = Set(month.as_str().to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新成绩失败: {e}")))?;

        Ok(Some(result.into_grade()))
    }

    pub async fn delete_grade_impl(&self, lesson_id: i64, grade_id: i64) -> Result<bool> {
        let result = Grades::delete_many()
            .filter(grades::Column::Id.eq(grade_id))
            .filter(grades::Column::LessonId.eq(lesson_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

/// 补齐成绩行的学生姓名与课程名称
async fn grade_rows(db: &DatabaseConnection, models: Vec<GradeModel>) -> Result<Vec<GradeRow>> {
    let student_ids: BTreeSet<i64> = models.iter().map(|g| g.student_id).collect();
    let lesson_ids: BTreeSet<i64> = models.iter().map(|g| g.lesson_id).collect();

    let student_names: HashMap<i64, String> = Students::find()
        .filter(students::Column::Id.is_in(student_ids))
        .all(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?
        .into_iter()
        .map(|s| (s.id, format!("{} {}", s.first_name, s.last_name)))
        .collect();
    let lesson_names: HashMap<i64, String> = Lessons::find()
        .filter(lessons::Column::Id.is_in(lesson_ids))
        .all(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?
        .into_iter()
        .map(|l| (l.id, l.name))
        .collect();

    Ok(models
        .into_iter()
        .map(|m| {
            let student_name = student_names.get(&m.student_id).cloned().unwrap_or_default();
            let lesson_name = lesson_names.get(&m.lesson_id).cloned().unwrap_or_default();
            GradeRow {
                grade: m.into_grade(),
                student_name,
                lesson_name,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::academics::entities::{GradeStatus, Month};
    use crate::storage::sea_orm_storage::lessons::tests::{
        add_lesson, add_student, add_teacher,
    };

    fn entry(student: &str, lesson: &str, score: f64) -> Option<GradeEntry> {
        Some(GradeEntry {
            student_username: student.to_string(),
            lesson_name: lesson.to_string(),
            score,
            class_activity: 18.0,
            month: Month::Mehr,
            status: GradeStatus::Good,
        })
    }

    #[tokio::test]
    async fn test_grade_batch_counts_failures() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let other = add_teacher(&storage, "t2").await;
        let student = add_student(&storage, "ali123", "Alavi").await;
        let lesson = add_lesson(&storage, "math", teacher.id, vec![student.id]).await;
        add_lesson(&storage, "art", other.id, vec![student.id]).await;

        let summary = storage
            .record_grade_batch_impl(
                teacher.id,
                vec![
                    entry("ali123", "math", 19.0),
                    None,
                    entry("ghost", "math", 10.0),
                    entry("ali123", "art", 12.0),
                    entry("t1", "math", 12.0),
                ],
            )
            .await
            .expect("batch");
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 4);

        let rows = storage
            .list_lesson_grades_impl(lesson.id)
            .await
            .expect("grades");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].lesson_name, "math");
        assert_eq!(rows[0].student_name, "ali123 Alavi");
    }

    #[tokio::test]
    async fn test_resubmission_duplicates() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let student = add_student(&storage, "sara", "Sadeghi").await;
        add_lesson(&storage, "math", teacher.id, vec![student.id]).await;

        for _ in 0..2 {
            storage
                .record_grade_batch_impl(teacher.id, vec![entry("sara", "math", 15.0)])
                .await
                .expect("batch");
        }
        let rows = storage
            .list_student_grades_impl(student.id)
            .await
            .expect("grades");
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_scoped_to_lesson() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let student = add_student(&storage, "sara", "Sadeghi").await;
        let lesson = add_lesson(&storage, "math", teacher.id, vec![student.id]).await;
        storage
            .record_grade_batch_impl(teacher.id, vec![entry("sara", "math", 15.0)])
            .await
            .expect("batch");
        let grade_id = storage.list_lesson_grades_impl(lesson.id).await.expect("rows")[0]
            .grade
            .id;

        let updated = storage
            .update_grade_impl(
                lesson.id,
                grade_id,
                UpdateGradeRequest {
                    score: 17.5,
                    class_activity: 20.0,
                    month: Some(Month::Aban),
                    status: Some(GradeStatus::Great),
                },
            )
            .await
            .expect("update")
            .expect("grade exists");
        assert_eq!(updated.score, 17.5);
        assert_eq!(updated.month, Month::Aban);

        assert!(
            storage
                .get_grade_impl(lesson.id + 1, grade_id)
                .await
                .expect("get")
                .is_none()
        );
        assert!(!storage.delete_grade_impl(lesson.id + 1, grade_id).await.expect("delete"));
        assert!(storage.delete_grade_impl(lesson.id, grade_id).await.expect("delete"));
    }
}
