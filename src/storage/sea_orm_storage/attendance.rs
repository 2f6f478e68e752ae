//! 考勤存储操作

use super::{SeaOrmStorage, lessons::roster_select};
use crate::entity::attendance_records::Column;
use crate::entity::prelude::*;
use crate::errors::{Result, SchoolError};
use crate::models::academics::{
    entities::{AttendanceRecord, AttendanceStatus},
    responses::AttendanceCounts,
};
use crate::storage::AttendanceOutcome;
use crate::utils::calendar::SchoolDay;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 记录一节课当天的考勤
    ///
    /// 名单外的学生 ID 被忽略；当天已有记录时覆盖状态，否则新增。
    /// `attended_on` 是记录创建时所在的学校本地日期，按它匹配即等价于按当天时间窗口匹配。
    pub async fn record_attendance_impl(
        &self,
        lesson_id: i64,
        day: SchoolDay,
        selections: HashMap<i64, AttendanceStatus>,
    ) -> Result<AttendanceOutcome> {
        let mut outcome = AttendanceOutcome::default();
        let attended_on = day.attended_on();
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::attendance_save(format!("开启事务失败: {e}")))?;

        let roster = roster_select(lesson_id)
            .all(&txn)
            .await
            .map_err(|e| SchoolError::attendance_save(format!("查询课程名单失败: {e}")))?;

        for student in roster {
            let Some(status) = selections.get(&student.id) else {
                continue;
            };

            let existing = AttendanceRecords::find()
                .filter(Column::StudentId.eq(student.id))
                .filter(Column::LessonId.eq(lesson_id))
                .filter(Column::AttendedOn.eq(&attended_on))
                .one(&txn)
                .await
                .map_err(|e| SchoolError::attendance_save(format!("查询考勤失败: {e}")))?;

            match existing {
                Some(record) => {
                    let mut model = record.into_active_model();
                    model.status = Set(status.to_string());
                    model.updated_at = Set(now);
                    model
                        .update(&txn)
                        .await
                        .map_err(|e| SchoolError::attendance_save(format!("更新考勤失败: {e}")))?;
                    outcome.updated += 1;
                }
                None => {
                    AttendanceRecordActiveModel {
                        student_id: Set(student.id),
                        lesson_id: Set(lesson_id),
                        status: Set(status.to_string()),
                        attended_on: Set(attended_on.clone()),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                    .map_err(|e| SchoolError::attendance_save(format!("写入考勤失败: {e}")))?;
                    outcome.inserted += 1;
                }
            }
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::attendance_save(format!("提交考勤失败: {e}")))?;

        Ok(outcome)
    }

    /// 当天已记录的考勤
    pub async fn list_day_attendance_impl(
        &self,
        lesson_id: i64,
        day: SchoolDay,
    ) -> Result<Vec<AttendanceRecord>> {
        let result = AttendanceRecords::find()
            .filter(Column::LessonId.eq(lesson_id))
            .filter(Column::AttendedOn.eq(day.attended_on()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attendance_record()).collect())
    }

    pub async fn recent_student_attendance_impl(
        &self,
        student_id: i64,
        limit: u64,
    ) -> Result<Vec<AttendanceRecord>> {
        let result = AttendanceRecords::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attendance_record()).collect())
    }

    /// 按状态统计学生的全部考勤
    pub async fn student_attendance_counts_impl(
        &self,
        student_id: i64,
    ) -> Result<AttendanceCounts> {
        let mut counts = AttendanceCounts::default();
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Late,
        ] {
            let n = AttendanceRecords::find()
                .filter(Column::StudentId.eq(student_id))
                .filter(Column::Status.eq(status.to_string()))
                .count(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("统计考勤失败: {e}")))?;
            counts.add(status, n);
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::lessons::tests::{
        add_lesson, add_student, add_teacher,
    };
    use chrono::{FixedOffset, TimeZone, Utc};

    fn today() -> SchoolDay {
        let offset = FixedOffset::east_opt(210 * 60).expect("offset");
        SchoolDay::containing(Utc::now(), offset)
    }

    #[tokio::test]
    async fn test_same_day_resubmission_updates() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let s1 = add_student(&storage, "s1", "A").await;
        let s2 = add_student(&storage, "s2", "B").await;
        let lesson = add_lesson(&storage, "math", teacher.id, vec![s1.id, s2.id]).await;
        let day = today();

        let first = storage
            .record_attendance_impl(
                lesson.id,
                day,
                HashMap::from([
                    (s1.id, AttendanceStatus::Present),
                    (s2.id, AttendanceStatus::Absent),
                ]),
            )
            .await
            .expect("first");
        assert_eq!(first, AttendanceOutcome { inserted: 2, updated: 0 });

        let second = storage
            .record_attendance_impl(
                lesson.id,
                day,
                HashMap::from([
                    (s1.id, AttendanceStatus::Late),
                    (s2.id, AttendanceStatus::Present),
                ]),
            )
            .await
            .expect("second");
        assert_eq!(second, AttendanceOutcome { inserted: 0, updated: 2 });

        let records = storage
            .list_day_attendance_impl(lesson.id, day)
            .await
            .expect("records");
        assert_eq!(records.len(), 2);
        let s1_status = records
            .iter()
            .find(|r| r.student_id == s1.id)
            .map(|r| r.status);
        assert_eq!(s1_status, Some(AttendanceStatus::Late));
    }

    #[tokio::test]
    async fn test_students_off_roster_are_skipped() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let s1 = add_student(&storage, "s1", "A").await;
        let outsider = add_student(&storage, "s2", "B").await;
        let lesson = add_lesson(&storage, "math", teacher.id, vec![s1.id]).await;

        let outcome = storage
            .record_attendance_impl(
                lesson.id,
                today(),
                HashMap::from([
                    (s1.id, AttendanceStatus::Present),
                    (outsider.id, AttendanceStatus::Present),
                    (424242, AttendanceStatus::Late),
                ]),
            )
            .await
            .expect("record");
        assert_eq!(outcome, AttendanceOutcome { inserted: 1, updated: 0 });
    }

    #[tokio::test]
    async fn test_new_day_inserts_again() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let teacher = add_teacher(&storage, "t1").await;
        let s1 = add_student(&storage, "s1", "A").await;
        let lesson = add_lesson(&storage, "math", teacher.id, vec![s1.id]).await;
        let offset = FixedOffset::east_opt(210 * 60).expect("offset");
        let yesterday = SchoolDay::containing(
            Utc.with_ymd_and_hms(2024, 3, 19, 12, 0, 0).single().expect("date"),
            offset,
        );

        storage
            .record_attendance_impl(
                lesson.id,
                yesterday,
                HashMap::from([(s1.id, AttendanceStatus::Absent)]),
            )
            .await
            .expect("past day");
        let outcome = storage
            .record_attendance_impl(
                lesson.id,
                today(),
                HashMap::from([(s1.id, AttendanceStatus::Present)]),
            )
            .await
            .expect("today");
        assert_eq!(outcome.inserted, 1);

        let counts = storage
            .student_attendance_counts_impl(s1.id)
            .await
            .expect("counts");
        assert_eq!(counts.absent, 1);
        assert_eq!(counts.present, 1);
        let recent = storage
            .recent_student_attendance_impl(s1.id, 5)
            .await
            .expect("recent");
        assert_eq!(recent.len(), 2);
    }
}
