use std::collections::HashMap;

use serde::Serialize;

use super::entities::{AttendanceRecord, AttendanceStatus, Grade, GradeStatus, Lesson, TeacherContact};
use crate::models::content::entities::Article;
use crate::models::profiles::entities::{Parent, Student, Teacher};

/// 批量录入成绩的统计
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GradeBatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// 一次考勤提交的统计
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendanceSummary {
    pub inserted: usize,
    pub updated: usize,
    /// 当天的太阳历日期
    pub date_label: String,
}

/// 当天已记录的考勤
#[derive(Debug, Clone, Serialize)]
pub struct TodayAttendance {
    pub status: AttendanceStatus,
    /// 学校本地时间 HH:MM
    pub time: String,
    pub solar_date: String,
}

/// 课程考勤页
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceView {
    pub lesson: Lesson,
    /// 按姓氏排序的名单
    pub students: Vec<Student>,
    pub today: HashMap<i64, TodayAttendance>,
    pub date_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeRow {
    #[serde(flatten)]
    pub grade: Grade,
    pub student_name: String,
    pub lesson_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreListResponse {
    pub lesson: Lesson,
    pub grades: Vec<GradeRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonListResponse {
    pub items: Vec<Lesson>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GradeStatusCounts {
    pub average: u64,
    pub good: u64,
    pub great: u64,
}

impl GradeStatusCounts {
    pub fn tally<'a>(grades: impl IntoIterator<Item = &'a Grade>) -> Self {
        let mut counts = Self::default();
        for grade in grades {
            match grade.status {
                GradeStatus::Average => counts.average += 1,
                GradeStatus::Good => counts.good += 1,
                GradeStatus::Great => counts.great += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AttendanceCounts {
    pub present: u64,
    pub absent: u64,
    pub late: u64,
}

impl AttendanceCounts {
    pub fn add(&mut self, status: AttendanceStatus, n: u64) {
        match status {
            AttendanceStatus::Present => self.present += n,
            AttendanceStatus::Absent => self.absent += n,
            AttendanceStatus::Late => self.late += n,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherPanelResponse {
    pub teacher: Teacher,
    pub lessons: Vec<Lesson>,
    pub contacts: Vec<TeacherContact>,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentPanelResponse {
    pub student: Student,
    pub grades: Vec<GradeRow>,
    pub recent_attendance: Vec<AttendanceRecord>,
    pub lesson_count: u64,
    pub grade_status_counts: GradeStatusCounts,
    pub attendance_counts: AttendanceCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChildReport {
    pub student: Student,
    pub grades: Vec<GradeRow>,
    pub attendance_counts: AttendanceCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParentPanelResponse {
    pub parent: Parent,
    pub children: Vec<ChildReport>,
}
