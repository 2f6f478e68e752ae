use std::collections::HashMap;

use serde::Deserialize;

use super::entities::{AttendanceStatus, GradeStatus, Month};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 20.0;

/// 教师面板批量录入成绩，六个数组按下标一一对应
#[derive(Debug, Default, Deserialize)]
pub struct GradeBatchRequest {
    #[serde(default)]
    pub students: Vec<String>,
    #[serde(default)]
    pub lessons: Vec<String>,
    #[serde(default)]
    pub scores: Vec<String>,
    #[serde(default)]
    pub class_activities: Vec<String>,
    #[serde(default)]
    pub months: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<String>,
}

/// 通过字段校验的一条成绩
#[derive(Debug, Clone, PartialEq)]
pub struct GradeEntry {
    pub student_username: String,
    pub lesson_name: String,
    pub score: f64,
    pub class_activity: f64,
    pub month: Month,
    pub status: GradeStatus,
}

impl GradeBatchRequest {
    /// 以 `students` 的长度为准逐条解析；缺字段、数值非法或记号未知的条目为 `None`
    pub fn entries(&self) -> Vec<Option<GradeEntry>> {
        (0..self.students.len()).map(|i| self.entry_at(i)).collect()
    }

    fn entry_at(&self, i: usize) -> Option<GradeEntry> {
        let field = |values: &Vec<String>| {
            values
                .get(i)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let student_username = field(&self.students)?;
        let lesson_name = field(&self.lessons)?;
        let score = parse_score(&field(&self.scores)?)?;
        let class_activity = parse_score(&field(&self.class_activities)?)?;
        let month = field(&self.months)?.parse::<Month>().ok()?;
        let status = field(&self.statuses)?.parse::<GradeStatus>().ok()?;

        Some(GradeEntry {
            student_username,
            lesson_name,
            score,
            class_activity,
            month,
            status,
        })
    }
}

/// 解析分数并夹取到 [0, 20]
fn parse_score(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(SCORE_MIN, SCORE_MAX))
}

/// 单次课堂考勤提交：学生 ID（字符串形式）到状态记号
#[derive(Debug, Default, Deserialize)]
pub struct AttendanceSubmission {
    #[serde(default)]
    pub statuses: HashMap<String, String>,
}

impl AttendanceSubmission {
    /// 提取可用的 (学生ID, 状态)，非法 ID 或状态被忽略
    pub fn selections(&self) -> HashMap<i64, AttendanceStatus> {
        self.statuses
            .iter()
            .filter_map(|(id, status)| {
                let id = id.trim().parse::<i64>().ok()?;
                let status = status.parse::<AttendanceStatus>().ok()?;
                Some((id, status))
            })
            .collect()
    }
}

// 修改单条成绩
#[derive(Debug, Deserialize)]
pub struct UpdateGradeRequest {
    pub score: f64,
    pub class_activity: f64,
    pub month: Option<Month>,
    pub status: Option<GradeStatus>,
}

impl UpdateGradeRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let in_range = |v: f64| v.is_finite() && (SCORE_MIN..=SCORE_MAX).contains(&v);
        if !in_range(self.score) {
            return Err("Score must be between 0 and 20");
        }
        if !in_range(self.class_activity) {
            return Err("Class activity must be between 0 and 20");
        }
        Ok(())
    }
}

// 管理员创建课程
#[derive(Debug, Deserialize)]
pub struct CreateLessonRequest {
    pub name: String,
    pub teacher_id: i64,
    pub grade_level: String,
    pub year: String,
    #[serde(default)]
    pub student_ids: Vec<i64>,
}

// 管理员设置课程名单（整体替换）
#[derive(Debug, Deserialize)]
pub struct SetRosterRequest {
    pub student_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(rows: &[[&str; 6]]) -> GradeBatchRequest {
        let col = |i: usize| rows.iter().map(|r| r[i].to_string()).collect();
        GradeBatchRequest {
            students: col(0),
            lessons: col(1),
            scores: col(2),
            class_activities: col(3),
            months: col(4),
            statuses: col(5),
        }
    }

    #[test]
    fn test_complete_entry_parses() {
        let req = batch(&[["ali123", "math", "18.5", "20", "mehr", "great"]]);
        let entries = req.entries();
        assert_eq!(entries.len(), 1);
        let entry = entries[0].as_ref().expect("entry should parse");
        assert_eq!(entry.student_username, "ali123");
        assert_eq!(entry.score, 18.5);
        assert_eq!(entry.month, Month::Mehr);
        assert_eq!(entry.status, GradeStatus::Great);
    }

    #[test]
    fn test_missing_fields_fail_per_index() {
        let req = batch(&[
            ["ali123", "math", "18", "19", "mehr", "good"],
            ["reza99", "", "18", "19", "mehr", "good"],
            ["sara01", "math", "abc", "19", "mehr", "good"],
            ["mina77", "math", "15", "19", "tir", "good"],
        ]);
        let entries = req.entries();
        assert_eq!(entries.iter().filter(|e| e.is_some()).count(), 1);
        assert_eq!(entries.iter().filter(|e| e.is_none()).count(), 3);
    }

    #[test]
    fn test_short_parallel_arrays_count_as_missing() {
        let mut req = batch(&[["ali123", "math", "18", "19", "mehr", "good"]]);
        req.students.push("reza99".into());
        let entries = req.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].is_none());
    }

    #[test]
    fn test_scores_are_clamped() {
        let req = batch(&[["ali123", "math", "25", "-3", "aban", "average"]]);
        let entry = req.entries().remove(0).expect("entry should parse");
        assert_eq!(entry.score, 20.0);
        assert_eq!(entry.class_activity, 0.0);
    }

    #[test]
    fn test_non_finite_scores_rejected() {
        let req = batch(&[["ali123", "math", "NaN", "10", "aban", "average"]]);
        assert!(req.entries()[0].is_none());
    }

    #[test]
    fn test_attendance_selections_skip_invalid() {
        let mut sub = AttendanceSubmission::default();
        sub.statuses.insert("5".into(), "present".into());
        sub.statuses.insert("6".into(), "".into());
        sub.statuses.insert("x".into(), "late".into());
        sub.statuses.insert("7".into(), "sleeping".into());
        let selections = sub.selections();
        assert_eq!(selections.len(), 1);
        assert_eq!(selections.get(&5), Some(&AttendanceStatus::Present));
    }

    #[test]
    fn test_update_grade_range() {
        let ok = UpdateGradeRequest {
            score: 20.0,
            class_activity: 0.0,
            month: None,
            status: None,
        };
        assert!(ok.validate().is_ok());
        let bad = UpdateGradeRequest {
            score: 20.5,
            class_activity: 3.0,
            month: None,
            status: None,
        };
        assert!(bad.validate().is_err());
    }
}
