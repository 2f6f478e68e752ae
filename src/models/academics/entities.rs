use serde::{Deserialize, Serialize};

/// 学年中的九个上课月份（太阳历）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Month {
    Mehr,
    Aban,
    Azar,
    Dey,
    Bahman,
    Esfand,
    Farvardin,
    Ordibehesht,
    Khordad,
}

impl Month {
    const TABLE: [(Month, &'static str, &'static str); 9] = [
        (Month::Mehr, "mehr", "مهر"),
        (Month::Aban, "aban", "آبان"),
        (Month::Azar, "azar", "آذر"),
        (Month::Dey, "dey", "دی"),
        (Month::Bahman, "bahman", "بهمن"),
        (Month::Esfand, "esfand", "اسفند"),
        (Month::Farvardin, "farvardin", "فروردین"),
        (Month::Ordibehesht, "ordibehesht", "اردیبهشت"),
        (Month::Khordad, "khordad", "خرداد"),
    ];

    pub fn as_str(&self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(m, _, _)| m == self)
            .map(|(_, token, _)| *token)
            .unwrap_or("mehr")
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Month {
    type Err = String;

    /// 同时接受 ASCII 记号和波斯语月份名
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::TABLE
            .iter()
            .find(|(_, token, name)| token.eq_ignore_ascii_case(s) || *name == s)
            .map(|(m, _, _)| *m)
            .ok_or_else(|| format!("Invalid month: {s}"))
    }
}

// 成绩评语
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GradeStatus {
    Average,
    Good,
    Great,
}

impl std::fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeStatus::Average => write!(f, "average"),
            GradeStatus::Good => write!(f, "good"),
            GradeStatus::Great => write!(f, "great"),
        }
    }
}

impl std::str::FromStr for GradeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "average" | "متوسط" => Ok(GradeStatus::Average),
            "good" | "خوب" => Ok(GradeStatus::Good),
            "great" | "عالی" => Ok(GradeStatus::Great),
            other => Err(format!("Invalid grade status: {other}")),
        }
    }
}

// 考勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Late => write!(f, "late"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            other => Err(format!("Invalid attendance status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub name: String,
    pub teacher_id: i64,
    pub grade_level: String,
    pub year: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub lesson_id: i64,
    pub month: Month,
    pub score: f64,
    pub class_activity: f64,
    pub status: GradeStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub lesson_id: i64,
    pub status: AttendanceStatus,
    /// 学校本地日期 YYYY-MM-DD
    pub attended_on: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherContact {
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub subject: String,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
