//! 学校日历
//!
//! 所有按天的比较都使用学校时区下的公历日期；太阳历（贾拉利历）只用于展示。

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

/// 学校时区中的某一天
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolDay {
    pub date: NaiveDate,
}

impl SchoolDay {
    /// 计算包含 `now` 的学校本地日
    pub fn containing(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            date: now.with_timezone(&offset).date_naive(),
        }
    }

    /// 写入考勤表唯一索引的日期键
    pub fn attended_on(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn solar_label(&self) -> String {
        solar_label(self.date)
    }
}

/// 公历转太阳历，返回 (年, 月, 日)
pub fn gregorian_to_jalali(gy: i64, gm: i64, gd: i64) -> (i64, i64, i64) {
    const G_DAYS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let gy2 = if gm > 2 { gy + 1 } else { gy };
    let mut days = 355_666 + 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100 + (gy2 + 399) / 400
        + gd
        + G_DAYS[(gm - 1).clamp(0, 11) as usize];

    let mut jy = -1595 + 33 * (days / 12_053);
    days %= 12_053;
    jy += 4 * (days / 1461);
    days %= 1461;
    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (jm, jd) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };
    (jy, jm, jd)
}

/// 太阳历日期标签，如 `1403/01/01`
pub fn solar_label(date: NaiveDate) -> String {
    let (jy, jm, jd) = gregorian_to_jalali(
        i64::from(date.year()),
        i64::from(date.month()),
        i64::from(date.day()),
    );
    format!("{jy:04}/{jm:02}/{jd:02}")
}

/// 时间戳在学校时区的 `HH:MM`
pub fn local_time_label(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tehran() -> FixedOffset {
        FixedOffset::east_opt(210 * 60).unwrap()
    }

    #[test]
    fn test_jalali_known_dates() {
        assert_eq!(gregorian_to_jalali(2024, 3, 20), (1403, 1, 1));
        assert_eq!(gregorian_to_jalali(2025, 3, 21), (1404, 1, 1));
        assert_eq!(gregorian_to_jalali(2024, 3, 19), (1402, 12, 29));
        assert_eq!(gregorian_to_jalali(2023, 9, 23), (1402, 7, 1));
        assert_eq!(gregorian_to_jalali(2026, 10, 18), (1405, 7, 26));
        assert_eq!(gregorian_to_jalali(2000, 1, 1), (1378, 10, 11));
    }

    #[test]
    fn test_solar_label_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert_eq!(solar_label(date), "1403/01/01");
    }

    #[test]
    fn test_day_window_uses_school_offset() {
        // 2024-03-19 21:00 UTC 在 +03:30 时区已是 3 月 20 日 00:30
        let now = Utc.with_ymd_and_hms(2024, 3, 19, 21, 0, 0).unwrap();
        let day = SchoolDay::containing(now, tehran());
        assert_eq!(day.attended_on(), "2024-03-20");
        assert_eq!(day.solar_label(), "1403/01/01");
        // 本地午夜对应 UTC 20:30，前一秒仍属前一天
        let before_midnight = Utc.with_ymd_and_hms(2024, 3, 19, 20, 29, 59).unwrap();
        assert_eq!(
            SchoolDay::containing(before_midnight, tehran()).attended_on(),
            "2024-03-19"
        );
    }

    #[test]
    fn test_same_local_day_same_window() {
        let morning = Utc.with_ymd_and_hms(2024, 5, 1, 4, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();
        assert_eq!(
            SchoolDay::containing(morning, tehran()),
            SchoolDay::containing(evening, tehran())
        );
        let next = Utc.with_ymd_and_hms(2024, 5, 1, 21, 0, 0).unwrap();
        assert_ne!(
            SchoolDay::containing(morning, tehran()),
            SchoolDay::containing(next, tehran())
        );
    }

    #[test]
    fn test_local_time_label() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 4, 15, 0).unwrap();
        assert_eq!(local_time_label(ts, tehran()), "07:45");
    }
}
