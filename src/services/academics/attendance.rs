use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    academics::{
        entities::AttendanceRecord,
        requests::AttendanceSubmission,
        responses::{AttendanceSummary, AttendanceView, TodayAttendance},
    },
};
use crate::services::{current_teacher, storage_error_response, try_response};
use crate::utils::calendar::{SchoolDay, local_time_label};
use chrono::FixedOffset;

use super::{AcademicService, owned_lesson};

fn today(service: &AcademicService) -> SchoolDay {
    SchoolDay::containing(chrono::Utc::now(), service.get_config().school_offset())
}

/// 时间取首次点名的时刻，同日改判不改变
fn today_entry(
    record: &AttendanceRecord,
    offset: FixedOffset,
    date_label: &str,
) -> TodayAttendance {
    TodayAttendance {
        status: record.status,
        time: local_time_label(record.created_at, offset),
        solar_date: date_label.to_string(),
    }
}

pub async fn handle_attendance_view(
    service: &AcademicService,
    lesson_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(current_teacher(&storage, request).await);
    let lesson = try_response!(owned_lesson(&storage, &teacher, lesson_id).await);

    let day = today(service);
    let offset = service.get_config().school_offset();
    let date_label = day.solar_label();

    let students = match storage.list_lesson_students(lesson.id).await {
        Ok(students) => students,
        Err(e) => return Ok(storage_error_response(&e, "Loading roster")),
    };
    let records = match storage.list_day_attendance(lesson.id, day).await {
        Ok(records) => records,
        Err(e) => return Ok(storage_error_response(&e, "Loading attendance")),
    };

    let today: HashMap<i64, TodayAttendance> = records
        .into_iter()
        .map(|record| (record.student_id, today_entry(&record, offset, &date_label)))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttendanceView {
            lesson,
            students,
            today,
            date_label,
        },
        "Attendance",
    )))
}

pub async fn handle_record_attendance(
    service: &AcademicService,
    lesson_id: i64,
    submission: AttendanceSubmission,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(current_teacher(&storage, request).await);
    let lesson = try_response!(owned_lesson(&storage, &teacher, lesson_id).await);

    let day = today(service);
    let date_label = day.solar_label();

    let selections = submission.selections();
    if selections.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::error(
            ErrorCode::AttendanceNothingSelected,
            AttendanceSummary {
                inserted: 0,
                updated: 0,
                date_label,
            },
            "No attendance status was selected",
        )));
    }

    match storage.record_attendance(lesson.id, day, selections).await {
        Ok(outcome) => {
            tracing::info!(
                "Attendance for lesson {} on {}: {} inserted, {} updated",
                lesson.id,
                day.attended_on(),
                outcome.inserted,
                outcome.updated
            );
            let message = format!(
                "Attendance for {}: {} new, {} updated",
                date_label, outcome.inserted, outcome.updated
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AttendanceSummary {
                    inserted: outcome.inserted,
                    updated: outcome.updated,
                    date_label,
                },
                message,
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Saving attendance")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::academics::entities::AttendanceStatus;
    use chrono::TimeZone;

    #[test]
    fn test_time_label_uses_first_record_time() {
        let offset = FixedOffset::east_opt(210 * 60).unwrap();
        let record = AttendanceRecord {
            id: 1,
            student_id: 7,
            lesson_id: 3,
            status: AttendanceStatus::Late,
            attended_on: "2024-05-01".into(),
            created_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 4, 15, 0).unwrap(),
            updated_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        };

        let entry = today_entry(&record, offset, "1403/02/12");
        assert_eq!(entry.time, "07:45");
        assert_eq!(entry.status, AttendanceStatus::Late);
        assert_eq!(entry.solar_date, "1403/02/12");
    }
}
