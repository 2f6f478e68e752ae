use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::SchoolError;
use crate::models::{
    ApiResponse,
    academics::responses::{GradeStatusCounts, StudentPanelResponse},
};
use crate::services::{current_student, storage_error_response, try_response};

use super::PanelService;

const RECENT_ATTENDANCE_LIMIT: u64 = 5;

pub async fn handle_student_panel(
    service: &PanelService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = try_response!(current_student(&storage, request).await);

    let load = async {
        let grades = storage.list_student_grades(student.id).await?;
        let recent_attendance = storage
            .recent_student_attendance(student.id, RECENT_ATTENDANCE_LIMIT)
            .await?;
        let lesson_count = storage.count_student_lessons(student.id).await?;
        let attendance_counts = storage.student_attendance_counts(student.id).await?;
        Ok::<_, SchoolError>((grades, recent_attendance, lesson_count, attendance_counts))
    };

    match load.await {
        Ok((grades, recent_attendance, lesson_count, attendance_counts)) => {
            let grade_status_counts = GradeStatusCounts::tally(grades.iter().map(|row| &row.grade));
            let message = if grades.is_empty() {
                "No grades recorded yet"
            } else {
                "Student panel"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentPanelResponse {
                    student,
                    grades,
                    recent_attendance,
                    lesson_count,
                    grade_status_counts,
                    attendance_counts,
                },
                message,
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Loading student panel")),
    }
}
