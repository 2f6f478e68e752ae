use serde::{Deserialize, Serialize};

/// 响应信封中的数字错误码
///
/// 按千位分组：1xxx 通用，2xxx 认证，3xxx 账户，4xxx 教务，5xxx 内容。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,
    ValidationFailed = 1422,

    // 认证
    AuthFailed = 2000,
    TokenInvalid = 2001,
    TokenExpired = 2002,
    RegisterFailed = 2010,
    PasswordPolicyViolation = 2011,
    PasswordMismatch = 2012,
    UsernameAlreadyExists = 2013,
    OldPasswordIncorrect = 2014,
    PasswordUnchanged = 2015,
    AlreadyAuthenticated = 2016,

    // 账户与资料
    UserNotFound = 3000,
    ProfileNotFound = 3001,
    ProfileUpdateFailed = 3002,
    FullNameEnAlreadyExists = 3003,

    // 教务
    LessonNotFound = 4000,
    GradeNotFound = 4001,
    GradeBatchFailed = 4002,
    GradeOutOfRange = 4003,
    AttendanceSaveFailed = 4010,
    AttendanceNothingSelected = 4011,

    // 内容
    ArticleNotFound = 5000,
    SlugAlreadyExists = 5001,
    NewsNotFound = 5010,
    GalleryImageNotFound = 5020,
    CommentNotFound = 5030,
    ContactMessageNotFound = 5040,
    TeacherNotFound = 5050,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_codes_are_stable() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::NotFound as i32, 1004);
        assert_eq!(ErrorCode::AttendanceSaveFailed as i32, 4010);
        assert_eq!(ErrorCode::SlugAlreadyExists as i32, 5001);
    }
}
