use serde::Deserialize;

// 教师修改个人资料
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeacherRequest {
    pub full_name: Option<String>,
    pub full_name_en: Option<String>,
    pub description: Option<String>,
    pub degree: Option<String>,
    pub teaching_experience: Option<i32>,
    pub image_url: Option<String>,
}

// 管理员为家长关联子女
#[derive(Debug, Deserialize)]
pub struct LinkChildRequest {
    pub parent_id: i64,
    pub student_id: i64,
}

// 管理员开启或关闭教师的成绩录入权限
#[derive(Debug, Deserialize)]
pub struct TeacherStatusRequest {
    pub status: bool,
}
