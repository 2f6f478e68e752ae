#![allow(dead_code)]

use std::sync::Arc;

use rust_school_portal::cache::ObjectCache;
use rust_school_portal::cache::object_cache::moka::MokaCacheWrapper;
use rust_school_portal::models::academics::{entities::Lesson, requests::CreateLessonRequest};
use rust_school_portal::models::profiles::entities::{GradeLevel, NewProfile, Profile, Student, Teacher};
use rust_school_portal::models::users::entities::{NewUser, User};
use rust_school_portal::storage::Storage;
use rust_school_portal::storage::sea_orm_storage::SeaOrmStorage;
use rust_school_portal::utils::jwt::JwtUtils;

/// 构建与生产一致的路由与提取器配置
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(rust_school_portal::utils::json_error_handler),
                )
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(rust_school_portal::utils::query_error_handler),
                )
                .app_data(
                    actix_web::web::PathConfig::default()
                        .error_handler(rust_school_portal::utils::path_error_handler),
                )
                .app_data(actix_web::web::Data::new($ctx.storage.clone()))
                .app_data(actix_web::web::Data::new($ctx.cache.clone()))
                .configure(rust_school_portal::routes::configure_all)
                .default_service(actix_web::web::to(|| async {
                    rust_school_portal::middlewares::not_found_response()
                })),
        )
        .await
    };
}

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

impl TestContext {
    pub async fn new() -> Self {
        let storage = SeaOrmStorage::in_memory().await.expect("in-memory storage");
        Self {
            storage: Arc::new(storage),
            cache: Arc::new(MokaCacheWrapper::with_capacity(1_000, 600)),
        }
    }

    /// 直接写库创建用户，密码哈希为占位值，只能通过令牌访问
    pub async fn add_user(&self, username: &str, profile: NewProfile) -> (User, Profile) {
        self.storage
            .create_user_with_profile(
                NewUser {
                    username: username.to_string(),
                    password_hash: "unusable".into(),
                    role: profile.role(),
                    is_staff: false,
                    phone_number: None,
                },
                profile,
            )
            .await
            .expect("create user")
    }

    pub async fn add_admin(&self, username: &str) -> User {
        self.add_user(
            username,
            NewProfile::Admin {
                first_name: username.into(),
                last_name: String::new(),
                title: None,
                description: None,
            },
        )
        .await
        .0
    }

    pub async fn add_teacher(&self, username: &str) -> (User, Teacher) {
        match self
            .add_user(
                username,
                NewProfile::Teacher {
                    full_name: username.to_uppercase(),
                    full_name_en: username.to_string(),
                },
            )
            .await
        {
            (user, Profile::Teacher(teacher)) => (user, teacher),
            other => panic!("unexpected profile: {other:?}"),
        }
    }

    pub async fn add_student(&self, username: &str, last_name: &str) -> (User, Student) {
        match self
            .add_user(
                username,
                NewProfile::Student {
                    first_name: username.to_string(),
                    last_name: last_name.to_string(),
                    grade_level: GradeLevel::TenthComputer,
                },
            )
            .await
        {
            (user, Profile::Student(student)) => (user, student),
            other => panic!("unexpected profile: {other:?}"),
        }
    }

    pub async fn add_parent(&self, username: &str) -> User {
        self.add_user(
            username,
            NewProfile::Parent {
                first_name: username.into(),
                last_name: "Family".into(),
            },
        )
        .await
        .0
    }

    pub async fn add_lesson(&self, name: &str, teacher_id: i64, student_ids: Vec<i64>) -> Lesson {
        self.storage
            .create_lesson(CreateLessonRequest {
                name: name.to_string(),
                teacher_id,
                grade_level: "tenth_computer".into(),
                year: "1403".into(),
                student_ids,
            })
            .await
            .expect("create lesson")
    }
}

pub fn bearer(user: &User) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user.id, user.role.as_str(), user.token_version, false)
        .expect("sign token");
    ("Authorization", format!("Bearer {token}"))
}
