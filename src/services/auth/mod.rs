pub mod login;
pub mod logout;
pub mod password;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::requests::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    // 当前会话状态
    pub async fn session_status(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        login::handle_session_status(request).await
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(request).await
    }

    // 注册页可选项
    pub async fn register_options(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        register::handle_register_options(request).await
    }

    // 学生或家长注册
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request, request).await
    }

    pub async fn change_password_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        password::handle_change_password_form(request).await
    }

    pub async fn change_password(
        &self,
        change_request: ChangePasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::handle_change_password(self, change_request, request).await
    }
}
