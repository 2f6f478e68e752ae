/*!
 * JWT 认证中间件
 *
 * 从 `Authorization: Bearer <token>` 请求头或 `access_token` Cookie 中读取令牌，
 * 校验签名、有效期、注销状态与令牌版本，并把当前用户放入请求扩展。
 * 修改密码会递增用户的令牌版本，此前签发的全部令牌随之失效。
 *
 * 没有有效身份时以匿名身份继续，由后续的 `RequireRole` 决定返回 404 还是 401。
 *
 * ```rust,ignore
 * web::scope("/account/teacher")
 *     .wrap(RequireRole::new(&[UserRole::Teacher]))
 *     .wrap(RequireJWT::lenient())
 *     .route("", web::get().to(teacher_panel))
 * ```
 *
 * 在处理程序中：
 *
 * ```rust,ignore
 * let user = RequireJWT::extract_user(&req);
 * ```
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use jsonwebtoken::errors::ErrorKind;
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

use super::create_error_response;

/// 已认证用户的缓存键
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

/// 已注销令牌的缓存键
pub fn revoked_cache_key(token: &str) -> String {
    format!("revoked:{token}")
}

/// 用户当前令牌版本的缓存键，修改密码后写入
pub fn token_version_cache_key(user_id: i64) -> String {
    format!("token_version:{user_id}")
}

#[derive(Clone, Copy)]
pub struct RequireJWT;

impl RequireJWT {
    pub fn lenient() -> Self {
        Self
    }
}

#[derive(Debug)]
enum AuthFailure {
    Missing,
    Expired,
    Invalid(String),
}

impl AuthFailure {
    fn message(&self) -> String {
        match self {
            AuthFailure::Missing => "Authentication required".to_string(),
            AuthFailure::Expired => "Token expired".to_string(),
            AuthFailure::Invalid(reason) => format!("Unauthorized: {reason}"),
        }
    }
}

// 辅助函数：提取并验证 JWT access token
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = JwtUtils::extract_token(req.request()).ok_or(AuthFailure::Missing)?;

    let claims = JwtUtils::verify_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        match err.kind() {
            ErrorKind::ExpiredSignature => AuthFailure::Expired,
            _ => AuthFailure::Invalid("Invalid JWT token".to_string()),
        }
    })?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AuthFailure::Invalid("Cache not configured".to_string()))?;

    // 已注销的令牌在自然过期前一直无效
    if let CacheResult::Found(_) = cache.get_raw(&revoked_cache_key(&token)).await {
        return Err(AuthFailure::Invalid("Token revoked".to_string()));
    }

    let user_id = claims
        .user_id()
        .ok_or_else(|| AuthFailure::Invalid("Invalid user ID in JWT".to_string()))?;

    // 用户缓存可能早于密码修改写入，先比对版本
    if let CacheResult::Found(raw) = cache.get_raw(&token_version_cache_key(user_id)).await
        && raw.parse::<i32>().is_ok_and(|current| claims.ver < current)
    {
        return Err(AuthFailure::Invalid("Token superseded".to_string()));
    }

    // 从缓存中获取用户信息
    if let CacheResult::Found(user) = cache.get_json::<User>(&user_cache_key(&token)).await {
        return Ok(user);
    }
    debug!("User not found in cache, loading from storage");

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AuthFailure::Invalid("Storage not configured".to_string()))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            warn!("Failed to retrieve user {} from storage: {}", user_id, e);
            AuthFailure::Invalid("Failed to retrieve user".to_string())
        })?
        .ok_or_else(|| AuthFailure::Invalid("User not found".to_string()))?;

    if !user.is_active() {
        return Err(AuthFailure::Invalid("User is not active".to_string()));
    }

    if claims.ver < user.token_version {
        return Err(AuthFailure::Invalid("Token superseded".to_string()));
    }

    // 缓存时间不超过令牌剩余有效期
    let ttl = AppConfig::get()
        .cache
        .default_ttl
        .min(claims.remaining_secs())
        .max(1);
    cache.insert_json(user_cache_key(&token), &user, ttl).await;

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(err) => {
                    debug!("Continuing anonymously on {}: {}", req.path(), err.message());
                    Ok(srv.call(req).await?.map_into_left_body())
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 当前用户，匿名访问时为 None
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }
}
