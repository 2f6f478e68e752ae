use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::{revoked_cache_key, user_cache_key};
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

/// 注销：令牌在自然过期前列入撤销表，并清除客户端 Cookie
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(token) = JwtUtils::extract_token(request) {
        revoke_token(request, &token).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_access_token_cookie())
        .json(ApiResponse::<()>::success_empty("Logged out")))
}

/// 无效或已过期的令牌无需撤销
pub(crate) async fn revoke_token(request: &HttpRequest, token: &str) {
    let Ok(claims) = JwtUtils::verify_token(token) else {
        return;
    };
    let Some(cache) = crate::services::resolve_cache(request) else {
        tracing::warn!("Cache unavailable, token for user {} not revoked", claims.sub);
        return;
    };
    cache
        .insert_raw(
            revoked_cache_key(token),
            claims.sub.clone(),
            claims.remaining_secs().max(1),
        )
        .await;
    cache.remove(&user_cache_key(token)).await;
    tracing::debug!("Revoked token for user {}", claims.sub);
}
