use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // 用户 ID
    pub role: String, // 用户角色
    pub exp: usize,   // 过期时间戳
    pub iat: usize,   // 签发时间戳
    #[serde(default)]
    pub ver: i32, // 签发时的令牌版本
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok()
    }

    /// 距离过期的剩余秒数
    pub fn remaining_secs(&self) -> u64 {
        let now = chrono::Utc::now().timestamp().max(0) as usize;
        self.exp.saturating_sub(now) as u64
    }
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// 根据“记住我”选择令牌有效期
    pub fn token_lifetime(remember_me: bool) -> chrono::Duration {
        let config = AppConfig::get();
        if remember_me {
            chrono::Duration::days(config.jwt.remember_me_expiry)
        } else {
            chrono::Duration::minutes(config.jwt.access_token_expiry)
        }
    }

    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
        token_version: i32,
        remember_me: bool,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_token_with_expiry(
            user_id,
            role,
            token_version,
            Self::token_lifetime(remember_me),
        )
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        user_id: i64,
        role: &str,
        token_version: i32,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
            ver: token_version,
        };

        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证 JWT token
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    /// 创建 Access Token Cookie；未勾选“记住我”时为会话 Cookie
    pub fn create_access_token_cookie(token: &str, remember_me: bool) -> Cookie<'static> {
        let config = AppConfig::get();
        let mut cookie = Cookie::build(ACCESS_TOKEN_COOKIE, token.to_string())
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish();
        if remember_me {
            cookie.set_max_age(actix_web::cookie::time::Duration::days(
                config.jwt.remember_me_expiry,
            ));
        }
        cookie
    }

    /// 创建空的 Access Token Cookie（用于注销）
    pub fn create_empty_access_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(ACCESS_TOKEN_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从 Authorization 头或 Cookie 中提取令牌
    pub fn extract_token(req: &actix_web::HttpRequest) -> Option<String> {
        Self::extract_token_from_parts(
            req.headers()
                .get(actix_web::http::header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok()),
            req.cookie(ACCESS_TOKEN_COOKIE)
                .map(|c| c.value().to_string()),
        )
    }

    pub fn extract_token_from_parts(
        authorization: Option<&str>,
        cookie: Option<String>,
    ) -> Option<String> {
        authorization
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| cookie.filter(|c| !c.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = JwtUtils::generate_access_token(42, "teacher", 2, false).unwrap();
        let claims = JwtUtils::verify_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "teacher");
        assert_eq!(claims.ver, 2);
        assert!(claims.remaining_secs() > 0);
    }

    #[test]
    fn test_remember_me_lives_longer() {
        assert!(JwtUtils::token_lifetime(true) > JwtUtils::token_lifetime(false));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = JwtUtils::generate_access_token(1, "admin", 0, false).unwrap();
        let tampered = format!("{token}x");
        assert!(JwtUtils::verify_token(&tampered).is_err());
    }

    #[test]
    fn test_extract_prefers_bearer_header() {
        assert_eq!(
            JwtUtils::extract_token_from_parts(Some("Bearer abc"), Some("cookie".into())),
            Some("abc".to_string())
        );
        assert_eq!(
            JwtUtils::extract_token_from_parts(Some("Basic xyz"), Some("cookie".into())),
            Some("cookie".to_string())
        );
        assert_eq!(JwtUtils::extract_token_from_parts(None, Some(String::new())), None);
    }
}
