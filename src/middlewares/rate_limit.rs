/*!
 * 速率限制中间件
 *
 * 按客户端 IP 对写请求（POST 等）计数，固定窗口内超过上限返回 429。
 * GET/HEAD/OPTIONS 不计数，登录、注册页面的读取不受影响。
 *
 * ```rust,ignore
 * web::resource("/account/login")
 *     .wrap(RateLimit::login())  // 5次/分钟
 *     .route(web::get().to(session_status))
 *     .route(web::post().to(login))
 * ```
 *
 * 计数器保存在各实例自带的 moka 缓存中，条目在窗口结束后过期。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode, header::CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// 速率限制配置
#[derive(Clone)]
pub struct RateLimit {
    /// 时间窗口内允许的最大请求数
    max_requests: u32,
    /// 时间窗口（秒）
    window_secs: u64,
    /// 限制键前缀（用于区分不同端点）
    key_prefix: String,
    /// 键: 前缀:IP，值: 窗口内的请求计数
    counters: Cache<String, u32>,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
            counters: Cache::builder()
                .time_to_live(Duration::from_secs(window_secs.max(1)))
                .max_capacity(100_000)
                .build(),
        }
    }

    /// 设置限制键前缀
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录端点限制：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 注册端点限制：3次/分钟/IP
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }
}

fn is_counted(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// 从请求中提取客户端 IP
///
/// 部署在反向代理之后时，需要代理写入正确的 X-Forwarded-For / X-Real-IP 头。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    // 只取第一个 IP（最接近客户端的）
    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP")
        && let Ok(ip) = real_ip.to_str()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<std::net::IpAddr>().is_ok()
}

/// 创建速率限制错误响应
fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            config: Rc::new(self.clone()),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    config: Rc<RateLimit>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let config = self.config.clone();

        Box::pin(async move {
            if !is_counted(req.method()) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let cache_key = format!("{}:ip:{}", config.key_prefix, extract_client_ip(&req));
            let current_count = config.counters.get(&cache_key).await.unwrap_or(0);

            if current_count >= config.max_requests {
                warn!(
                    "Rate limit exceeded for key: {} (count: {}/{})",
                    cache_key, current_count, config.max_requests
                );
                return Ok(req.into_response(
                    create_rate_limit_response(config.window_secs).map_into_right_body(),
                ));
            }

            config.counters.insert(cache_key, current_count + 1).await;

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{TestRequest, call_service, init_service};
    use actix_web::{App, HttpResponse, web};

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        let register = RateLimit::register();
        assert_eq!(register.max_requests, 3);
    }

    #[test]
    fn test_reads_are_not_counted() {
        assert!(!is_counted(&Method::GET));
        assert!(!is_counted(&Method::OPTIONS));
        assert!(is_counted(&Method::POST));
    }

    #[actix_web::test]
    async fn test_post_over_limit_gets_429() {
        let app = init_service(
            App::new().service(
                web::resource("/login")
                    .wrap(RateLimit::new(2, 60).with_prefix("t"))
                    .route(web::get().to(HttpResponse::Ok))
                    .route(web::post().to(HttpResponse::Ok)),
            ),
        )
        .await;

        for _ in 0..2 {
            let req = TestRequest::post().uri("/login").to_request();
            assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
        }
        let req = TestRequest::post().uri("/login").to_request();
        assert_eq!(
            call_service(&app, req).await.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        // 读取不受限制
        let req = TestRequest::get().uri("/login").to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
    }
}
