/*!
 * 基于角色的访问控制中间件
 *
 * 必须包在 RequireJWT 之内使用（即 RequireJWT 先执行）。
 * 拒绝时的状态码由策略决定：
 *
 * | 情况 | 默认 | 可选 |
 * |---|---|---|
 * | 匿名访问 | 404 | `challenge_anonymous()` → 401 |
 * | 角色不符 | 404 | `forbid_mismatch()` → 403 |
 *
 * 默认的 404 与资源不存在时的响应完全相同。
 *
 * ```rust,ignore
 * web::scope("/account/lessons")
 *     .wrap(
 *         RequireRole::new(&[UserRole::Admin, UserRole::Teacher])
 *             .challenge_anonymous()
 *             .forbid_mismatch(),
 *     )
 *     .wrap(RequireJWT::lenient())
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::{create_error_response, not_found_response};

/// 拒绝访问时返回的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    NotFound,
    Unauthorized,
    Forbidden,
}

impl Denial {
    fn respond(self) -> actix_web::HttpResponse {
        match self {
            Denial::NotFound => not_found_response(),
            Denial::Unauthorized => create_error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Authentication required",
            ),
            Denial::Forbidden => create_error_response(
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden,
                "Access denied.",
            ),
        }
    }
}

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Vec<UserRole>,
    on_anonymous: Denial,
    on_mismatch: Denial,
}

impl RequireRole {
    /// 允许任一给定角色，拒绝时一律 404
    pub fn new(roles: &[UserRole]) -> Self {
        Self {
            allowed_roles: roles.to_vec(),
            on_anonymous: Denial::NotFound,
            on_mismatch: Denial::NotFound,
        }
    }

    /// 任何已登录用户均可
    pub fn authenticated() -> Self {
        Self::new(UserRole::all_roles()).challenge_anonymous()
    }

    /// 匿名访问返回 401
    pub fn challenge_anonymous(mut self) -> Self {
        self.on_anonymous = Denial::Unauthorized;
        self
    }

    /// 角色不符返回 403
    pub fn forbid_mismatch(mut self) -> Self {
        self.on_mismatch = Denial::Forbidden;
        self
    }

    /// 判定结果，`None` 表示放行
    pub fn check(&self, role: Option<UserRole>) -> Option<Denial> {
        match role {
            None => Some(self.on_anonymous),
            Some(role) if self.allowed_roles.contains(&role) => None,
            Some(_) => Some(self.on_mismatch),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            policy: Rc::new(self.clone()),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    policy: Rc<RequireRole>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let policy = self.policy.clone();

        Box::pin(async move {
            let user = req.extensions().get::<User>().map(|u| (u.id, u.role));

            match policy.check(user.map(|(_, role)| role)) {
                None => Ok(srv.call(req).await?.map_into_left_body()),
                Some(denial) => {
                    info!(
                        "Access denied on {} for {:?}. Allowed roles: {:?}",
                        req.path(),
                        user,
                        policy.allowed_roles
                    );
                    Ok(req.into_response(denial.respond().map_into_right_body()))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_hides_everything() {
        let policy = RequireRole::new(&[UserRole::Teacher]);
        assert_eq!(policy.check(None), Some(Denial::NotFound));
        assert_eq!(policy.check(Some(UserRole::Student)), Some(Denial::NotFound));
        assert_eq!(policy.check(Some(UserRole::Teacher)), None);
    }

    #[test]
    fn test_shared_endpoint_policy() {
        let policy = RequireRole::new(&[UserRole::Admin, UserRole::Teacher])
            .challenge_anonymous()
            .forbid_mismatch();
        assert_eq!(policy.check(None), Some(Denial::Unauthorized));
        assert_eq!(policy.check(Some(UserRole::Parent)), Some(Denial::Forbidden));
        assert_eq!(policy.check(Some(UserRole::Admin)), None);
    }

    #[test]
    fn test_authenticated_admits_every_role() {
        let policy = RequireRole::authenticated();
        for role in UserRole::all_roles() {
            assert_eq!(policy.check(Some(*role)), None);
        }
        assert_eq!(policy.check(None), Some(Denial::Unauthorized));
    }
}
