use actix_session::SessionExt;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::core::AppError;
use crate::modules::users::models::UserRole;

pub const SESSION_USER_ID: &str = "user_id";
pub const SESSION_USER_NAME: &str = "user_name";
pub const SESSION_USER_ROLE: &str = "user_role";

/// Paths reachable without a session
const PUBLIC_PATHS: &[&str] = &["/", "/health", "/auth/login"];

/// Session authentication middleware.
///
/// Rejects requests without a logged-in user, except for the public paths.
/// The session cookie itself is managed by `actix_session::SessionMiddleware`,
/// which must run before this guard.
pub struct SessionGuard;

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();

        Box::pin(async move {
            if PUBLIC_PATHS.contains(&req.path()) {
                return svc.call(req).await;
            }

            let session = req.get_session();
            let logged_in = session
                .get::<i64>(SESSION_USER_ID)
                .map_err(|e| Error::from(AppError::internal(e.to_string())))?
                .is_some();

            if !logged_in {
                return Err(Error::from(AppError::unauthorized(
                    "Login required",
                )));
            }

            svc.call(req).await
        })
    }
}

/// The logged-in user, extracted from the session.
///
/// Handlers that need to know who is acting (expense audit trail, annulment,
/// admin-only operations) take this as a parameter.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Administrator
    }

    /// Guards operations restricted to administrators
    pub fn require_admin(&self) -> crate::core::Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator role required"))
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.get_session();

        let extract = || -> std::result::Result<CurrentUser, Error> {
            let id = session
                .get::<i64>(SESSION_USER_ID)
                .map_err(|e| Error::from(AppError::internal(e.to_string())))?
                .ok_or_else(|| Error::from(AppError::unauthorized("Login required")))?;

            let name = session
                .get::<String>(SESSION_USER_NAME)
                .map_err(|e| Error::from(AppError::internal(e.to_string())))?
                .unwrap_or_default();

            let role = session
                .get::<String>(SESSION_USER_ROLE)
                .map_err(|e| Error::from(AppError::internal(e.to_string())))?
                .and_then(|r| UserRole::try_from(r).ok())
                .ok_or_else(|| Error::from(AppError::unauthorized("Invalid session")))?;

            Ok(CurrentUser { id, name, role })
        };

        ready(extract())
    }
}
