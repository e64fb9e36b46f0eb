//! Viewer identity extractors.
//!
//! The host platform authenticates users upstream and forwards who they are
//! in request headers.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

use super::error::AppError;

/// Header carrying the viewer's user id.
pub static USER_ID_HEADER: &str = "X-User-Id";

/// Header carrying the viewer's comma-separated roles.
pub static USER_ROLES_HEADER: &str = "X-User-Roles";

/// Signed-in viewer.
///
/// Use this in handlers that need a user:
/// ```ignore
/// async fn create(viewer: Viewer) -> impl Responder {
///     format!("Hello, user {}!", viewer.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Viewer {
    pub user_id: String,
    pub roles: Vec<String>,
}

impl Viewer {
    /// Check if the viewer has a specific role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_moderator(&self) -> bool {
        self.has_role("moderator")
    }

    fn from_headers(req: &HttpRequest) -> Option<Self> {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)?
            .to_str()
            .ok()?
            .trim()
            .to_string();
        if user_id.is_empty() {
            return None;
        }

        let roles = req
            .headers()
            .get(USER_ROLES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.split(',')
                    .map(|r| r.trim().to_lowercase())
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Some(Self { user_id, roles })
    }
}

impl FromRequest for Viewer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req).ok_or_else(|| {
            AppError::Unauthorized(format!("{} header is required", USER_ID_HEADER))
        }))
    }
}

/// Optional viewer extractor - anonymous requests yield `None`.
pub struct OptionalViewer(pub Option<Viewer>);

impl OptionalViewer {
    pub fn user_id(&self) -> Option<&str> {
        self.0.as_ref().map(|v| v.user_id.as_str())
    }
}

impl FromRequest for OptionalViewer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalViewer(Viewer::from_headers(req))))
    }
}
