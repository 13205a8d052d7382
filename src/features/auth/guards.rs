//! Role-based authorization guards.
//!
//! Role hierarchy (from highest to lowest):
//! - admin: full access, including profile administration
//! - leader: can moderate the feed, manage minutes and their own cells
//! - member: regular access

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only endpoints.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

/// Guard for endpoints that require moderator access (admin or leader)
pub struct RequireModerator(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireModerator
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_moderator() {
            return Err(AppError::Forbidden(
                "Leader or admin access required".to_string(),
            ));
        }

        Ok(RequireModerator(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    use crate::shared::test_helpers::{create_admin_user, create_member_user};

    fn parts_with(user: AuthenticatedUser) -> Parts {
        let mut request = Request::builder().body(()).unwrap();
        request.extensions_mut().insert(user);
        request.into_parts().0
    }

    #[tokio::test]
    async fn admin_guard_accepts_admin() {
        let mut parts = parts_with(create_admin_user());
        assert!(RequireAdmin::from_request_parts(&mut parts, &()).await.is_ok());
    }

    #[tokio::test]
    async fn admin_guard_rejects_member() {
        let mut parts = parts_with(create_member_user());
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn moderator_guard_rejects_unauthenticated_request() {
        let mut parts = Request::builder().body(()).unwrap().into_parts().0;
        let result = RequireModerator::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
