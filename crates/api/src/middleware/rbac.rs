//! Role-based access control.
//!
//! Route-level guards are extractors wrapping [`AuthUser`]. Resource-level
//! checks (owner or admin) go through [`ensure_allowed`] once the handler has
//! loaded the owner. Both delegate the decision to
//! [`kb_core::permissions::authorize`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kb_core::error::CoreError;
use kb_core::permissions::{authorize, Actor, Policy};
use kb_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_allowed(&user.actor(), Policy::AdminOnly, None, "Admin role required")?;
        Ok(RequireAdmin(user))
    }
}

/// Reject with 403 unless `actor` satisfies `policy` for a resource owned by `owner`.
pub fn ensure_allowed(
    actor: &Actor,
    policy: Policy,
    owner: Option<DbId>,
    message: &str,
) -> Result<(), AppError> {
    if authorize(actor, policy, owner).is_allowed() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(message.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use kb_core::roles::Role;

    use super::*;

    #[test]
    fn owner_passes_owner_or_admin() {
        let actor = Actor::User {
            id: 5,
            role: Role::User,
        };
        assert!(ensure_allowed(&actor, Policy::OwnerOrAdmin, Some(5), "nope").is_ok());
    }

    #[test]
    fn stranger_gets_forbidden_with_message() {
        let actor = Actor::User {
            id: 6,
            role: Role::User,
        };
        let err = ensure_allowed(&actor, Policy::OwnerOrAdmin, Some(5), "Not yours").unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Forbidden(msg)) if msg == "Not yours");
    }
}
