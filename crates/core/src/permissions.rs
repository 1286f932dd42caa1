//! Authorization decisions.
//!
//! Every access check goes through [`authorize`]: the caller is resolved to a
//! [`Capability`] relative to the resource owner, and the route's [`Policy`]
//! decides whether that capability is enough.

use crate::roles::Role;
use crate::types::DbId;

/// Who is making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User { id: DbId, role: Role },
}

/// What the actor is relative to one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Administrator: may act on any resource.
    Admin,
    /// Authenticated user who owns the resource.
    Owner,
    /// Authenticated user with no claim on the resource.
    Member,
    /// No credentials.
    Anonymous,
}

/// Access rule attached to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Public,
    Authenticated,
    OwnerOrAdmin,
    AdminOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

impl Actor {
    /// Resolve the actor's capability against a resource owned by `owner`.
    ///
    /// Resources without a recorded owner can only be claimed by admins.
    pub fn capability(&self, owner: Option<DbId>) -> Capability {
        match *self {
            Actor::Anonymous => Capability::Anonymous,
            Actor::User {
                role: Role::Admin, ..
            } => Capability::Admin,
            Actor::User { id, .. } if owner == Some(id) => Capability::Owner,
            Actor::User { .. } => Capability::Member,
        }
    }

    pub fn user_id(&self) -> Option<DbId> {
        match *self {
            Actor::Anonymous => None,
            Actor::User { id, .. } => Some(id),
        }
    }
}

/// Decide whether `actor` may perform an operation guarded by `policy` on a
/// resource owned by `owner`.
pub fn authorize(actor: &Actor, policy: Policy, owner: Option<DbId>) -> Decision {
    let capability = actor.capability(owner);
    let allowed = match policy {
        Policy::Public => true,
        Policy::Authenticated => capability != Capability::Anonymous,
        Policy::OwnerOrAdmin => matches!(capability, Capability::Owner | Capability::Admin),
        Policy::AdminOnly => capability == Capability::Admin,
    };
    if allowed {
        Decision::Allow
    } else {
        Decision::Deny
    }
}
