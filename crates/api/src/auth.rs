// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Admin capability is resolved through an [`AuthorizationPort`] on every
//! mutating call. Nothing here caches a previous decision.

use std::collections::HashSet;

use challenge_audit::Actor;

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: may create, end, and correct challenges and record
    /// completions on behalf of participants.
    Admin,
    /// Member role: a participant with no administrative authority.
    Member,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Member => "Member",
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Admin => String::from("admin"),
            Role::Member => String::from("member"),
        };
        Actor::new(self.id.clone(), actor_type)
    }
}

/// Resolves the role of a caller.
///
/// Implementations may consult an external identity service; the result of
/// one call must not be reused for another.
pub trait AuthorizationPort: Send + Sync {
    /// Resolves the role held by `actor_id`.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the actor cannot be identified.
    fn resolve_role(&self, actor_id: &str) -> Result<Role, AuthError>;
}

/// An authorization port backed by a fixed set of admin identifiers.
///
/// Any other non-empty identifier resolves to [`Role::Member`].
#[derive(Debug, Clone, Default)]
pub struct AdminAllowlist {
    admins: HashSet<String>,
}

impl AdminAllowlist {
    /// Creates an allowlist from admin identifiers.
    #[must_use]
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the number of configured admins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.admins.len()
    }

    /// Returns true when no admins are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}

impl AuthorizationPort for AdminAllowlist {
    fn resolve_role(&self, actor_id: &str) -> Result<Role, AuthError> {
        if actor_id.trim().is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("missing actor identifier"),
            });
        }

        if self.admins.contains(actor_id) {
            Ok(Role::Admin)
        } else {
            Ok(Role::Member)
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that `actor_id` may perform the admin `action`.
    ///
    /// The role is resolved through `port` on every call.
    ///
    /// # Arguments
    ///
    /// * `port` - The authorization port
    /// * `actor_id` - The caller's identifier
    /// * `action` - The action being attempted, for error reporting
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the actor cannot be identified, or
    /// `Unauthorized` if the actor does not hold the Admin role.
    pub fn authorize_admin<P: AuthorizationPort + ?Sized>(
        port: &P,
        actor_id: &str,
        action: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        match port.resolve_role(actor_id)? {
            Role::Admin => Ok(AuthenticatedActor::new(actor_id.to_string(), Role::Admin)),
            Role::Member => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: Role::Admin.as_str().to_string(),
            }),
        }
    }
}
