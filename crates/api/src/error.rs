// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use challenge_domain::DomainError;
use challenge_persistence::PersistenceError;
use thiserror::Error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. Each variant maps to one HTTP status class at the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A write lost to a uniqueness rule.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An external collaborator failed.
    #[error("Upstream error from {service}: {message}")]
    Upstream {
        /// The collaborator that failed.
        service: String,
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidChallengeName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidDateRange { .. } => ApiError::InvalidInput {
            field: String::from("start_date"),
            message,
        },
        DomainError::TotalDaysMismatch { .. } => ApiError::InvalidInput {
            field: String::from("total_days"),
            message,
        },
        DomainError::InvalidChallengeDay { .. } => ApiError::InvalidInput {
            field: String::from("day"),
            message,
        },
        DomainError::InvalidGoal { field, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::DateArithmeticOverflow { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message,
        },
        DomainError::InvalidScheduleTime(_) => ApiError::InvalidInput {
            field: String::from("reconcile_at"),
            message,
        },
        DomainError::InvalidTimezone(_) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message,
        },
        DomainError::ChallengeNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Challenge"),
            message,
        },
        DomainError::TaskNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Task definition"),
            message,
        },
        DomainError::UserNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message,
        },
        DomainError::InvalidStoredValue { .. } => ApiError::Internal { message },
    }
}

/// Translates a persistence error into an API error.
///
/// Domain violations raised inside a transaction are translated as domain
/// errors; uniqueness conflicts become rule violations.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::Conflict(message) => ApiError::DomainRuleViolation {
            rule: String::from("unique_constraint"),
            message,
        },
        PersistenceError::ChallengeNotFound(id) => {
            translate_domain_error(DomainError::ChallengeNotFound(id))
        }
        PersistenceError::TaskNotFound(id) => translate_domain_error(DomainError::TaskNotFound(id)),
        PersistenceError::UserNotFound(id) => translate_domain_error(DomainError::UserNotFound(id)),
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
