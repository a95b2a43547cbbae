//! Identity domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kalartz_core::{Email, IdentityId, Role};

/// A registered marketplace principal.
///
/// The role is fixed at creation; there is no setter for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Unique identity ID.
    pub id: IdentityId,
    /// Sign-in email.
    pub email: Email,
    /// Display name.
    pub name: String,
    role: Role,
    /// When the identity was created.
    pub created_at: DateTime<Utc>,
    /// Whether the identity may sign in. Vendors start inactive.
    pub is_active: bool,
}

impl Identity {
    /// Create an identity.
    #[must_use]
    pub const fn new(
        id: IdentityId,
        email: Email,
        name: String,
        role: Role,
        created_at: DateTime<Utc>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            email,
            name,
            role,
            created_at,
            is_active,
        }
    }

    /// The identity's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Profile fields supplied at registration. Either may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileFields {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl ProfileFields {
    /// Both fields present.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            name: Some(name.into()),
        }
    }
}
