//! The set of known identities.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use kalartz_core::{Email, IdentityId, Role};

use crate::models::Identity;

/// Accounts present in every demo directory: (email, display name, role).
const DEMO_ACCOUNTS: &[(&str, &str, Role)] = &[
    ("admin@kalartz.com", "Admin User", Role::Admin),
    ("vendor@kalartz.com", "John Vendor", Role::Vendor),
    ("customer@kalartz.com", "Jane Customer", Role::Customer),
];

/// 2024-01-01T00:00:00Z, the creation time stamped on demo accounts.
const DEMO_CREATED_AT_SECS: i64 = 1_704_067_200;

/// Known identities, in creation order.
#[derive(Debug, Clone, Default)]
pub struct IdentityDirectory {
    identities: Vec<Identity>,
}

impl IdentityDirectory {
    /// An empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory holding the active admin, vendor, and customer demo accounts.
    #[must_use]
    pub fn with_demo_accounts() -> Self {
        let created_at = DateTime::<Utc>::from_timestamp(DEMO_CREATED_AT_SECS, 0).unwrap_or_default();
        let mut directory = Self::new();
        for (email, name, role) in DEMO_ACCOUNTS {
            if let Ok(email) = Email::parse(email) {
                directory.insert(email, (*name).to_string(), *role, created_at, true);
            }
        }
        directory
    }

    /// Look up an identity by exact email and role, preferring an active one.
    #[must_use]
    pub fn find(&self, email: &Email, role: Role) -> Option<&Identity> {
        let mut matches = self
            .identities
            .iter()
            .filter(|identity| identity.email == *email && identity.role() == role);
        let first = matches.next()?;
        if first.is_active {
            return Some(first);
        }
        Some(matches.find(|identity| identity.is_active).unwrap_or(first))
    }

    /// Look up an identity by ID.
    #[must_use]
    pub fn get(&self, id: IdentityId) -> Option<&Identity> {
        self.identities.iter().find(|identity| identity.id == id)
    }

    /// Whether any identity, active or pending approval, already uses this email.
    #[must_use]
    pub fn email_in_use(&self, email: &Email) -> bool {
        self.identities.iter().any(|identity| identity.email == *email)
    }

    /// Whether an active identity other than `except` holds this email.
    fn email_active_elsewhere(&self, email: &Email, except: IdentityId) -> bool {
        self.identities
            .iter()
            .any(|identity| identity.id != except && identity.is_active && identity.email == *email)
    }

    /// Create and store a new identity, allocating the next ID.
    pub fn insert(
        &mut self,
        email: Email,
        name: String,
        role: Role,
        created_at: DateTime<Utc>,
        is_active: bool,
    ) -> Identity {
        let id = self
            .identities
            .iter()
            .map(|identity| identity.id)
            .max()
            .map_or(IdentityId::new(1), |last| last.next());
        let identity = Identity::new(id, email, name, role, created_at, is_active);
        self.identities.push(identity.clone());
        identity
    }

    /// Reconcile an identity restored from elsewhere with the directory.
    ///
    /// An unknown identity is added unless its email is already taken. A known
    /// ID must carry the same email and role and be active here too. Returns
    /// `false` when the restored identity conflicts with the directory.
    pub(crate) fn adopt(&mut self, identity: &Identity) -> bool {
        match self.get(identity.id) {
            Some(known) => {
                known.email == identity.email && known.role() == identity.role() && known.is_active
            }
            None if self.email_in_use(&identity.email) => false,
            None => {
                self.identities.push(identity.clone());
                true
            }
        }
    }

    /// Mark an identity active. Used by whoever approves vendor accounts.
    ///
    /// Returns `false` if no identity has this ID, or if another active
    /// identity already holds its email; the identity then stays pending.
    pub fn activate(&mut self, id: IdentityId) -> bool {
        let Some(email) = self.get(id).map(|identity| identity.email.clone()) else {
            return false;
        };
        if self.email_active_elsewhere(&email, id) {
            warn!(identity_id = %id, "email already held by an active identity, not activating");
            return false;
        }
        match self.identities.iter_mut().find(|identity| identity.id == id) {
            Some(identity) => {
                identity.is_active = true;
                info!(identity_id = %id, role = %identity.role(), "identity activated");
                true
            }
            None => false,
        }
    }

    /// Number of known identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
