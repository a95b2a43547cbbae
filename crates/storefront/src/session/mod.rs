//! Session and identity state.
//!
//! Tracks zero or one current [`Identity`]. The session is either anonymous or
//! authenticated with exactly one role:
//!
//! ```text
//! Anonymous --login----------------> Authenticated(role)
//! Anonymous --register(customer)---> Authenticated(customer)
//! Anonymous --register(vendor)-----> Anonymous (identity pending approval)
//! Authenticated --logout-----------> Anonymous
//! ```
//!
//! The current identity is written through to a [`KeyValueStore`] under
//! [`session_keys::CURRENT_IDENTITY`] so it can be restored after a reload.

mod directory;
mod store;

pub use directory::IdentityDirectory;
pub use store::{KeyValueStore, MemoryStore};

use chrono::Utc;
use tracing::{info, instrument, warn};

use kalartz_core::{Email, Role};

use crate::error::{self, Result, StorefrontError};
use crate::models::{Identity, ProfileFields, session_keys};

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The identity is active and is now the current identity.
    Active(Identity),
    /// The identity was created inactive and awaits approval; the session is unchanged.
    PendingApproval(Identity),
}

impl Registration {
    /// The identity that was created.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        match self {
            Self::Active(identity) | Self::PendingApproval(identity) => identity,
        }
    }

    /// Whether activation is still pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::PendingApproval(_))
    }
}

/// Zero-or-one current identity plus the directory it is drawn from.
#[derive(Debug)]
pub struct SessionState<S> {
    directory: IdentityDirectory,
    current: Option<Identity>,
    store: S,
}

impl<S: KeyValueStore> SessionState<S> {
    /// Create an anonymous session.
    #[must_use]
    pub const fn new(directory: IdentityDirectory, store: S) -> Self {
        Self {
            directory,
            current: None,
            store,
        }
    }

    /// Create a session, picking up an identity persisted by an earlier one.
    ///
    /// A stored value that cannot be read back, that names an inactive
    /// identity, or that conflicts with a directory entry (same ID with a
    /// different email or role, or an email already taken) is discarded and
    /// the session starts anonymous.
    #[must_use]
    pub fn restore(mut directory: IdentityDirectory, mut store: S) -> Self {
        let current = store
            .get(session_keys::CURRENT_IDENTITY)
            .and_then(|raw| match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) if identity.is_active => Some(identity),
                Ok(identity) => {
                    warn!(identity_id = %identity.id, "Stored identity is inactive, discarding");
                    None
                }
                Err(e) => {
                    warn!("Failed to read stored identity, discarding: {e}");
                    None
                }
            })
            .filter(|identity| {
                let adopted = directory.adopt(identity);
                if !adopted {
                    warn!(identity_id = %identity.id, "Stored identity conflicts with directory, discarding");
                }
                adopted
            });

        match &current {
            Some(identity) => {
                info!(identity_id = %identity.id, role = %identity.role(), "session restored");
            }
            None => store.remove(session_keys::CURRENT_IDENTITY),
        }

        Self {
            directory,
            current,
            store,
        }
    }

    /// Sign in as the identity with this exact email and role.
    ///
    /// Any non-empty password is accepted; credentials are not verified here.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::InvalidCredentials` if the password is empty
    /// or no identity matches, and `StorefrontError::PendingApproval` if the
    /// matching identity has not been activated.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &str, role: Role) -> Result<&Identity> {
        if password.is_empty() {
            return Err(StorefrontError::InvalidCredentials);
        }
        let email = Email::parse(email).map_err(|_| StorefrontError::InvalidCredentials)?;
        let identity = self
            .directory
            .find(&email, role)
            .ok_or(StorefrontError::InvalidCredentials)?;
        if !identity.is_active {
            return Err(StorefrontError::PendingApproval);
        }

        let identity = identity.clone();
        info!(identity_id = %identity.id, %role, "signed in");
        Ok(self.set_current(identity))
    }

    /// Create a new identity.
    ///
    /// Customers become the current identity at once. Vendors are stored
    /// inactive and the session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Validation` if the email or name is missing,
    /// the email is malformed or already in use, or the role cannot self-register.
    #[instrument(skip(self, profile))]
    pub fn register(&mut self, profile: ProfileFields, role: Role) -> Result<Registration> {
        if !role.is_self_registrable() {
            return Err(StorefrontError::Validation(format!(
                "{role} accounts cannot be self-registered"
            )));
        }
        let email = required_field(profile.email, "email")?;
        let name = required_field(profile.name, "name")?;
        let email = Email::parse(&email)
            .map_err(|e| StorefrontError::Validation(format!("invalid email: {e}")))?;
        if self.directory.email_in_use(&email) {
            return Err(StorefrontError::Validation(
                "an account with this email already exists".to_string(),
            ));
        }

        let is_active = role.active_on_registration();
        let identity = self
            .directory
            .insert(email, name, role, Utc::now(), is_active);

        if is_active {
            info!(identity_id = %identity.id, %role, "registered and signed in");
            self.set_current(identity.clone());
            Ok(Registration::Active(identity))
        } else {
            info!(identity_id = %identity.id, %role, "registered, pending approval");
            Ok(Registration::PendingApproval(identity))
        }
    }

    /// Clear the current identity. Does nothing when already anonymous.
    pub fn logout(&mut self) {
        if let Some(identity) = self.current.take() {
            info!(identity_id = %identity.id, "signed out");
            error::clear_sentry_user();
        }
        self.store.remove(session_keys::CURRENT_IDENTITY);
    }

    /// The current identity, if signed in.
    #[must_use]
    pub const fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Role of the current identity, or `None` when anonymous.
    #[must_use]
    pub fn current_role(&self) -> Option<Role> {
        self.current.as_ref().map(Identity::role)
    }

    /// Whether an identity is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The known identities.
    #[must_use]
    pub const fn directory(&self) -> &IdentityDirectory {
        &self.directory
    }

    /// Mutable access to the known identities, e.g. to approve a vendor.
    pub const fn directory_mut(&mut self) -> &mut IdentityDirectory {
        &mut self.directory
    }

    /// The backing key-value store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn set_current(&mut self, identity: Identity) -> &Identity {
        match serde_json::to_string(&identity) {
            Ok(json) => self.store.set(session_keys::CURRENT_IDENTITY, json),
            Err(e) => warn!("Failed to persist current identity: {e}"),
        }
        error::set_sentry_user(&identity.id, Some(identity.email.as_str()));
        self.current.insert(identity)
    }
}

/// Take a profile field, rejecting absent or blank values.
fn required_field(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StorefrontError::Validation(format!("{field} is required")))
}
