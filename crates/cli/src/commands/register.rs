//! Self-service registration.
//!
//! The identity directory lives in memory, so the account only exists for the
//! duration of the command. Useful for checking what registration accepts.

use tracing::info;

use kalartz_core::Role;
use kalartz_storefront::models::ProfileFields;
use kalartz_storefront::session::{IdentityDirectory, MemoryStore, Registration, SessionState};

use super::CommandError;

/// Register an account against the demo directory.
///
/// # Errors
///
/// Returns an error if the profile is incomplete, the email is malformed or
/// already in use, or the role cannot self-register.
pub fn register(email: &str, name: &str, role: Role) -> Result<(), CommandError> {
    let mut session = SessionState::new(IdentityDirectory::with_demo_accounts(), MemoryStore::new());

    match session.register(ProfileFields::new(email, name), role)? {
        Registration::Active(identity) => {
            info!(
                id = %identity.id,
                email = %identity.email,
                role = %identity.role(),
                "Account created and signed in"
            );
        }
        Registration::PendingApproval(identity) => {
            info!(
                id = %identity.id,
                email = %identity.email,
                role = %identity.role(),
                "Account created; awaiting approval before sign-in"
            );
        }
    }
    Ok(())
}
