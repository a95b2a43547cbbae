//! Marketplace account roles.

use serde::{Deserialize, Serialize};

/// Error parsing a [`Role`] from its textual name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid role: {0} (expected customer, vendor, or admin)")]
pub struct RoleParseError(pub String);

/// The role an identity holds. Fixed when the identity is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Browses the catalog and buys.
    Customer,
    /// Lists products and fulfils orders; needs approval before signing in.
    Vendor,
    /// Operates the marketplace.
    Admin,
}

impl Role {
    /// Whether an account with this role may be created through self-service
    /// registration. Admin accounts are provisioned out of band.
    #[must_use]
    pub const fn is_self_registrable(&self) -> bool {
        matches!(self, Self::Customer | Self::Vendor)
    }

    /// Whether a freshly registered account with this role is usable at once.
    #[must_use]
    pub const fn active_on_registration(&self) -> bool {
        matches!(self, Self::Customer)
    }

    /// The lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "vendor" => Ok(Self::Vendor),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_from_str() {
        for role in [Role::Customer, Role::Vendor, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_from_str_is_exact() {
        assert!("Customer".parse::<Role>().is_err());
        assert!("super_admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_registration_rules() {
        assert!(Role::Customer.is_self_registrable());
        assert!(Role::Vendor.is_self_registrable());
        assert!(!Role::Admin.is_self_registrable());

        assert!(Role::Customer.active_on_registration());
        assert!(!Role::Vendor.active_on_registration());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Vendor).unwrap(), "\"vendor\"");
    }
}
