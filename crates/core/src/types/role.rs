//! User role capability set.

use serde::{Deserialize, Serialize};

/// The capability set attached to an identity.
///
/// An enumerated set rather than a boolean flag so that additional
/// roles can be introduced without re-deriving every authorization
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular customer account.
    #[default]
    Standard,
    /// Full access to catalog and user management.
    Admin,
}

impl Role {
    /// Whether this role grants access to admin-only routes.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard() {
        assert_eq!(Role::default(), Role::Standard);
        assert!(!Role::default().is_admin());
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Standard.is_admin());
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!("standard".parse::<Role>().unwrap(), Role::Standard);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(role, Role::Standard);
    }
}
