//! User domain and wire types.

use maracuja_core::{Email, Role, UserId};
use serde::{Deserialize, Serialize};

/// A registered identity (domain type).
///
/// The password hash is intentionally not part of this type; it is
/// fetched separately by the credential check during login and never
/// leaves the database layer otherwise.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique across all identities).
    pub email: Email,
    /// Capability set.
    pub role: Role,
    /// Google account ID for externally-authenticated identities.
    pub google_id: Option<String>,
    /// Facebook account ID for externally-authenticated identities.
    pub facebook_id: Option<String>,
    /// Microsoft account ID for externally-authenticated identities.
    pub microsoft_id: Option<String>,
}

// =============================================================================
// Wire Types
// =============================================================================

/// Registration request body.
///
/// Fields are optional so that a missing field produces the API's own
/// validation response rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body.
///
/// Fields are optional; a missing field fails credential verification
/// rather than body validation, so the caller cannot distinguish a
/// missing field from a wrong password.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Profile update request body; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub token: String,
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// A user as exposed over the wire (password always excluded).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microsoft_id: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            google_id: user.google_id,
            facebook_id: user.facebook_id,
            microsoft_id: user.microsoft_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(1),
            name: "Ada".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            role: Role::Standard,
            google_id: None,
            facebook_id: None,
            microsoft_id: None,
        }
    }

    #[test]
    fn test_user_response_excludes_absent_provider_ids() {
        let body = serde_json::to_value(UserResponse::from(sample_user())).unwrap();
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["role"], "standard");
        assert!(body.get("googleId").is_none());
        assert!(body.get("password").is_none());
    }

    #[test]
    fn test_user_response_includes_present_provider_ids() {
        let mut user = sample_user();
        user.google_id = Some("g-123".to_string());
        let body = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(body["googleId"], "g-123");
    }
}
