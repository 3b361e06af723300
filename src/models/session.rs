//! Authenticated session context
//!
//! A `Session` is created from a successful login and passed explicitly to
//! everything that talks to the record store. It is never written to disk.
//! Dropping it (logout, or a 401 from the store) wipes the token from memory.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// Minimal user profile returned by login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Wire shape of the login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: Option<UserProfile>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Bearer credential, zeroed when dropped
#[derive(Clone)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Read-only session context handed to services
#[derive(Debug, Clone)]
pub struct Session {
    token: AccessToken,
    token_type: String,
    user: UserProfile,
}

impl Session {
    pub fn new(token: AccessToken, user: UserProfile) -> Self {
        Self {
            token,
            token_type: default_token_type(),
            user,
        }
    }

    /// Build a session from a login response
    ///
    /// Some stores omit the profile; the username used to log in is kept then.
    pub fn from_login(response: LoginResponse, username: &str) -> Self {
        let user = response.user.unwrap_or_else(|| UserProfile {
            username: username.to_string(),
            email: String::new(),
        });
        Self {
            token: AccessToken::new(response.access_token),
            token_type: response.token_type,
            user,
        }
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> String {
        let scheme = if self.token_type.eq_ignore_ascii_case("bearer") || self.token_type.is_empty() {
            "Bearer"
        } else {
            self.token_type.as_str()
        };
        format!("{} {}", scheme, self.token.expose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_login_response() {
        let json = r#"{"access_token": "token-123", "token_type": "bearer",
                       "user": {"username": "demo", "email": "demo@spendwise.com"}}"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        let session = Session::from_login(response, "demo");
        assert_eq!(session.user().email, "demo@spendwise.com");
        assert_eq!(session.authorization(), "Bearer token-123");
    }

    #[test]
    fn test_missing_profile_keeps_username() {
        let json = r#"{"access_token": "t"}"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        let session = Session::from_login(response, "alice");
        assert_eq!(session.user().username, "alice");
        assert_eq!(session.authorization(), "Bearer t");
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new(
            AccessToken::new("secret-value"),
            UserProfile {
                username: "demo".into(),
                email: String::new(),
            },
        );
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-value"));
        assert!(debug.contains("***"));
    }
}
