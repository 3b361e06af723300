//! Authentication service
//!
//! Exchanges credentials for a session and tears it down again.

use tracing::warn;

use super::backend::Backend;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Session, UserProfile};

/// Service for session management
pub struct AuthService<'a> {
    backend: &'a mut Backend,
}

impl<'a> AuthService<'a> {
    pub fn new(backend: &'a mut Backend) -> Self {
        Self { backend }
    }

    /// Log in, replacing any existing session
    pub fn login(&mut self, username: &str, password: &str) -> SpendwiseResult<UserProfile> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SpendwiseError::Validation("Username cannot be empty".into()));
        }
        if password.is_empty() {
            return Err(SpendwiseError::Validation("Password cannot be empty".into()));
        }

        // Logging in again must not keep the old token alive
        self.backend.close_session();

        let response = match self.backend.store().login(username, password) {
            Ok(response) => response,
            Err(SpendwiseError::Unauthorized) => {
                warn!(username, "login rejected");
                return Err(SpendwiseError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        let session = Session::from_login(response, username);
        let profile = session.user().clone();
        self.backend.open_session(session);
        Ok(profile)
    }

    /// End the session; returns whether one was open
    pub fn logout(&mut self) -> bool {
        self.backend.close_session().is_some()
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.backend.session().map(Session::user)
    }
}
