#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Admin session state.
//!
//! There is no real identity here: a session is a process-local boolean
//! behind a fixed credential check, passed explicitly to the components
//! that gate destructive actions on it. Password hashing and account
//! management are deliberately out of scope.

use thiserror::Error;

/// Minimum accepted username length.
pub const MIN_USERNAME_LEN: usize = 2;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Errors from a login attempt. None of these authenticate the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Username shorter than [`MIN_USERNAME_LEN`] characters.
    #[error("Username must be at least 2 characters")]
    UsernameTooShort,

    /// Password shorter than [`MIN_PASSWORD_LEN`] characters.
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    /// Credentials were well-formed but did not match.
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// The fixed admin credential pair logins are checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    /// Admin username.
    pub username: String,
    /// Admin password, stored and compared in the clear.
    pub password: String,
}

impl AdminCredentials {
    /// Reads the credential pair from `EMERGENCY_MAP_ADMIN_USER` /
    /// `EMERGENCY_MAP_ADMIN_PASSWORD`, with fixed defaults for local use.
    #[must_use]
    pub fn from_env() -> Self {
        let username = std::env::var("EMERGENCY_MAP_ADMIN_USER")
            .unwrap_or_else(|_| "admin".to_string());
        let password = std::env::var("EMERGENCY_MAP_ADMIN_PASSWORD")
            .unwrap_or_else(|_| "admin123".to_string());
        Self { username, password }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// An explicit session object gating admin actions.
///
/// Starts logged out. [`Session::login`] flips the flag after the fixed
/// credential check; [`Session::logout`] clears it.
#[derive(Debug, Clone)]
pub struct Session {
    credentials: AdminCredentials,
    authenticated: bool,
}

impl Session {
    /// Creates a logged-out session checking against `credentials`.
    #[must_use]
    pub const fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials,
            authenticated: false,
        }
    }

    /// Creates a logged-out session with env-configured credentials.
    #[must_use]
    pub fn with_env_credentials() -> Self {
        Self::new(AdminCredentials::from_env())
    }

    /// Whether this session may perform admin actions.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Attempts to authenticate the session.
    ///
    /// Input lengths are validated before the credential check so the
    /// login form can surface field-level messages.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError`]; the session stays logged out on any error.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), LoginError> {
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(LoginError::UsernameTooShort);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(LoginError::PasswordTooShort);
        }
        if !self.credentials.matches(username, password) {
            log::warn!("Rejected login attempt for {username}");
            return Err(LoginError::InvalidCredentials);
        }
        self.authenticated = true;
        log::info!("Admin session authenticated");
        Ok(())
    }

    /// Logs the session out.
    pub fn logout(&mut self) {
        if self.authenticated {
            log::info!("Admin session ended");
        }
        self.authenticated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session::new(AdminCredentials {
            username: "admin".to_string(),
            password: "hunter22".to_string(),
        })
    }

    #[test]
    fn starts_logged_out() {
        assert!(!test_session().is_authenticated());
    }

    #[test]
    fn correct_credentials_authenticate() {
        let mut session = test_session();
        session.login("admin", "hunter22").unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn wrong_password_stays_logged_out() {
        let mut session = test_session();
        assert_eq!(
            session.login("admin", "wrong-pass"),
            Err(LoginError::InvalidCredentials)
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn short_inputs_fail_validation_before_the_credential_check() {
        let mut session = test_session();
        assert_eq!(
            session.login("a", "hunter22"),
            Err(LoginError::UsernameTooShort)
        );
        assert_eq!(
            session.login("admin", "pw"),
            Err(LoginError::PasswordTooShort)
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_clears_the_flag() {
        let mut session = test_session();
        session.login("admin", "hunter22").unwrap();
        session.logout();
        assert!(!session.is_authenticated());
    }
}
