use std::collections::BTreeMap;

use crate::error::AuthError;

/// Checks credentials against a fixed username → password table.
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    users: BTreeMap<String, String>,
}

impl Authenticator {
    pub fn new(users: BTreeMap<String, String>) -> Self {
        Self { users }
    }

    pub fn authenticate(&self, user: &str, password: &str) -> bool {
        self.users.get(user).is_some_and(|p| p == password)
    }
}

/// Who is logged in. Starts cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<String>,
}

impl Session {
    /// On bad credentials the session is left untouched; retries are unlimited.
    pub fn login(&mut self, auth: &Authenticator, user: &str, password: &str) -> Result<(), AuthError> {
        if !auth.authenticate(user, password) {
            log::warn!("Rejected login for '{user}'");
            return Err(AuthError::InvalidCredentials);
        }
        log::info!("User '{user}' logged in");
        self.authenticated = true;
        self.user = Some(user.to_string());
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("User '{user}' logged out");
        }
        *self = Session::default();
    }
}
