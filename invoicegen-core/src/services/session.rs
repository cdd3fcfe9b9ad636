//! Session gate - translates shell actions into credential operations

use crate::domain::result::{Error, Result};
use crate::domain::{Role, SessionState, User};

use super::credential::CredentialStore;

pub const INIT_FAILED_MESSAGE: &str =
    "Failed to initialize the application. Please try refreshing the page.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const LOGIN_FAILED_MESSAGE: &str = "An error occurred during login. Please try again.";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

pub struct SessionGate {
    credentials: CredentialStore,
}

impl SessionGate {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Bootstrap the admin; returns the temporary password if one was made
    pub async fn initialize(&self) -> Result<Option<String>> {
        self.credentials.bootstrap().await
    }

    /// `Ok(false)` for rejected credentials; errors only on store failure
    pub async fn login(&self, email: &str, password: &str, role: Role) -> Result<bool> {
        self.credentials.verify_credentials(email, password, role).await
    }

    /// Propagates `DuplicateUser` for an already registered email
    pub async fn register(&self, email: &str, password: &str, role: Role) -> Result<User> {
        self.credentials.register_user(email, password, role).await
    }

    /// Client-side reset; the store is not touched
    pub fn logout(&self, state: SessionState) -> SessionState {
        state.logout()
    }

    pub async fn change_admin_password(&self, id: &str, new_password: &str) -> Result<()> {
        self.credentials.update_admin_password(id, new_password).await
    }

    /// Run startup and fold the outcome into `state`
    pub async fn start(&self, state: SessionState) -> SessionState {
        match self.initialize().await {
            Ok(temp_password) => state.with_temp_password(temp_password),
            Err(e) => {
                tracing::error!(error = %e, "initialization failed");
                state.reject(INIT_FAILED_MESSAGE)
            }
        }
    }

    /// Handle a submitted login form
    pub async fn submit_login(
        &self,
        state: SessionState,
        email: &str,
        password: &str,
        role: Role,
    ) -> SessionState {
        match self.login(email, password, role).await {
            Ok(true) => state.login(role),
            Ok(false) => state.reject(INVALID_CREDENTIALS_MESSAGE),
            Err(e) => {
                tracing::error!(error = %e, "login failed");
                state.reject(LOGIN_FAILED_MESSAGE)
            }
        }
    }

    /// Handle a submitted registration form; success logs the user in
    pub async fn submit_registration(
        &self,
        state: SessionState,
        email: &str,
        password: &str,
        role: Role,
    ) -> SessionState {
        match self.register(email, password, role).await {
            Ok(_) => state.login(role),
            Err(Error::DuplicateUser(_)) => {
                tracing::warn!("registration rejected: email already registered");
                state.reject(REGISTRATION_FAILED_MESSAGE)
            }
            Err(e) => {
                tracing::error!(error = %e, "registration failed");
                state.reject(REGISTRATION_FAILED_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::Panel;

    fn gate() -> SessionGate {
        let store = Arc::new(MemoryStore::new());
        SessionGate::new(CredentialStore::new(store, "admin@example.com"))
    }

    #[tokio::test]
    async fn test_start_carries_temp_password_once() {
        let gate = gate();
        let state = gate.start(SessionState::new()).await;
        assert!(state.temp_password().is_some());

        let state = gate.start(SessionState::new()).await;
        assert!(state.temp_password().is_none());
    }

    #[tokio::test]
    async fn test_submit_login_outcomes() {
        let gate = gate();
        gate.register("bob@x.com", "secret", Role::Team).await.unwrap();

        let rejected = gate
            .submit_login(SessionState::new(), "bob@x.com", "wrong", Role::Team)
            .await;
        assert!(!rejected.is_authenticated());
        assert_eq!(rejected.error(), Some(INVALID_CREDENTIALS_MESSAGE));

        let accepted = gate
            .submit_login(rejected, "bob@x.com", "secret", Role::Team)
            .await;
        assert!(accepted.is_authenticated());
        assert!(accepted.error().is_none());
        assert_eq!(accepted.panel(), Panel::Dashboard);
    }

    #[tokio::test]
    async fn test_submit_registration_logs_in() {
        let gate = gate();
        let state = gate
            .submit_registration(SessionState::new(), "a@x.com", "p1", Role::Team)
            .await;
        assert_eq!(state.role(), Some(Role::Team));

        let state = gate.logout(state);
        let state = gate
            .submit_registration(state, "a@x.com", "p2", Role::Team)
            .await;
        assert!(!state.is_authenticated());
        assert_eq!(state.error(), Some(REGISTRATION_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_failed_registration_banner_hides_email() {
        let gate = gate();
        gate.register("a@x.com", "p1", Role::Team).await.unwrap();

        let state = gate
            .submit_registration(SessionState::new(), "a@x.com", "p2", Role::Admin)
            .await;
        let banner = state.error().unwrap();
        assert_eq!(banner, REGISTRATION_FAILED_MESSAGE);
        assert!(!banner.contains("a@x.com"));
        assert_eq!(state.panel(), Panel::Login);

        assert!(gate.login("a@x.com", "p1", Role::Team).await.unwrap());
        assert!(!gate.login("a@x.com", "p2", Role::Admin).await.unwrap());
    }
}
