//! Credential store - admin bootstrap, registration and password checks
//!
//! Owns two entries in the key-value store:
//!
//! - `admin`: the singleton admin record, created on first startup
//! - `users`: an object mapping email to user record for everyone else
//!
//! Every store failure is logged and re-raised as
//! `Error::OperationFailed`; credential rule violations (`DuplicateUser`,
//! `NotFound`) pass through unchanged.
//!
//! `register_user` is a read-modify-write of the whole `users` entry with
//! no mutual exclusion. Two concurrent registrations can lose one of them.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use crate::domain::result::{Error, Result};
use crate::domain::{Role, User};
use crate::ports::{get_typed, set_typed, KeyValueStore};

const ADMIN_KEY: &str = "admin";
const USERS_KEY: &str = "users";

/// Characters a temporary password is drawn from
const TEMP_PASSWORD_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub const DEFAULT_TEMP_PASSWORD_LENGTH: usize = 8;

type UserMap = BTreeMap<String, User>;

/// Low-entropy token shown once to the operator. Not a secret-grade value.
fn generate_temp_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| TEMP_PASSWORD_CHARSET[rng.gen_range(0..TEMP_PASSWORD_CHARSET.len())] as char)
        .collect()
}

/// Timestamp-based id; collisions within one millisecond are not guarded
fn generate_user_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Collapse storage-layer failures into the operation's generic error
fn fail(operation: &'static str) -> impl FnOnce(Error) -> Error {
    move |err| {
        if err.is_store_failure() {
            tracing::error!(error = %err, "{}", operation);
            Error::OperationFailed(operation)
        } else {
            err
        }
    }
}

pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
    admin_email: String,
    temp_password_length: usize,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>, admin_email: impl Into<String>) -> Self {
        Self {
            store,
            admin_email: admin_email.into(),
            temp_password_length: DEFAULT_TEMP_PASSWORD_LENGTH,
        }
    }

    pub fn with_temp_password_length(mut self, length: usize) -> Self {
        self.temp_password_length = length;
        self
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Ensure the admin record exists
    ///
    /// Returns the generated temporary password when the admin was created
    /// by this call, `None` when it already existed. Safe to call on every
    /// startup.
    pub async fn bootstrap(&self) -> Result<Option<String>> {
        self.try_bootstrap()
            .await
            .map_err(fail("Failed to initialize database"))
    }

    async fn try_bootstrap(&self) -> Result<Option<String>> {
        self.store.ready().await?;

        if self.load_admin().await?.is_some() {
            tracing::debug!("admin user already exists");
            return Ok(None);
        }

        let temp_password = generate_temp_password(self.temp_password_length);
        let admin = User::admin(&self.admin_email, &temp_password);
        set_typed(self.store.as_ref(), ADMIN_KEY, &admin).await?;
        tracing::info!("admin user created");

        Ok(Some(temp_password))
    }

    /// The stored admin record, if bootstrap has run
    pub async fn admin(&self) -> Result<Option<User>> {
        self.load_admin()
            .await
            .map_err(fail("Failed to retrieve user"))
    }

    /// Exact-match lookup; registered users are checked before the admin
    pub async fn find_user(&self, email: &str) -> Result<Option<User>> {
        self.try_find_user(email)
            .await
            .map_err(fail("Failed to retrieve user"))
    }

    async fn try_find_user(&self, email: &str) -> Result<Option<User>> {
        if let Some(user) = self.load_users().await?.remove(email) {
            return Ok(Some(user));
        }
        Ok(self.load_admin().await?.filter(|admin| admin.email == email))
    }

    /// Register a new user
    ///
    /// Fails with `DuplicateUser` when `email` is already registered; the
    /// stored mapping is left untouched in that case.
    pub async fn register_user(&self, email: &str, password: &str, role: Role) -> Result<User> {
        self.try_register_user(email, password, role)
            .await
            .map_err(fail("Failed to create user"))
    }

    async fn try_register_user(&self, email: &str, password: &str, role: Role) -> Result<User> {
        let mut users = self.load_users().await?;
        if users.contains_key(email) {
            return Err(Error::DuplicateUser(email.to_string()));
        }

        if role == Role::Admin {
            // Any caller may pick the admin role here; nothing authorizes it
            tracing::warn!("self-registration with admin role");
        }

        let user = User::new(generate_user_id(), email, password, role);
        users.insert(email.to_string(), user.clone());
        set_typed(self.store.as_ref(), USERS_KEY, &users).await?;

        Ok(user)
    }

    /// Check a login attempt
    ///
    /// A missing user, a role mismatch and a wrong password are all
    /// `Ok(false)`; only store failures are errors.
    pub async fn verify_credentials(&self, email: &str, password: &str, role: Role) -> Result<bool> {
        let user = self
            .try_find_user(email)
            .await
            .map_err(fail("Failed to verify password"))?;

        let Some(user) = user else {
            tracing::debug!("user not found");
            return Ok(false);
        };
        if user.role != role {
            tracing::debug!(expected = %role, actual = %user.role, "role mismatch");
            return Ok(false);
        }

        let valid = user.accepts(password, role);
        tracing::debug!(valid, "password verification");
        Ok(valid)
    }

    /// Rotate the admin password
    ///
    /// Fails with `NotFound` unless `id` is the stored admin's id.
    pub async fn update_admin_password(&self, id: &str, new_password: &str) -> Result<()> {
        self.try_update_admin_password(id, new_password)
            .await
            .map_err(fail("Failed to update user password"))
    }

    async fn try_update_admin_password(&self, id: &str, new_password: &str) -> Result<()> {
        let mut admin = match self.load_admin().await? {
            Some(admin) if admin.id == id => admin,
            _ => return Err(Error::not_found(id)),
        };

        admin.password = new_password.to_string();
        set_typed(self.store.as_ref(), ADMIN_KEY, &admin).await
    }

    /// Registered (non-admin-record) users, ordered by email
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users = self
            .load_users()
            .await
            .map_err(fail("Failed to retrieve user"))?;
        Ok(users.into_values().collect())
    }

    async fn load_admin(&self) -> Result<Option<User>> {
        get_typed(self.store.as_ref(), ADMIN_KEY).await
    }

    async fn load_users(&self) -> Result<UserMap> {
        Ok(get_typed(self.store.as_ref(), USERS_KEY).await?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    fn credential_store() -> CredentialStore {
        CredentialStore::new(Arc::new(MemoryStore::new()), "admin@example.com")
    }

    #[test]
    fn test_temp_password_shape() {
        let password = generate_temp_password(8);
        assert_eq!(password.len(), 8);
        assert!(password
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let credentials = credential_store();
        let first = credentials.bootstrap().await.unwrap();
        assert!(first.is_some());
        assert!(credentials.bootstrap().await.unwrap().is_none());

        let admin = credentials.admin().await.unwrap().unwrap();
        assert_eq!(admin.password, first.unwrap());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_bootstrap_diagnostics_omit_admin_email() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let credentials = credential_store();
        tracing::subscriber::with_default(subscriber, || {
            runtime.block_on(async {
                credentials.bootstrap().await.unwrap();
                credentials.bootstrap().await.unwrap();
            })
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("admin user created"));
        assert!(!output.contains("admin@example.com"));
    }

    #[tokio::test]
    async fn test_custom_temp_password_length() {
        let credentials = credential_store().with_temp_password_length(12);
        let password = credentials.bootstrap().await.unwrap().unwrap();
        assert_eq!(password.len(), 12);
    }

    #[tokio::test]
    async fn test_find_user_is_exact_match() {
        let credentials = credential_store();
        credentials.bootstrap().await.unwrap();
        credentials
            .register_user("bob@x.com", "secret", Role::Team)
            .await
            .unwrap();

        assert!(credentials.find_user("bob@x.com").await.unwrap().is_some());
        assert!(credentials.find_user("Bob@x.com").await.unwrap().is_none());
        assert!(credentials.find_user("bob@x").await.unwrap().is_none());

        let admin = credentials.find_user("admin@example.com").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_admin_role_registration_is_allowed() {
        let credentials = credential_store();
        let user = credentials
            .register_user("mallory@x.com", "pw", Role::Admin)
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(credentials
            .verify_credentials("mallory@x.com", "pw", Role::Admin)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_list_users_excludes_admin_record() {
        let credentials = credential_store();
        credentials.bootstrap().await.unwrap();
        credentials.register_user("b@x.com", "p", Role::Team).await.unwrap();
        credentials.register_user("a@x.com", "p", Role::Team).await.unwrap();

        let emails: Vec<_> = credentials
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
    }
}
