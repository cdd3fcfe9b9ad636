//! Session state held by the shell
//!
//! `SessionState` is an immutable value. Every transition consumes the old
//! state and returns the next one; nothing else mutates it.

use serde::Serialize;

use super::navigation::{Panel, HOME_PATH};
use super::user::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    role: Option<Role>,
    active_path: String,
    error: Option<String>,
    temp_password: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Logged out, on the home path, no banners
    pub fn new() -> Self {
        Self {
            role: None,
            active_path: HOME_PATH.to_string(),
            error: None,
            temp_password: None,
        }
    }

    /// Attach the one-time temporary admin password notice
    pub fn with_temp_password(self, temp_password: Option<String>) -> Self {
        Self { temp_password, ..self }
    }

    pub fn login(self, role: Role) -> Self {
        Self {
            role: Some(role),
            error: None,
            ..self
        }
    }

    /// Show an error banner; authentication is left as it was
    pub fn reject(self, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..self
        }
    }

    pub fn logout(self) -> Self {
        Self {
            role: None,
            active_path: HOME_PATH.to_string(),
            error: None,
            ..self
        }
    }

    pub fn navigate(self, path: impl Into<String>) -> Self {
        Self {
            active_path: path.into(),
            ..self
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn active_path(&self) -> &str {
        &self.active_path
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn temp_password(&self) -> Option<&str> {
        self.temp_password.as_deref()
    }

    /// What the shell should render right now
    pub fn panel(&self) -> Panel {
        if self.is_authenticated() {
            Panel::for_path(&self.active_path)
        } else {
            Panel::Login
        }
    }
}
