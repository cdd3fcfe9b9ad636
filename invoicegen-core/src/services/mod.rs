//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions.

mod credential;
pub mod logging;
pub mod migration;
mod session;

pub use credential::{CredentialStore, DEFAULT_TEMP_PASSWORD_LENGTH};
pub use logging::{LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use session::{
    SessionGate, INIT_FAILED_MESSAGE, INVALID_CREDENTIALS_MESSAGE, LOGIN_FAILED_MESSAGE,
    REGISTRATION_FAILED_MESSAGE,
};
