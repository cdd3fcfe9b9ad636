//! Core domain entities
//!
//! Pure data structures and state transitions - no I/O.

pub mod navigation;
pub mod result;
mod session;
mod user;

pub use navigation::{DashboardSummary, MenuItem, MenuSection, Panel, SIDEBAR};
pub use session::SessionState;
pub use user::{Role, User, ADMIN_ID};
