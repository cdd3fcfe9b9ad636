//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The credential
//! logic depends only on these traits, not on concrete storage engines.

mod key_value;

pub use key_value::{get_typed, set_typed, KeyValueStore};
