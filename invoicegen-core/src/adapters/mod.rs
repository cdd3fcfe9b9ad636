//! Adapter implementations
//!
//! Concrete implementations of the port traits.

pub mod duckdb;
mod memory;

pub use self::duckdb::DuckDbStore;
pub use memory::MemoryStore;
