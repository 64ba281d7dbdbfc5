//! I/O module
//!
//! Storage collaborators for the ledger snapshot.
//!
//! # Components
//!
//! - `json_store` - Flat JSON file, full-snapshot overwrite on every save
//! - `memory_store` - In-memory store used by tests and benchmarks

pub mod json_store;
pub mod memory_store;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
