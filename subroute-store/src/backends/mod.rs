//! Backend implementations for the key-value store
//!
//! - `memory`: In-memory map, seeded from configuration or a RON file
//! - `test`: Test utilities with lookup counting and failure injection

pub mod memory;

pub use memory::MemoryStore;
pub use test::TestStore;
