//! Store adapters implementing the domain persistence ports.

mod memory;

pub use memory::{MemoryNoteRepository, MemoryUserRepository};
