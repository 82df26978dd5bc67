//! Filesystem adapters: `std::fs` for real runs, a shared in-memory map for tests.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
