//! Cache backend implementations.
//!
//! Concrete implementations of the cache trait defined in
//! `glossa_core::cache`.

pub mod memory;

pub use memory::MemoryCache;
