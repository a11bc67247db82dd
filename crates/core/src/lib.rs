//! Core types and traits for the glossa translation service.
//!
//! Pure data, validation and trait seams. Storage, cache and export
//! backends live in the `glossa` binary crate.

pub mod cache;
pub mod envelope;
pub mod export;
pub mod storage;
pub mod tags;
pub mod translation;
