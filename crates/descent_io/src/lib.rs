//! # Descent IO
//!
//! Persistence layer for the Descent simulation.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - The line-of-descent archive format (JSON lines, optionally gzipped)
//! - A periodic archiver for the MRCA lineage

/// Periodic MRCA lineage archives
pub mod archive;
/// Error types and result aliases for I/O operations
pub mod error;
/// Reading and writing persisted lineages
pub mod lineage;

pub use archive::LineageArchiver;
pub use error::{IoError, Result};
pub use lineage::{load_lineage, read_lineage, save_lineage, write_lineage, SavedLineage};
