//! Keeper Domain Layer
//!
//! Core model for directory housekeeping. This crate performs no I/O: it
//! defines the value types, the pure selection rules and the trait interfaces
//! that the service and CLI layers build on.
//!
//! ## Key Concepts
//!
//! - **FileEntry**: a path paired with its last-modification time
//! - **RetentionPolicy**: age-based or count-based rule choosing deletion candidates
//! - **Eligible file**: a file selected by a policy, before confirmation and deletion
//! - **Collaborators**: [`traits::FileSystem`] and [`traits::Operator`] isolate
//!   all I/O so the selection logic can be exercised in memory

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod policy;
pub mod traits;

// Re-exports for convenience
pub use entry::FileEntry;
pub use policy::{describe_age, parse_age, RetentionPolicy, Selection};
