//! Domain model for catalog records.
//!
//! # Responsibility
//! - Define the record shapes shared by repositories, services and the CLI.
//!
//! # Invariants
//! - Flat records carry no identity; duplicates are indistinguishable.
//! - Genre-layout records are identified by engine-assigned integer ids.

pub mod book;
