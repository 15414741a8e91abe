//! core
//!
//! Core domain types, indexing, input, and configuration for revlane.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RevisionId, Timestamp, Revision, SortOrder
//! - [`graph`] - Ancestry index over a revision list
//! - [`input`] - Reading revision lists from JSON
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Everything here is deterministic

pub mod config;
pub mod graph;
pub mod input;
pub mod types;
