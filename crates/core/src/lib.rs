//! Paramount Credit Pathway Core - Shared types library.
//!
//! This crate provides common types used across all Pathway components:
//! - `admin` - Administration dashboard (HTTP surface + table/auth logic)
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Roles, themes, emails, record IDs and status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
