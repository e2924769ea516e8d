//! Kickflip Core - Shared types library.
//!
//! This crate provides common types used across all Kickflip components:
//! - `web` - The community site (posts, comments, accounts)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and static data - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails
//! - [`regions`] - The prefecture directory (name ↔ weather city code)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod regions;
pub mod types;

pub use types::*;
