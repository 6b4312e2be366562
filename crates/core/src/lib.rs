//! Maracuja Core - Shared types library.
//!
//! This crate provides the common types used by the Maracuja API server:
//! type-safe entity IDs, validated email addresses, and the user role
//! capability set.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no
//! HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
