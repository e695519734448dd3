//! Common utilities for Veles.
//!
//! This crate provides foundational types used across all Veles crates:
//!
//! - [`AssetReader`] - Little-endian binary reading with Unity alignment
//!   and length-prefixed array conventions
//! - [`UnityVersion`] - The structured engine version every layout gate
//!   compares against
//! - [`Error`] / [`Result`] - The shared error type

mod error;
mod reader;
mod version;

pub use error::{Error, Result};
pub use reader::AssetReader;
pub use version::{UnityVersion, UnityVersionType};

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
