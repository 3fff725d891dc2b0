//! Vigil Common Library
//!
//! This crate provides shared constants and configuration loading utilities
//! for all Vigil workspace crates.
//!
//! # Module Structure
//!
//! - [`shm`] - Shared memory segment keys and sizing policy
//! - [`consts`] - System-wide constants
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! vigil = { package = "vigil_common", path = "../vigil_common" }
//! ```
//!
//! Then import:
//! ```rust
//! use vigil_common::shm::keys::*;
//! use vigil_common::config::{ConfigLoader, SharedConfig};
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
pub mod shm;
