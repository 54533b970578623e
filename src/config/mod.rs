//! Configuration module for nx-platform
//!
//! Concentrates the file names and roots shared between the lifecycle
//! controller, the asset locator and the host binary.

pub mod shim;

pub use shim::{ConfigError, ShimConfig};
