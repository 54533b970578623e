//! Platform layer for running a cross-platform runtime on a touch-only
//! console target.
//!
//! - [`app::LifecycleController`] brings host services up at process entry
//!   and down at exit
//! - [`input::TouchPointerSynthesizer`] turns the touch panel into a single
//!   pointer device
//! - [`app::AssetLocator`] decides where the application's content lives
//! - [`platform::HostQuery`] answers the runtime's read-only host queries

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod platform;
