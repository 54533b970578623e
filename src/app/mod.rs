//! Application-facing platform services
//!
//! Bring-up and teardown of the process, and resolution of where the
//! application's content lives.

pub mod lifecycle;
pub mod locator;

pub use lifecycle::LifecycleController;
pub use locator::{AssetLocator, FileProbe, LocalFs};
