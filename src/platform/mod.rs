//! Host platform services
//!
//! This module encapsulates everything that talks to the host: the backend
//! sequenced at process entry and exit, the captured process environment,
//! and read-only host queries. Win32 interop is only compiled on Windows.

pub mod environment;
pub mod headless;
pub mod host;
#[cfg(windows)]
pub mod windows;

pub use environment::{ExitLock, PlatformBackend, PlatformError, ProcessEnvironment};
pub use headless::HeadlessBackend;
pub use host::{HostQuery, MessageOutcome};
