//! Process environment and the host backend seam
//!
//! [`PlatformBackend`] is the set of host services the lifecycle controller
//! sequences at process entry and exit. [`ProcessEnvironment`] is the state
//! that bring-up leaves behind for the rest of the platform layer.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by a host backend during bring-up or teardown
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("network stack initialization failed: {0}")]
    Network(String),
    #[error("stdio redirection failed: {0}")]
    Stdio(String),
    #[error("activity recording request failed: {0}")]
    ActivityRecording(String),
    #[error("failed to determine working directory")]
    WorkingDirectory(#[source] io::Error),
    #[error("failed to mount content archive at {}", .root.display())]
    ArchiveMount {
        root: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to acquire exit lock: {0}")]
    ExitLock(String),
}

/// Token proving the host's exit lock is held
///
/// Not `Clone`: exactly one holder exists between bring-up and
/// teardown.
#[derive(Debug, PartialEq, Eq)]
pub struct ExitLock {
    _private: (),
}

impl ExitLock {
    /// Creates the token for a lock the caller has just taken
    ///
    /// Public only so that backends outside this crate can implement
    /// [`PlatformBackend::lock_exit`]. Nothing else should call it: a token
    /// minted without taking the host lock proves nothing.
    pub fn acquired() -> Self {
        Self { _private: () }
    }
}

/// Host services the platform layer depends on
pub trait PlatformBackend {
    /// Brings up the socket layer used for remote logging
    fn init_network(&mut self) -> Result<(), PlatformError>;

    /// Routes diagnostics to the remote or attached console
    fn redirect_stdio(&mut self, log_filter: &str) -> Result<(), PlatformError>;

    /// Asks the host to record gameplay activity
    fn enable_activity_recording(&mut self) -> Result<(), PlatformError>;

    /// Current working directory of the process
    fn current_dir(&self) -> Result<PathBuf, PlatformError>;

    /// Mounts the read-only content archive and returns its root
    fn mount_archive(&mut self, root: &Path) -> Result<PathBuf, PlatformError>;

    fn unmount_archive(&mut self);

    fn shutdown_network(&mut self);

    /// Prevents the host from terminating the process behind the runtime's back
    fn lock_exit(&mut self) -> Result<ExitLock, PlatformError>;

    fn unlock_exit(&mut self, lock: ExitLock);
}

/// State captured once at process entry
///
/// Written by the lifecycle controller during bring-up and only read
/// afterwards.
#[derive(Debug, Default)]
pub struct ProcessEnvironment {
    working_dir: PathBuf,
    executable: String,
    archive_root: Option<PathBuf>,
    pub(crate) exit_lock: Option<ExitLock>,
}

impl ProcessEnvironment {
    /// Builds an environment directly, for hosts that skip bring-up and tests
    pub fn new(working_dir: PathBuf, executable: String, archive_root: Option<PathBuf>) -> Self {
        Self {
            working_dir,
            executable,
            archive_root,
            exit_lock: None,
        }
    }

    /// Working directory captured at bring-up
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// First process argument, verbatim
    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn archive_mounted(&self) -> bool {
        self.archive_root.is_some()
    }

    /// Root of the mounted archive, if the mount succeeded
    pub fn archive_root(&self) -> Option<&Path> {
        self.archive_root.as_deref()
    }

    pub fn holds_exit_lock(&self) -> bool {
        self.exit_lock.is_some()
    }

    pub(crate) fn take_archive_root(&mut self) -> Option<PathBuf> {
        self.archive_root.take()
    }
}
