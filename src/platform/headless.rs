//! Headless backend for desktop hosts and CI
//!
//! There is no socket stack to bring up and no archive driver. The content
//! archive is emulated by a directory that already holds the unpacked
//! archive; mounting it means checking that the directory exists.

use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::platform::environment::{ExitLock, PlatformBackend, PlatformError};

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    mounted: Option<PathBuf>,
    exit_locked: bool,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted_root(&self) -> Option<&Path> {
        self.mounted.as_deref()
    }

    pub fn exit_locked(&self) -> bool {
        self.exit_locked
    }
}

impl PlatformBackend for HeadlessBackend {
    fn init_network(&mut self) -> Result<(), PlatformError> {
        Ok(())
    }

    fn redirect_stdio(&mut self, log_filter: &str) -> Result<(), PlatformError> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(log_filter))
            .map_err(|err| PlatformError::Stdio(err.to_string()))?;

        // A host that already installed a subscriber keeps its own
        if let Err(err) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
        {
            tracing::debug!(error = %err, "log subscriber already installed");
        }
        Ok(())
    }

    fn enable_activity_recording(&mut self) -> Result<(), PlatformError> {
        tracing::debug!("activity recording not available on headless host");
        Ok(())
    }

    fn current_dir(&self) -> Result<PathBuf, PlatformError> {
        std::env::current_dir().map_err(PlatformError::WorkingDirectory)
    }

    fn mount_archive(&mut self, root: &Path) -> Result<PathBuf, PlatformError> {
        let metadata = std::fs::metadata(root).map_err(|source| PlatformError::ArchiveMount {
            root: root.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(PlatformError::ArchiveMount {
                root: root.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        self.mounted = Some(root.to_path_buf());
        Ok(root.to_path_buf())
    }

    fn unmount_archive(&mut self) {
        self.mounted = None;
    }

    fn shutdown_network(&mut self) {}

    fn lock_exit(&mut self) -> Result<ExitLock, PlatformError> {
        self.exit_locked = true;
        Ok(ExitLock::acquired())
    }

    fn unlock_exit(&mut self, _lock: ExitLock) {
        self.exit_locked = false;
    }
}
