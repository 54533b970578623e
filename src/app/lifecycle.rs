//! Process bring-up and teardown
//!
//! The controller sequences the host backend at process entry and exit. It
//! runs before any error-reporting machinery exists, so every failure is
//! logged and absorbed: a failed archive mount leaves the environment
//! unmounted and later content lookups fall back to the local filesystem.

use std::ffi::OsString;

use crate::config::ShimConfig;
use crate::platform::environment::{PlatformBackend, ProcessEnvironment};

/// Brackets the process with bring-up and teardown of host services
pub struct LifecycleController<B: PlatformBackend> {
    backend: B,
    config: ShimConfig,
}

impl<B: PlatformBackend> LifecycleController<B> {
    pub fn new(backend: B, config: ShimConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &ShimConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Brings up host services and captures the process environment
    ///
    /// The executable path is taken from the first process argument.
    pub fn initialize(&mut self) -> ProcessEnvironment {
        self.initialize_with_executable(executable_name(std::env::args_os().next()))
    }

    /// [`initialize`](Self::initialize) with an explicit executable path
    ///
    /// Steps run in order: network stack, stdio redirection, activity
    /// recording, working directory capture, archive mount, exit lock. No step
    /// aborts the sequence.
    ///
    /// # Arguments
    /// * `executable` - first process argument, kept verbatim
    pub fn initialize_with_executable(&mut self, executable: String) -> ProcessEnvironment {
        if let Err(err) = self.backend.init_network() {
            tracing::warn!(error = %err, "network bring-up failed");
        }
        if let Err(err) = self.backend.redirect_stdio(&self.config.log_filter) {
            tracing::warn!(error = %err, "stdio redirection failed");
        }
        if let Err(err) = self.backend.enable_activity_recording() {
            tracing::warn!(error = %err, "activity recording unavailable");
        }

        let working_dir = match self.backend.current_dir() {
            Ok(dir) => dir,
            Err(err) => {
                tracing::error!(error = %err, "working directory unknown");
                Default::default()
            }
        };

        let archive_root = match self.backend.mount_archive(&self.config.archive_root) {
            Ok(root) => {
                tracing::info!(root = %root.display(), "content archive mounted");
                Some(root)
            }
            Err(err) => {
                tracing::warn!(error = %err, "content archive not mounted");
                None
            }
        };

        let mut env = ProcessEnvironment::new(working_dir, executable, archive_root);

        match self.backend.lock_exit() {
            Ok(lock) => env.exit_lock = Some(lock),
            Err(err) => tracing::warn!(error = %err, "exit lock not acquired"),
        }

        tracing::debug!(
            working_dir = %env.working_dir().display(),
            archive_mounted = env.archive_mounted(),
            "platform initialized"
        );
        env
    }

    /// Tears down what [`initialize`](Self::initialize) brought up
    ///
    /// Unmounts the archive only if it was mounted and releases the exit lock
    /// only if it is held, so calling this after a partial bring-up, or twice,
    /// is safe.
    pub fn shutdown(&mut self, env: &mut ProcessEnvironment) {
        if env.take_archive_root().is_some() {
            self.backend.unmount_archive();
        }
        self.backend.shutdown_network();
        if let Some(lock) = env.exit_lock.take() {
            self.backend.unlock_exit(lock);
        }
        tracing::debug!("platform shut down");
    }
}

/// Converts argv[0] to a string, replacing invalid UTF-8 instead of failing
fn executable_name(arg: Option<OsString>) -> String {
    arg.map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_default()
}
