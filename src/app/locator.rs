//! Content location policy
//!
//! Decides from the filesystem alone where the application's content lives.
//! Probes run in a fixed priority order and the first hit wins:
//!
//! 1. packaged content inside the mounted archive (distribution format)
//! 2. packaged content next to the executable (sideloading)
//! 3. an entry script next to the executable (development)
//!
//! Nothing is cached; every call probes again.

use std::path::{Path, PathBuf};

use crate::config::ShimConfig;
use crate::domain::content::ContentLocation;
use crate::platform::environment::ProcessEnvironment;

/// Existence test used by the locator
pub trait FileProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probes the real filesystem, accepting any kind of entry
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileProbe for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok()
    }
}

/// Resolves content locations for a captured process environment
pub struct AssetLocator<'a, P: FileProbe = LocalFs> {
    env: &'a ProcessEnvironment,
    config: &'a ShimConfig,
    probe: P,
}

impl<'a> AssetLocator<'a, LocalFs> {
    pub fn new(env: &'a ProcessEnvironment, config: &'a ShimConfig) -> Self {
        Self::with_probe(env, config, LocalFs)
    }
}

impl<'a, P: FileProbe> AssetLocator<'a, P> {
    pub fn with_probe(env: &'a ProcessEnvironment, config: &'a ShimConfig, probe: P) -> Self {
        Self { env, config, probe }
    }

    /// Finds the application content
    ///
    /// # Returns
    /// The first matching source with its fused flag, or a not-found
    /// location when none of the probes hit
    pub fn locate_content(&self) -> ContentLocation {
        if let Some(root) = self.env.archive_root() {
            let packaged = root.join(&self.config.packaged_name);
            if self.probe.exists(&packaged) {
                tracing::debug!(path = %packaged.display(), "content found in archive");
                return ContentLocation::archive(packaged);
            }
        }

        let packaged = self.local_path(&self.config.packaged_name);
        if self.probe.exists(&packaged) {
            tracing::debug!(path = %packaged.display(), "packaged content found locally");
            return ContentLocation::packaged_file(packaged);
        }

        let entry_script = self.local_path(&self.config.entry_script);
        if self.probe.exists(&entry_script) {
            tracing::debug!(path = %entry_script.display(), "entry script found locally");
            return ContentLocation::source_directory(self.config.local_root.clone());
        }

        tracing::debug!("no application content found");
        ContentLocation::not_found()
    }

    fn local_path(&self, name: &str) -> PathBuf {
        self.config.local_root.join(name)
    }
}
