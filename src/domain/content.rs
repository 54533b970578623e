//! Outcome of locating the application's content
//!
//! "No content" is a regular outcome here rather than an error: the caller is
//! expected to present guidance to the user when nothing was found.

use std::path::{Path, PathBuf};

/// Where the application content was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Packaged content inside the mounted read-only archive
    Archive(PathBuf),
    /// Packaged content file next to the executable
    PackagedFile(PathBuf),
    /// Loose source directory holding the entry script
    SourceDirectory(PathBuf),
    /// Nothing usable was found
    NotFound,
}

/// Content source paired with the fused flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLocation {
    pub source: ContentSource,
    /// True when running from bundled content rather than loose files
    pub fused: bool,
}

impl ContentLocation {
    pub fn archive(path: PathBuf) -> Self {
        Self {
            source: ContentSource::Archive(path),
            fused: true,
        }
    }

    pub fn packaged_file(path: PathBuf) -> Self {
        Self {
            source: ContentSource::PackagedFile(path),
            fused: true,
        }
    }

    pub fn source_directory(path: PathBuf) -> Self {
        Self {
            source: ContentSource::SourceDirectory(path),
            fused: false,
        }
    }

    pub fn not_found() -> Self {
        Self {
            source: ContentSource::NotFound,
            fused: false,
        }
    }

    /// Returns the located path, or `None` when nothing was found
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            ContentSource::Archive(path)
            | ContentSource::PackagedFile(path)
            | ContentSource::SourceDirectory(path) => Some(path),
            ContentSource::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.source != ContentSource::NotFound
    }
}
