use std::path::PathBuf;
use thiserror::Error;

/// Prefix of the environment variables that override [`ShimConfig`] fields
pub const ENV_PREFIX: &str = "NX_PLATFORM_";

/// Paths and names the platform layer works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimConfig {
    /// Root under which the read-only content archive is mounted
    pub archive_root: PathBuf,
    /// Directory probed for loose content, normally the working directory
    pub local_root: PathBuf,
    /// File name of the packaged content bundle
    pub packaged_name: String,
    /// File name of the unpackaged entry script
    pub entry_script: String,
    /// Default `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl ShimConfig {
    pub const DEFAULT_ARCHIVE_ROOT: &'static str = "romfs:/";
    pub const DEFAULT_LOCAL_ROOT: &'static str = ".";
    pub const DEFAULT_PACKAGED_NAME: &'static str = "game.love";
    pub const DEFAULT_ENTRY_SCRIPT: &'static str = "main.lua";
    pub const DEFAULT_LOG_FILTER: &'static str = "info";

    /// Builds a configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from defaults overridden by `lookup`
    ///
    /// `lookup` receives full variable names such as
    /// `NX_PLATFORM_ARCHIVE_ROOT`. The result is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let mut config = Self::default();

        if let Some(root) = var("ARCHIVE_ROOT") {
            config.archive_root = PathBuf::from(root);
        }
        if let Some(root) = var("LOCAL_ROOT") {
            config.local_root = PathBuf::from(root);
        }
        if let Some(name) = var("PACKAGED_NAME") {
            config.packaged_name = name;
        }
        if let Some(name) = var("ENTRY_SCRIPT") {
            config.entry_script = name;
        }
        if let Some(filter) = var("LOG_FILTER") {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that names are bare file names and roots are non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.archive_root.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRoot { field: "archive_root" });
        }
        if self.local_root.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRoot { field: "local_root" });
        }
        validate_file_name("packaged_name", &self.packaged_name)?;
        validate_file_name("entry_script", &self.entry_script)?;
        Ok(())
    }
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            archive_root: PathBuf::from(Self::DEFAULT_ARCHIVE_ROOT),
            local_root: PathBuf::from(Self::DEFAULT_LOCAL_ROOT),
            packaged_name: Self::DEFAULT_PACKAGED_NAME.to_owned(),
            entry_script: Self::DEFAULT_ENTRY_SCRIPT.to_owned(),
            log_filter: Self::DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

fn validate_file_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::EmptyName { field });
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::NotAFileName {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },
    #[error("{field} must be a bare file name, got {value:?}")]
    NotAFileName { field: &'static str, value: String },
    #[error("{field} must not be an empty path")]
    EmptyRoot { field: &'static str },
}
