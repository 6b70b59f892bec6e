use std::{
    env,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

/// Name of the project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".den.ini";

/// Directory entries that mark the root of a project.
pub const PROJECT_MARKERS: &[&str] = &[".git", LOCAL_CONFIG_FILE];

/// Utility struct for managing configuration file paths
///
/// Provides methods to locate configuration directories and files following
/// the XDG Base Directory specification
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the user's home directory from `HOME`
    pub fn home_dir() -> Option<PathBuf> {
        env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
    }

    /// Returns the base configuration directory
    ///
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` environment variables are set
    pub fn config_dir() -> Result<PathBuf, Error> {
        env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| Self::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::NotFound,
                    "Neither XDG_CONFIG_HOME nor HOME environment variable found",
                )
            })
    }

    /// Returns the path of the user level configuration file (`den.ini` in
    /// the config directory)
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    pub fn user_config() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join("den.ini"))
    }

    /// Historical user configuration file kept directly in the home directory
    pub fn legacy_user_config() -> Option<PathBuf> {
        Self::home_dir().map(|home| home.join(LOCAL_CONFIG_FILE))
    }

    /// Ordered configuration file specs consulted on every invocation,
    /// highest priority first.
    ///
    /// The local file stays relative so it gets resolved against the project
    /// root. User level paths are rewritten with a `~` prefix when they live
    /// under the home directory.
    pub fn default_specs() -> Vec<String> {
        let home = Self::home_dir();
        let mut specs = vec![LOCAL_CONFIG_FILE.to_string()];

        if let Ok(user) = Self::user_config() {
            specs.push(contract_home(&user, home.as_deref()));
        }

        if let Some(legacy) = Self::legacy_user_config() {
            specs.push(contract_home(&legacy, home.as_deref()));
        }

        specs
    }
}

/// Expands a leading `~` into the home directory.
///
/// Paths without the prefix, or a missing home directory, leave the path
/// untouched.
pub fn expand_home(spec: &str, home: Option<&Path>) -> PathBuf {
    match (spec.strip_prefix('~'), home) {
        (Some(rest), Some(home)) => home.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(spec),
    }
}

fn contract_home(path: &Path, home: Option<&Path>) -> String {
    match home.and_then(|home| path.strip_prefix(home).ok()) {
        Some(rest) => format!("~/{}", rest.display()),
        None => path.display().to_string(),
    }
}
