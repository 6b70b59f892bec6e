//! Layered INI configuration.
//!
//! Values are addressed by `(section, key)`. Several files are read in
//! priority order and queried through a single [`ConfigStore`]; edits go
//! through a [`ConfigFile`] bound to one file.

mod address;
mod error;
mod file;
mod ini;
mod merging;
mod paths;
mod project;
mod store;

#[cfg(test)]
mod tests;

pub use address::{expand, expand_required};
pub use error::ConfigError;
pub use file::ConfigFile;
pub use ini::{IniDocument, Section};
pub use merging::{ConfigValue, MergeStrategy, merge, merge_all};
pub use paths::{ConfigPaths, LOCAL_CONFIG_FILE, PROJECT_MARKERS, expand_home};
pub use project::ProjectLocator;
pub use store::{ConfigSource, ConfigStore};
