use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use super::{
    ConfigError, ConfigValue, IniDocument, MergeStrategy, ProjectLocator, merging::merge_all,
    paths::{PROJECT_MARKERS, expand_home},
};

/// One loaded configuration file.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: PathBuf,
    document: IniDocument,
}

impl ConfigSource {
    /// Wraps an already parsed document.
    pub fn new(path: impl Into<PathBuf>, document: IniDocument) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    /// Parses `content` as the file at `path`.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` if the content is malformed.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ConfigError> {
        let path = path.into();
        let document = IniDocument::parse(content, &path)?;
        Ok(Self { path, document })
    }

    /// Path the source was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed content.
    pub fn document(&self) -> &IniDocument {
        &self.document
    }
}

/// Read-only, layered view over several configuration files.
///
/// Sources are kept in priority order: a value defined in an earlier source
/// shadows the same `section.key` in any later one.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    sources: Vec<ConfigSource>,
}

impl ConfigStore {
    /// Builds a store from sources given highest priority first.
    pub fn from_sources(sources: Vec<ConfigSource>) -> Self {
        Self { sources }
    }

    /// Loads every existing file named by `specs`, highest priority first.
    ///
    /// Absolute and `~` prefixed specs are used as-is (after home
    /// expansion). Relative specs are joined onto the project root, which is
    /// located once on first need. Files that do not exist are skipped.
    ///
    /// # Errors
    /// * `ConfigError::Io` - If an existing file cannot be read
    /// * `ConfigError::Parse` - If an existing file is malformed
    #[instrument(skip(specs, locator), fields(start = %locator.start().display()))]
    pub fn load<S: AsRef<str>>(specs: &[S], locator: &ProjectLocator) -> Result<Self, ConfigError> {
        let mut base: Option<PathBuf> = None;
        let mut sources = Vec::new();

        for spec in specs {
            let spec = spec.as_ref();
            let path = if spec.starts_with('~') || Path::new(spec).is_absolute() {
                expand_home(spec, locator.home())
            } else {
                let base = base.get_or_insert_with(|| {
                    let mut markers = PROJECT_MARKERS.to_vec();
                    markers.push(spec);
                    locator.locate(&markers)
                });
                base.join(spec)
            };

            if !path.is_file() {
                debug!(path = %path.display(), "Config file not present, skipping");
                continue;
            }

            let content = fs::read_to_string(&path).map_err(|e| ConfigError::io(e, &path))?;
            debug!(path = %path.display(), "Loaded config file");
            sources.push(ConfigSource::parse(path, &content)?);
        }

        Ok(Self { sources })
    }

    /// Loaded sources, highest priority first.
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Looks up a value, returning the first definition found.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sources
            .iter()
            .find_map(|source| source.document.get(section, key))
    }

    /// Looks up a value, falling back to `default` when it is not defined.
    pub fn get_or(&self, section: &str, key: &str, default: &str) -> String {
        self.get(section, key).unwrap_or(default).to_string()
    }

    /// Whether any source defines the section.
    pub fn has_section(&self, section: &str) -> bool {
        self.sources
            .iter()
            .any(|source| source.document.has_section(section))
    }

    /// All key/value pairs of a section across every source.
    ///
    /// Keys defined in several sources take the highest priority value. An
    /// undefined section yields an empty map.
    pub fn get_section(&self, section: &str) -> BTreeMap<String, String> {
        self.merged()
            .get(section)
            .and_then(ConfigValue::as_table)
            .map(|table| {
                table
                    .iter()
                    .filter_map(|(key, value)| {
                        value.as_text().map(|text| (key.clone(), text.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Deep merged view of every source.
    pub fn merged(&self) -> ConfigValue {
        merge_all(
            self.sources.iter().map(|source| source.document.to_value()),
            MergeStrategy::Deep,
        )
    }
}
