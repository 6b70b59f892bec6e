use std::{
    fs::{self, Permissions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use super::{ConfigError, IniDocument, ini::Section};

/// Editor for exactly one configuration file.
///
/// Changes apply to the in-memory document and reach the disk only on
/// [`ConfigFile::save`].
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    document: IniDocument,
}

impl ConfigFile {
    /// Reads the file at `path`. A missing file opens as an empty document.
    ///
    /// # Errors
    /// * `ConfigError::Io` - If the file exists but cannot be read
    /// * `ConfigError::Parse` - If the file is malformed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(content) => IniDocument::parse(&content, &path)?,
            Err(e) if e.kind() == ErrorKind::NotFound => IniDocument::default(),
            Err(e) => return Err(ConfigError::io(e, &path)),
        };

        Ok(Self { path, document })
    }

    /// Path of the edited file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current document content.
    pub fn document(&self) -> &IniDocument {
        &self.document
    }

    /// Looks up a value.
    ///
    /// # Errors
    /// Returns `MissingSection` or `MissingOption` naming what is absent.
    pub fn get(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        self.section(section)?
            .get(key)
            .ok_or_else(|| ConfigError::MissingOption {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Returns a whole section.
    ///
    /// # Errors
    /// Returns `MissingSection` if it is not defined.
    pub fn section(&self, section: &str) -> Result<&Section, ConfigError> {
        self.document
            .section(section)
            .ok_or_else(|| ConfigError::MissingSection(section.to_string()))
    }

    /// Sets a value, adding the section when needed.
    pub fn set_value(&mut self, section: &str, key: &str, value: &str) {
        self.document.set(section, key, value);
    }

    /// Removes a key. Returns whether it was present.
    pub fn remove_option(&mut self, section: &str, key: &str) -> bool {
        self.document.remove_option(section, key)
    }

    /// Removes a section. Returns whether it was present.
    pub fn remove_section(&mut self, section: &str) -> bool {
        self.document.remove_section(section)
    }

    /// Writes the document back to its file.
    ///
    /// The content goes to a temporary file beside the target which is then
    /// renamed over it, so a failed write leaves the previous file intact.
    /// The staged file takes over the permissions of the file it replaces; a
    /// new file is created readable by everyone (`0644` on Unix).
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the directory, temporary file or rename fails.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<(), ConfigError> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&directory).map_err(|e| ConfigError::io(e, &directory))?;

        let mut staged =
            NamedTempFile::new_in(&directory).map_err(|e| ConfigError::io(e, &directory))?;
        staged
            .write_all(self.document.to_string().as_bytes())
            .and_then(|()| staged.flush())
            .map_err(|e| ConfigError::io(e, staged.path()))?;
        if let Some(permissions) = self.target_permissions()? {
            staged
                .as_file()
                .set_permissions(permissions)
                .map_err(|e| ConfigError::io(e, staged.path()))?;
        }
        staged
            .persist(&self.path)
            .map_err(|e| ConfigError::io(e.error, &self.path))?;

        debug!("Saved config file");
        Ok(())
    }

    fn target_permissions(&self) -> Result<Option<Permissions>, ConfigError> {
        match fs::metadata(&self.path) {
            Ok(metadata) => Ok(Some(metadata.permissions())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(default_permissions()),
            Err(e) => Err(ConfigError::io(e, &self.path)),
        }
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}
