use super::ConfigError;

/// Resolves a `SECTION [KEY]` / `SECTION.KEY` argument pair.
///
/// An explicit key is used as given. Otherwise a dotted section token is
/// split on its first `.` only, so keys may contain further dots. A bare
/// section is accepted only when `key_required` is false.
///
/// # Errors
/// Returns `ConfigError::MissingKey` when a key is required but none can be
/// derived, or when the section or key part is empty.
pub fn expand(
    section: &str,
    key: Option<&str>,
    key_required: bool,
) -> Result<(String, Option<String>), ConfigError> {
    let (section, key) = match key {
        Some(key) => (section, Some(key)),
        None => match section.split_once('.') {
            Some((section, key)) => (section, Some(key)),
            None => (section, None),
        },
    };

    if section.is_empty() {
        return Err(ConfigError::MissingKey);
    }

    match key {
        Some(key) if key.is_empty() => Err(ConfigError::MissingKey),
        Some(key) => Ok((section.to_string(), Some(key.to_string()))),
        None if key_required => Err(ConfigError::MissingKey),
        None => Ok((section.to_string(), None)),
    }
}

/// Like [`expand`] with a required key, returning the pair directly.
///
/// # Errors
/// Returns `ConfigError::MissingKey` when no key can be derived.
pub fn expand_required(section: &str, key: Option<&str>) -> Result<(String, String), ConfigError> {
    match expand(section, key, true)? {
        (section, Some(key)) => Ok((section, key)),
        (_, None) => Err(ConfigError::MissingKey),
    }
}
