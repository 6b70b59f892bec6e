use std::{collections::BTreeMap, fmt, path::Path};

use super::{ConfigError, ConfigValue};

/// A named group of `key = value` entries, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Section name as written in its `[header]`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a key; keys are matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates the entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    fn set(&mut self, key: &str, value: &str) {
        let key = normalize_key(key);
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key, value.to_string())),
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        let key = normalize_key(key);
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != key);
        before != self.entries.len()
    }
}

/// In-memory form of one INI file: ordered sections of ordered entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IniDocument {
    sections: Vec<Section>,
}

impl IniDocument {
    /// Parses INI text.
    ///
    /// `origin` only labels errors; nothing is read from it.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for entries outside a section, broken
    /// section headers and lines that are neither comments nor entries.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut document = Self::default();
        let mut current: Option<usize> = None;
        let mut last_key: Option<String> = None;

        for (index, raw) in content.lines().enumerate() {
            let line_number = index + 1;
            let fail = |details: &str| ConfigError::Parse {
                path: origin.to_path_buf(),
                line: line_number,
                details: details.to_string(),
            };
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with(|c: char| c.is_whitespace());
            if indented {
                if let (Some(section), Some(key)) = (current, last_key.as_deref()) {
                    let section = &mut document.sections[section];
                    let joined = match section.get(key) {
                        Some(existing) if !existing.is_empty() => format!("{existing}\n{trimmed}"),
                        _ => trimmed.to_string(),
                    };
                    section.set(key, &joined);
                    continue;
                }
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                // a comment may follow the closing bracket
                let name = header
                    .split_once(']')
                    .filter(|(_, rest)| {
                        let rest = rest.trim_start();
                        rest.is_empty() || rest.starts_with([';', '#'])
                    })
                    .map(|(name, _)| name.trim())
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| fail("malformed section header"))?;

                current = Some(document.section_index_or_insert(name));
                last_key = None;
                continue;
            }

            let section = current.ok_or_else(|| fail("entry found before any section header"))?;
            let split_at = trimmed
                .find(['=', ':'])
                .ok_or_else(|| fail("expected `key = value`"))?;
            let key = trimmed[..split_at].trim();
            if key.is_empty() {
                return Err(fail("entry has an empty key"));
            }
            let value = trimmed[split_at + 1..].trim();

            document.sections[section].set(key, value);
            last_key = Some(normalize_key(key));
        }

        Ok(document)
    }

    /// Looks up a single value.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|section| section.get(key))
    }

    /// Returns the named section, if defined.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Iterates all sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Whether the section is defined.
    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Adds or replaces a value, creating the section when it is missing.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let index = self.section_index_or_insert(section);
        self.sections[index].set(key, value);
    }

    /// Removes one key. Returns whether anything was removed.
    pub fn remove_option(&mut self, section: &str, key: &str) -> bool {
        self.sections
            .iter_mut()
            .find(|existing| existing.name == section)
            .is_some_and(|section| section.remove(key))
    }

    /// Removes a whole section. Returns whether it existed.
    pub fn remove_section(&mut self, section: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|existing| existing.name != section);
        before != self.sections.len()
    }

    /// Converts the document into a two level [`ConfigValue`] table.
    pub fn to_value(&self) -> ConfigValue {
        let table = self
            .sections
            .iter()
            .map(|section| {
                let entries: BTreeMap<String, ConfigValue> = section
                    .entries()
                    .map(|(key, value)| (key.to_string(), ConfigValue::Text(value.to_string())))
                    .collect();
                (section.name.clone(), ConfigValue::Table(entries))
            })
            .collect();

        ConfigValue::Table(table)
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|section| section.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in section.entries() {
                // continuation lines must stay indented to parse back
                let value = value.replace('\n', "\n\t");
                writeln!(f, "{key} = {value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Keys are case-insensitive and stored lower-cased.
pub(crate) fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
