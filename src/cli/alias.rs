use crate::config::ConfigStore;

/// Config section holding alias definitions.
pub const ALIAS_SECTION: &str = "alias";

/// Looks up the expansion of `alias`.
///
/// The stored value is split on single spaces; quoting is not supported, so
/// an argument containing a space cannot be expressed in an alias. Returns
/// `None` when the alias is not defined or is empty.
pub fn find(config: &ConfigStore, alias: &str) -> Option<Vec<String>> {
    config
        .get(ALIAS_SECTION, alias)
        .filter(|expansion| !expansion.is_empty())
        .map(|expansion| expansion.split(' ').map(str::to_string).collect())
}
