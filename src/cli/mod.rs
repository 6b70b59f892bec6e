//! Command-line interface.
//!
//! Top level commands live in a flat [`CommandRegistry`]; the first argument
//! resolves by exact name, unique prefix, or a configured alias (see
//! [`dispatch::resolve_command`]). Each command parses its own arguments.

/// Alias lookup in the `[alias]` section.
pub mod alias;
pub mod commands;
/// Command name resolution.
pub mod dispatch;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use registry::CommandRegistry;
pub use service::{CliService, GlobalArgs};
pub use types::{CliError, Command, CommandMetadata, CommandResult};
