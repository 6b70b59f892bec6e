//! Built-in commands.

/// Alias management.
pub mod alias;
/// Configuration file editing.
pub mod config;
/// Den lifecycle.
pub mod dens;
/// Version reporting.
pub mod version;

use super::CommandRegistry;

/// Registers every top level command.
pub fn register_all(registry: &mut CommandRegistry) {
    dens::register_commands(registry);
    registry.register_command(Box::new(config::ConfigCommand::new()));
    registry.register_command(Box::new(alias::AliasCommand));
    registry.register_command(Box::new(version::VersionCommand));
}
