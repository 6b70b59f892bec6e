use std::collections::BTreeMap;

use super::{Command, types::CommandMetadata};

/// Registry of the commands available at one level of the CLI.
///
/// Commands are keyed by the name from their metadata. Names are kept
/// sorted, which is also the order prefix candidates are reported in.
///
/// ```text
/// den
/// ├── alias
/// ├── config
/// │   ├── get
/// │   ├── rm
/// │   └── set
/// ├── create
/// └── ...
/// ```
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command under its metadata name.
    ///
    /// A command registered under an existing name replaces it.
    pub fn register_command(&mut self, command: Box<dyn Command>) {
        self.commands.insert(command.metadata().name, command);
    }

    /// Looks up a command by its exact name.
    pub fn get_command(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|command| command.as_ref())
    }

    /// Names of all registered commands, sorted.
    pub fn list_commands(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Metadata of all registered commands, sorted by name.
    pub fn metadata(&self) -> Vec<CommandMetadata> {
        self.commands
            .values()
            .map(|command| command.metadata())
            .collect()
    }
}
