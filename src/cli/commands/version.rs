use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    context::Context,
};

/// Prints the den version.
pub struct VersionCommand;

impl Command for VersionCommand {
    fn execute(&self, _context: &mut Context, _args: &[String]) -> CommandResult {
        Ok(format!("Den version {}", env!("CARGO_PKG_VERSION")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "version".to_string(),
            description: "Show the den version".to_string(),
            examples: vec![],
        }
    }
}
