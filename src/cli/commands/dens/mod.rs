//! Den lifecycle commands.
//!
//! Every den is a container labelled `den`, created from a configured image
//! with the project root mounted at `/src`.

mod create;
mod delete;
mod list;
mod start;
mod stop;

pub use create::CreateCommand;
pub use delete::DeleteCommand;
pub use list::ListCommand;
pub use start::StartCommand;
pub use stop::StopCommand;

use crate::{
    cli::{CliError, CommandRegistry},
    context::Context,
};

/// Registers the den lifecycle commands.
pub fn register_commands(registry: &mut CommandRegistry) {
    registry.register_command(Box::new(CreateCommand));
    registry.register_command(Box::new(StartCommand));
    registry.register_command(Box::new(StopCommand));
    registry.register_command(Box::new(DeleteCommand));
    registry.register_command(Box::new(ListCommand));
}

/// Attaches to `name`, failing with the den's own exit code.
fn start_den(context: &mut Context, name: &str) -> Result<(), CliError> {
    context
        .reporter()
        .echo(&format!("Starting `{name}` environment..."));

    match context.engine()?.start(name)? {
        0 => Ok(()),
        code => Err(CliError::ChildExit(code)),
    }
}

/// Force deletes each den in `names`.
fn delete_dens(context: &mut Context, names: &[String]) -> Result<(), CliError> {
    let engine = context.engine()?;

    for name in names {
        context
            .reporter()
            .report_success(&format!("Removing the `{name}` environment"), || {
                engine.delete(name)
            })?;
    }

    Ok(())
}
