use clap::Parser;
use tracing::debug;

use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, Parsed, parse_args},
    },
    config::{ConfigFile, expand_required},
    context::Context,
};

use super::target_file;

#[derive(Parser, Debug)]
#[command(name = "set", about = "Define a new configuration value")]
struct SetArgs {
    /// `SECTION KEY VALUE` or `SECTION.KEY VALUE`
    #[arg(value_names = ["SECTION", "KEY", "VALUE"], num_args = 2..=3, required = true)]
    values: Vec<String>,
}

/// Writes a value, creating the file and section when needed.
pub struct SetCommand;

impl Command for SetCommand {
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        let args = match parse_args::<SetArgs>("set", args)? {
            Parsed::Args(args) => args,
            Parsed::Help(help) => return Ok(help),
        };

        let (address, value) = args.values.split_at(args.values.len() - 1);
        let (section, key) = expand_required(&address[0], address.get(1).map(String::as_str))?;

        let mut file = ConfigFile::open(target_file(context)?)?;
        file.set_value(&section, &key, &value[0]);
        file.save()?;
        debug!(section, key, path = %file.path().display(), "Saved configuration value");

        Ok(String::new())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "set".to_string(),
            description: "Define a new configuration value".to_string(),
            examples: vec!["den config set ports 8080 80".to_string()],
        }
    }
}
