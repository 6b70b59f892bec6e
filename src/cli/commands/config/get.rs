use clap::Parser;

use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, Parsed, parse_args},
    },
    config::{ConfigFile, expand},
    context::Context,
};

use super::{format_entry, target_file};

#[derive(Parser, Debug)]
#[command(name = "get", about = "Lookup configuration value(s)")]
struct GetArgs {
    /// Section name, or `section.key`
    section: String,

    /// Key within the section
    key: Option<String>,
}

/// Prints one value, or every value of a section.
///
/// # Example Usage
///
/// ```bash
/// den config get image.default
/// den config get ports
/// ```
pub struct GetCommand;

impl Command for GetCommand {
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        let args = match parse_args::<GetArgs>("get", args)? {
            Parsed::Args(args) => args,
            Parsed::Help(help) => return Ok(help),
        };

        let (section, key) = expand(&args.section, args.key.as_deref(), false)?;
        let file = ConfigFile::open(target_file(context)?)?;

        match key {
            Some(key) => Ok(format_entry(&section, &key, file.get(&section, &key)?)),
            None => Ok(file
                .section(&section)?
                .entries()
                .map(|(key, value)| format_entry(&section, key, value))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "get".to_string(),
            description: "Lookup configuration value(s)".to_string(),
            examples: vec!["den config get image.default".to_string()],
        }
    }
}
