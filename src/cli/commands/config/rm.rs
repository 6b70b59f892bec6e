use clap::Parser;

use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, Parsed, parse_args},
    },
    config::{ConfigFile, expand},
    context::Context,
};

use super::target_file;

#[derive(Parser, Debug)]
#[command(name = "rm", about = "Delete configuration value(s)")]
struct RmArgs {
    /// Skip the confirmation prompt when removing a section
    #[arg(short, long)]
    yes: bool,

    /// Section name, or `section.key`
    section: String,

    /// Key within the section; the whole section is removed without one
    key: Option<String>,
}

/// Removes a key, or a whole section after confirmation.
pub struct RmCommand;

impl Command for RmCommand {
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        let args = match parse_args::<RmArgs>("rm", args)? {
            Parsed::Args(args) => args,
            Parsed::Help(help) => return Ok(help),
        };

        let (section, key) = expand(&args.section, args.key.as_deref(), false)?;
        let mut file = ConfigFile::open(target_file(context)?)?;

        let output = match key {
            Some(key) => {
                file.get(&section, &key)?;
                file.remove_option(&section, &key);
                format!("Removing {section}.{key}.")
            }
            None => {
                file.section(&section)?;
                context.confirm(
                    &format!("This will delete the entire `{section}` section."),
                    true,
                    args.yes,
                )?;
                file.remove_section(&section);
                String::new()
            }
        };

        file.save()?;
        Ok(output)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "rm".to_string(),
            description: "Delete configuration value(s)".to_string(),
            examples: vec!["den config rm alias.crst".to_string()],
        }
    }
}
