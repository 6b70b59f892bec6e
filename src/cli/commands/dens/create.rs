use clap::Parser;
use tracing::{info, warn};

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{CommandMetadata, Parsed, parse_args},
    },
    context::Context,
    engine::{CreateSpec, EngineError},
};

#[derive(Parser, Debug)]
#[command(name = "create", about = "Create a new den")]
struct CreateArgs {
    /// Start the den upon creation
    #[arg(short, long)]
    start: bool,

    /// Image to build off of
    #[arg(short, long)]
    image: Option<String>,

    /// Mount the docker daemon socket within the den
    #[arg(long)]
    with_docker: bool,

    /// Forward the host SSH agent into the den
    #[arg(long)]
    with_ssh: bool,

    /// Host device to expose to the den (repeatable)
    #[arg(long = "device", value_name = "DEV")]
    devices: Vec<String>,

    /// Name for the den
    name: Option<String>,

    /// Command to run in the den
    #[arg(trailing_var_arg = true)]
    cmd: Vec<String>,
}

/// Creates a den from a configured or explicit image.
///
/// The image comes from `-i` or `image.default`, the name from the argument,
/// `image.name` or the project directory, and the command from the trailing
/// arguments or `image.command`. Every `[ports]` entry is published.
pub struct CreateCommand;

impl Command for CreateCommand {
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        let args = match parse_args::<CreateArgs>("create", args)? {
            Parsed::Args(args) => args,
            Parsed::Help(help) => return Ok(help),
        };

        let use_default = args.image.is_none();
        if use_default {
            info!("No image provided, using default");
        }

        let config = context.config()?;
        let image = match args.image.or_else(|| config.get("image", "default").map(str::to_string)) {
            Some(image) if !image.is_empty() => image,
            _ => {
                warn!("No default found in configuration files.");
                return Err(EngineError::UndefinedImage.into());
            }
        };

        let command = if args.cmd.is_empty() {
            config
                .get("image", "command")
                .map(|command| command.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default()
        } else {
            args.cmd
        };
        let ports: Vec<(String, String)> = config.get_section("ports").into_iter().collect();

        let ssh_agent = if args.with_ssh {
            let sock = context.ssh_auth_sock().ok_or_else(|| {
                CliError::InvalidArguments("--with-ssh needs SSH_AUTH_SOCK to be set".to_string())
            })?;
            Some(sock.to_string())
        } else {
            None
        };

        let name = context.den_name(args.name)?;
        let spec = CreateSpec {
            name: name.clone(),
            image,
            project_root: context.project_root().to_path_buf(),
            ports,
            with_docker: args.with_docker,
            ssh_agent,
            devices: args.devices,
            command,
        };

        let base = if use_default { "default" } else { spec.image.as_str() };
        let engine = context.engine()?;
        context.reporter().report_success(
            &format!("Creating den environment `{name}` with `{base}` base"),
            || engine.create(&spec),
        )?;

        if args.start {
            super::start_den(context, &name)?;
        }

        Ok(String::new())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "create".to_string(),
            description: "Create a new den".to_string(),
            examples: vec![
                "den create --start".to_string(),
                "den create -i rust:latest scratch -- cargo test".to_string(),
            ],
        }
    }
}
