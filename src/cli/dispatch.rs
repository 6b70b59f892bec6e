use tracing::debug;

use crate::config::ConfigStore;

use super::{CliError, Command, CommandRegistry, alias};

/// Deepest chain of alias expansions followed in one resolution.
pub const MAX_ALIAS_DEPTH: usize = 16;

/// A command picked for execution.
pub struct Resolution<'r> {
    /// Full name of the resolved command.
    pub name: String,
    /// The command itself.
    pub command: &'r dyn Command,
    /// Arguments to hand to the command.
    pub args: Vec<String>,
}

/// Resolves `args[0]` to a registered command.
///
/// Resolution order:
/// 1. an exact name match;
/// 2. the single command whose name starts with `args[0]` (several matches
///    fail with `AmbiguousCommand`, even if an alias would match);
/// 3. an alias from `aliases`, whose expansion replaces `args[0]` and is
///    resolved again from step 1.
///
/// Without an alias source only steps 1 and 2 apply.
///
/// # Errors
/// * `CliError::CommandNotFound` - Nothing matched the requested name
/// * `CliError::AmbiguousCommand` - The prefix matched several commands
/// * `CliError::AliasCycle` - Alias expansion revisited an alias or went
///   deeper than [`MAX_ALIAS_DEPTH`]
/// * `CliError::InvalidArguments` - An alias expanded to nothing
pub fn resolve_command<'r>(
    registry: &'r CommandRegistry,
    args: &[String],
    aliases: Option<&ConfigStore>,
) -> Result<Resolution<'r>, CliError> {
    let mut args = args.to_vec();
    let mut chain: Vec<String> = Vec::new();

    loop {
        let Some(head) = args.first().cloned() else {
            return Err(match chain.last() {
                Some(alias) => {
                    CliError::InvalidArguments(format!("alias `{alias}` expands to nothing"))
                }
                None => CliError::CommandNotFound(String::new()),
            });
        };

        if let Some((name, command)) = find_command(registry, &head)? {
            args.remove(0);
            return Ok(Resolution {
                name,
                command,
                args,
            });
        }

        let Some(expansion) = aliases.and_then(|config| alias::find(config, &head)) else {
            return Err(CliError::CommandNotFound(head));
        };

        if chain.contains(&head) || chain.len() >= MAX_ALIAS_DEPTH {
            chain.push(head);
            return Err(CliError::AliasCycle { chain });
        }

        debug!(alias = %head, ?expansion, "Expanding alias");
        chain.push(head);
        args = expansion.into_iter().chain(args.into_iter().skip(1)).collect();
    }
}

/// Exact match first, then a unique prefix match.
fn find_command<'r>(
    registry: &'r CommandRegistry,
    name: &str,
) -> Result<Option<(String, &'r dyn Command)>, CliError> {
    if let Some(command) = registry.get_command(name) {
        return Ok(Some((name.to_string(), command)));
    }

    let candidates: Vec<String> = registry
        .list_commands()
        .into_iter()
        .filter(|command| command.starts_with(name))
        .collect();

    match candidates.as_slice() {
        [] => Ok(None),
        [only] => Ok(registry
            .get_command(only)
            .map(|command| (only.clone(), command))),
        _ => Err(CliError::AmbiguousCommand {
            name: name.to_string(),
            candidates,
        }),
    }
}
