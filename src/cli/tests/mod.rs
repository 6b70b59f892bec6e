//! Unit tests for CLI module
//!
//! Tests command resolution, alias lookup and formatting helpers. Commands
//! here are stand-ins that echo what they were called with.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use crate::{
    cli::{
        CliError, Command, CommandRegistry, CommandResult, GlobalArgs,
        alias,
        dispatch::{MAX_ALIAS_DEPTH, resolve_command},
        formatting::{align_table, format_command_list},
        types::CommandMetadata,
    },
    config::{ConfigSource, ConfigStore},
    context::Context,
};

struct Echo(&'static str);

impl Command for Echo {
    fn execute(&self, _context: &mut Context, args: &[String]) -> CommandResult {
        Ok(format!("{} {}", self.0, args.join(" ")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: self.0.to_string(),
            description: format!("{} things", self.0),
            examples: vec![],
        }
    }
}

fn registry(names: &[&'static str]) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for name in names {
        registry.register_command(Box::new(Echo(*name)));
    }
    registry
}

fn den_registry() -> CommandRegistry {
    registry(&["alias", "config", "create", "delete", "list", "start", "stop", "version"])
}

fn aliases(content: &str) -> ConfigStore {
    ConfigStore::from_sources(vec![ConfigSource::parse("/test/.den.ini", content).unwrap()])
}

fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

mod registry {
    use super::*;

    #[test]
    fn lists_commands_sorted() {
        let registry = registry(&["stop", "alias", "start"]);
        assert_eq!(registry.list_commands(), vec!["alias", "start", "stop"]);
    }

    #[test]
    fn looks_up_exact_names_only() {
        let registry = den_registry();
        assert!(registry.get_command("list").is_some());
        assert!(registry.get_command("li").is_none());
    }

    #[test]
    fn re_registering_replaces() {
        let mut registry = registry(&["list"]);
        registry.register_command(Box::new(Echo("list")));
        assert_eq!(registry.list_commands().len(), 1);
    }
}

mod resolution {
    use super::*;

    #[test]
    fn exact_name_wins_over_prefix_of_longer_command() {
        let registry = registry(&["st", "start", "stop"]);
        let resolution = resolve_command(&registry, &args("st now"), None).unwrap();
        assert_eq!(resolution.name, "st");
        assert_eq!(resolution.args, vec!["now"]);
    }

    #[test]
    fn unique_prefix_resolves() {
        let registry = den_registry();
        let resolution = resolve_command(&registry, &args("cr -s web"), None).unwrap();
        assert_eq!(resolution.name, "create");
        assert_eq!(resolution.args, vec!["-s", "web"]);
    }

    #[test]
    fn ambiguous_prefix_lists_candidates_in_order() {
        let registry = den_registry();
        let Err(error) = resolve_command(&registry, &args("st"), None) else {
            panic!("expected an ambiguity error");
        };

        assert_eq!(
            error.to_string(),
            "`st` is ambiguous and matched multiple commands: start, stop"
        );
    }

    #[test]
    fn ambiguous_prefix_is_not_rescued_by_alias() {
        let registry = den_registry();
        let config = aliases("[alias]\nst = list\n");

        let result = resolve_command(&registry, &args("st"), Some(&config));
        assert!(matches!(result, Err(CliError::AmbiguousCommand { .. })));
    }

    #[test]
    fn unknown_name_without_alias_is_not_found() {
        let registry = den_registry();
        let config = aliases("[alias]\nls = list\n");

        let result = resolve_command(&registry, &args("zzz"), Some(&config));
        assert!(matches!(result, Err(CliError::CommandNotFound(name)) if name == "zzz"));
    }

    #[test]
    fn alias_expands_and_keeps_trailing_arguments() {
        let registry = den_registry();
        let config = aliases("[alias]\ncrst = create --start\n");

        let resolution = resolve_command(&registry, &args("crst web"), Some(&config)).unwrap();
        assert_eq!(resolution.name, "create");
        assert_eq!(resolution.args, vec!["--start", "web"]);
    }

    #[test]
    fn alias_expansion_may_use_a_prefix() {
        let registry = den_registry();
        let config = aliases("[alias]\nls = li -r\n");

        let resolution = resolve_command(&registry, &args("ls"), Some(&config)).unwrap();
        assert_eq!(resolution.name, "list");
        assert_eq!(resolution.args, vec!["-r"]);
    }

    #[test]
    fn command_names_shadow_aliases() {
        let registry = den_registry();
        let config = aliases("[alias]\nlist = version\n");

        let resolution = resolve_command(&registry, &args("list"), Some(&config)).unwrap();
        assert_eq!(resolution.name, "list");
    }

    #[test]
    fn aliases_ignored_without_source() {
        let registry = den_registry();
        let result = resolve_command(&registry, &args("crst"), None);
        assert!(matches!(result, Err(CliError::CommandNotFound(_))));
    }

    #[test]
    fn chained_aliases_resolve() {
        let registry = den_registry();
        let config = aliases("[alias]\nup = crst web\ncrst = create --start\n");

        let resolution = resolve_command(&registry, &args("up"), Some(&config)).unwrap();
        assert_eq!(resolution.name, "create");
        assert_eq!(resolution.args, vec!["--start", "web"]);
    }

    #[test]
    fn self_referencing_alias_is_a_cycle() {
        let registry = den_registry();
        let config = aliases("[alias]\nloop = loop again\n");

        let Err(CliError::AliasCycle { chain }) =
            resolve_command(&registry, &args("loop"), Some(&config))
        else {
            panic!("expected an alias cycle");
        };
        assert_eq!(chain, vec!["loop", "loop"]);
    }

    #[test]
    fn mutual_aliases_are_a_cycle() {
        let registry = den_registry();
        let config = aliases("[alias]\nping = pong\npong = ping\n");

        let result = resolve_command(&registry, &args("ping"), Some(&config));
        assert!(matches!(
            result,
            Err(CliError::AliasCycle { chain }) if chain == vec!["ping", "pong", "ping"]
        ));
    }

    #[test]
    fn deep_alias_chains_are_cut_off() {
        let registry = den_registry();
        let mut content = String::from("[alias]\n");
        for depth in 0..=MAX_ALIAS_DEPTH {
            content.push_str(&format!("a{depth} = a{}\n", depth + 1));
        }
        content.push_str(&format!("a{} = list\n", MAX_ALIAS_DEPTH + 1));
        let config = aliases(&content);

        let result = resolve_command(&registry, &args("a0"), Some(&config));
        assert!(matches!(
            result,
            Err(CliError::AliasCycle { chain }) if chain.len() == MAX_ALIAS_DEPTH + 1
        ));
    }

    #[test]
    fn empty_arguments_are_not_found() {
        let registry = den_registry();
        assert!(matches!(
            resolve_command(&registry, &[], None),
            Err(CliError::CommandNotFound(_))
        ));
    }
}

mod aliases {
    use super::*;

    #[test]
    fn splits_on_single_spaces() {
        let config = aliases("[alias]\ncrst = create --start\n");
        assert_eq!(
            alias::find(&config, "crst"),
            Some(vec!["create".to_string(), "--start".to_string()])
        );
    }

    #[test]
    fn missing_or_empty_alias_is_none() {
        let config = aliases("[alias]\nblank =\n");
        assert_eq!(alias::find(&config, "blank"), None);
        assert_eq!(alias::find(&config, "other"), None);
        assert_eq!(alias::find(&ConfigStore::default(), "crst"), None);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let config = aliases("[alias]\nCRST = create --start\n");
        assert!(alias::find(&config, "crst").is_some());
    }
}

mod formatting {
    use super::*;

    #[test]
    fn align_table_pads_to_widest_cell() {
        let rows = vec![
            vec!["NAME", "STATUS", "IMAGE"],
            vec!["backend-service", "running", "python:3"],
        ];

        let lines = align_table(&rows, 8, " ");
        assert_eq!(lines[0], "NAME            STATUS   IMAGE");
        assert_eq!(lines[1], "backend-service running  python:3");
    }

    #[test]
    fn align_table_respects_minimum_width() {
        let rows = vec![vec!["a", "b"], vec!["cc", "d"]];
        let lines = align_table(&rows, 4, "|");
        assert_eq!(lines, vec!["a   |b", "cc  |d"]);
    }

    #[test]
    fn align_table_of_nothing_is_empty() {
        let rows: Vec<Vec<String>> = vec![];
        assert!(align_table(&rows, 8, " ").is_empty());
    }

    #[test]
    fn command_list_shows_names_and_descriptions() {
        let registry = registry(&["list", "create"]);
        let help = format_command_list("den <COMMAND>", &registry.metadata(), false);

        assert!(help.starts_with("Usage: den <COMMAND>"));
        assert!(help.contains("  create  create things"));
        assert!(help.contains("  list    list things"));
        assert!(!help.contains('\x1b'));
    }
}

mod global_args {
    use clap::{Parser, error::ErrorKind};

    use super::*;

    fn parse(line: &str) -> GlobalArgs {
        GlobalArgs::try_parse_from(args(line)).unwrap()
    }

    #[test]
    fn counts_verbosity_and_reads_debug() {
        let parsed = parse("den -vv -d list -r");

        assert_eq!(parsed.verbose, 2);
        assert!(parsed.debug);
        assert_eq!(parsed.command, vec!["list", "-r"]);
    }

    #[test]
    fn flags_after_the_command_belong_to_it() {
        let parsed = parse("den stop -d web");

        assert!(!parsed.debug);
        assert_eq!(parsed.verbose, 0);
        assert_eq!(parsed.command, vec!["stop", "-d", "web"]);
    }

    #[test]
    fn help_after_the_command_is_passed_on() {
        let parsed = parse("den -v create --help");

        assert_eq!(parsed.verbose, 1);
        assert_eq!(parsed.command, vec!["create", "--help"]);
    }

    #[test]
    fn no_command_is_empty() {
        assert!(parse("den").command.is_empty());
    }

    #[test]
    fn global_help_is_handled_by_clap() {
        let error = GlobalArgs::try_parse_from(["den", "--help"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DisplayHelp);
    }
}

mod errors {
    use super::*;

    #[test]
    fn child_exit_code_passes_through() {
        assert_eq!(CliError::ChildExit(3).exit_code(), 3);
        assert_eq!(CliError::ChildExit(300).exit_code(), 1);
        assert_eq!(CliError::Aborted.exit_code(), 1);
    }

    #[test]
    fn messages() {
        assert_eq!(
            CliError::NoAlias("crst".to_string()).to_string(),
            "No `crst` alias defined."
        );
        assert_eq!(
            CliError::AliasCycle {
                chain: vec!["a".to_string(), "b".to_string(), "a".to_string()]
            }
            .to_string(),
            "Alias expansion does not terminate: a -> b -> a"
        );
    }
}
