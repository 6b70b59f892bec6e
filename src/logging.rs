//! Logging setup and user-facing output.
//!
//! Diagnostics go through `tracing` to stderr; the [`Reporter`] prints the
//! lines meant for the user on stdout.

use std::{
    cmp, env,
    io::{self, IsTerminal, Write},
};

use regex::Regex;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    cli::formatting::Colors,
    config::ConfigStore,
};

/// Environment variable selecting the log format (`json` or the default compact).
pub const LOG_FORMAT_ENV: &str = "DEN_LOG_FORMAT";

/// Logging preferences for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// Number of `-v` flags in effect.
    pub verbosity: u8,
    /// Debug mode: maximum diagnostics, unmasked engine errors.
    pub debug: bool,
}

impl LogSettings {
    /// Combines command line flags with the `[default]` config section.
    ///
    /// Flags win when given; otherwise `default.verbosity` and
    /// `default.debug` apply.
    pub fn resolve(verbose: u8, debug: bool, config: &ConfigStore) -> Self {
        let verbosity = if verbose > 0 {
            verbose
        } else {
            config
                .get("default", "verbosity")
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(0)
        };

        let debug = debug || config.get("default", "debug").is_some_and(is_truthy);

        Self { verbosity, debug }
    }

    /// Maximum level of diagnostics to emit.
    pub fn level(&self) -> LevelFilter {
        let level = match self.verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };

        if self.debug {
            cmp::max(level, LevelFilter::DEBUG)
        } else {
            level
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Initialize tracing for the CLI
///
/// Uses `RUST_LOG` when set, otherwise the level from `settings`. Output is
/// compact text on stderr, or JSON lines when `DEN_LOG_FORMAT=json`.
///
/// # Errors
/// Returns error if tracing subscriber initialization fails
pub fn init(settings: &LogSettings) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level().to_string()));

    let format = env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(env_filter);

    match format.as_str() {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .try_init()?;
        }
        _ => {
            registry
                .with(
                    fmt::layer()
                        .compact()
                        .without_time()
                        .with_target(settings.debug)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Prints user-facing lines.
///
/// Text wrapped in backticks is highlighted when stdout is a terminal.
#[derive(Debug)]
pub struct Reporter {
    settings: LogSettings,
    color: bool,
    emphasis: Option<Regex>,
}

impl Reporter {
    /// Creates a reporter, enabling color for terminals unless `NO_COLOR` is set.
    pub fn new(settings: LogSettings) -> Self {
        let color = io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none();
        Self::with_color(settings, color)
    }

    /// Creates a reporter with explicit color handling.
    pub fn with_color(settings: LogSettings, color: bool) -> Self {
        Self {
            settings,
            color,
            emphasis: Regex::new(r"`([^`]*)`").ok(),
        }
    }

    /// Settings this reporter was created with.
    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }

    /// Whether output is styled with ANSI colors.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Applies backtick highlighting.
    pub fn format(&self, message: &str) -> String {
        match (&self.emphasis, self.color) {
            (Some(emphasis), true) => emphasis
                .replace_all(message, format!("{}$1{}", Colors::CYAN, Colors::RESET).as_str())
                .into_owned(),
            _ => message.to_string(),
        }
    }

    /// Prints a formatted line to stdout.
    pub fn echo(&self, message: &str) {
        println!("{}", self.format(message));
    }

    /// Prints `message...`, runs `step`, then reports `done` or `error`.
    ///
    /// With verbose logging the step's own diagnostics start on a fresh line.
    ///
    /// # Errors
    /// Returns whatever error `step` returns.
    pub fn report_success<T, E>(
        &self,
        message: &str,
        step: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let line = format!("{}...", self.format(message));
        if self.settings.level() >= LevelFilter::INFO {
            println!("{line}");
        } else {
            print!("{line}");
            if let Err(e) = io::stdout().flush() {
                debug!(error = %e, "Failed to flush stdout");
            }
        }

        let result = step();
        match &result {
            Ok(_) => println!("{}", self.paint("done", Colors::GREEN)),
            Err(_) => println!("{}", self.paint("error", Colors::RED)),
        }

        result
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            format!("{color}{text}{}", Colors::RESET)
        } else {
            text.to_string()
        }
    }
}
