//! Den - easy development environments, aka development dens.
//!
//! A den is a container created from a configured image with the current
//! project mounted inside, driven through a container engine CLI. The main
//! pieces are:
//!
//! - Layered INI configuration with project discovery ([`config`])
//! - Command resolution with prefixes and user-defined aliases ([`cli`])
//! - Engine command construction and process execution ([`engine`], [`shell`])
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use den::{cli::CliService, context::Context};
//!
//! let mut context = Context::from_env()?;
//! let output = CliService::new().execute(&mut context, &["list".to_string()])?;
//! println!("{output}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Layered configuration files.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface and command implementations.
pub mod cli;

/// Per-invocation state.
pub mod context;

/// Container engine commands.
pub mod engine;

/// Diagnostics and user-facing output.
pub mod logging;

/// External process execution.
pub mod shell;

/// Re-exported core types for convenience.
pub use crate::core::{DenError, Result};
