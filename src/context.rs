//! Per-invocation state shared by all commands.

use std::{
    env, io,
    path::{Path, PathBuf},
    rc::Rc,
};

use dialoguer::Confirm;
use tracing::debug;

use crate::{
    cli::CliError,
    config::{ConfigError, ConfigPaths, ConfigStore, LOCAL_CONFIG_FILE, PROJECT_MARKERS, ProjectLocator},
    engine::{ContainerEngine, DEFAULT_ENGINE},
    logging::{LogSettings, Reporter},
    shell::{Shell, SystemShell},
};

/// Asks the user yes/no questions.
pub trait Prompt {
    /// Asks `message`, returning the answer.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be read.
    fn confirm(&self, message: &str, default: bool) -> io::Result<bool>;
}

/// [`Prompt`] reading answers from the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str, default: bool) -> io::Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(io::Error::other)
    }
}

/// [`Prompt`] that always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Prompt for FixedAnswer {
    fn confirm(&self, message: &str, _default: bool) -> io::Result<bool> {
        debug!(prompt = message, answer = self.0, "Answering prompt");
        Ok(self.0)
    }
}

/// State for one `den` invocation.
///
/// The configuration and the project root are computed on first use and
/// cached for the rest of the invocation.
pub struct Context {
    working_dir: PathBuf,
    home: Option<PathBuf>,
    config_specs: Vec<String>,
    user_config: Option<PathBuf>,
    ssh_auth_sock: Option<String>,
    config: Option<ConfigStore>,
    project_root: Option<PathBuf>,
    target_config: Option<PathBuf>,
    reporter: Reporter,
    shell: Rc<dyn Shell>,
    prompt: Box<dyn Prompt>,
}

impl Context {
    /// Creates a context rooted at `working_dir`.
    ///
    /// Uses the real shell and terminal prompt and no config files.
    pub fn new(working_dir: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            home,
            config_specs: Vec::new(),
            user_config: None,
            ssh_auth_sock: None,
            config: None,
            project_root: None,
            target_config: None,
            reporter: Reporter::new(LogSettings::default()),
            shell: Rc::new(SystemShell),
            prompt: Box::new(TerminalPrompt),
        }
    }

    /// Creates a context from the process environment.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    pub fn from_env() -> io::Result<Self> {
        let mut context = Self::new(env::current_dir()?, ConfigPaths::home_dir());
        context.config_specs = ConfigPaths::default_specs();
        context.user_config = ConfigPaths::user_config().ok();
        context.ssh_auth_sock = env::var("SSH_AUTH_SOCK").ok().filter(|sock| !sock.is_empty());
        Ok(context)
    }

    /// Sets the config file specs, highest priority first.
    pub fn with_config_specs<S: Into<String>>(mut self, specs: impl IntoIterator<Item = S>) -> Self {
        self.config_specs = specs.into_iter().map(Into::into).collect();
        self.config = None;
        self
    }

    /// Sets the user level config file written by `-u`.
    pub fn with_user_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_config = Some(path.into());
        self
    }

    /// Sets the host SSH agent socket.
    pub fn with_ssh_auth_sock(mut self, sock: impl Into<String>) -> Self {
        self.ssh_auth_sock = Some(sock.into());
        self
    }

    /// Replaces the shell used to run engine commands.
    pub fn with_shell(mut self, shell: Rc<dyn Shell>) -> Self {
        self.shell = shell;
        self
    }

    /// Replaces the confirmation prompt.
    pub fn with_prompt(mut self, prompt: Box<dyn Prompt>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Applies logging settings to user output and engine error handling.
    pub fn set_log_settings(&mut self, settings: LogSettings) {
        self.reporter = Reporter::new(settings);
    }

    /// Current logging settings.
    pub fn log_settings(&self) -> &LogSettings {
        self.reporter.settings()
    }

    /// Printer for user-facing output.
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Directory the invocation started in.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Layered configuration, loaded on first access.
    ///
    /// # Errors
    /// Returns `ConfigError` if an existing config file cannot be read or parsed.
    pub fn config(&mut self) -> Result<&ConfigStore, ConfigError> {
        if self.config.is_none() {
            let locator = ProjectLocator::new(&self.working_dir, self.home.clone());
            self.config = Some(ConfigStore::load(&self.config_specs, &locator)?);
        }

        Ok(&*self.config.get_or_insert_with(ConfigStore::default))
    }

    /// Root of the current project, located on first access.
    pub fn project_root(&mut self) -> &Path {
        if self.project_root.is_none() {
            let locator = ProjectLocator::new(&self.working_dir, self.home.clone());
            self.project_root = Some(locator.locate(PROJECT_MARKERS));
        }

        self.project_root.get_or_insert_with(|| self.working_dir.clone())
    }

    /// Name of the den to act on.
    ///
    /// An explicit name wins, then `image.name` from the configuration, then
    /// the project directory name.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration cannot be loaded.
    pub fn den_name(&mut self, explicit: Option<String>) -> Result<String, ConfigError> {
        if let Some(name) = explicit {
            return Ok(name);
        }

        if let Some(name) = self.config()?.get("image", "name").filter(|name| !name.is_empty()) {
            return Ok(name.to_string());
        }

        Ok(self.default_name())
    }

    /// Project directory name.
    pub fn default_name(&mut self) -> String {
        self.project_root()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "den".to_string())
    }

    /// Container engine configured for this invocation.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration cannot be loaded.
    pub fn engine(&mut self) -> Result<ContainerEngine, ConfigError> {
        let program = self.config()?.get_or("engine", "program", DEFAULT_ENGINE);
        Ok(ContainerEngine::new(
            Rc::clone(&self.shell),
            program,
            self.log_settings().debug,
        ))
    }

    /// Host SSH agent socket, if one is available.
    pub fn ssh_auth_sock(&self) -> Option<&str> {
        self.ssh_auth_sock.as_deref()
    }

    /// Selects the config file edits are written to.
    ///
    /// `user` picks the user level file, otherwise the project's
    /// `.den.ini`.
    ///
    /// # Errors
    /// Returns `CliError::IoError` when the user config location is unknown.
    pub fn select_target_config(&mut self, user: bool) -> Result<&Path, CliError> {
        let target = if user {
            self.user_config.clone().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Unable to determine the user config location")
            })?
        } else {
            self.project_root().join(LOCAL_CONFIG_FILE)
        };

        debug!(target = %target.display(), "Selected config target");
        Ok(self.target_config.insert(target).as_path())
    }

    /// Config file selected by [`Context::select_target_config`].
    pub fn target_config(&self) -> Option<&Path> {
        self.target_config.as_deref()
    }

    /// Asks for confirmation unless `assume_yes`; declining aborts.
    ///
    /// # Errors
    /// Returns `CliError::Aborted` when the user declines.
    pub fn confirm(&self, message: &str, default: bool, assume_yes: bool) -> Result<(), CliError> {
        if assume_yes || self.prompt.confirm(message, default)? {
            Ok(())
        } else {
            Err(CliError::Aborted)
        }
    }
}
