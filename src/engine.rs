//! Den lifecycle through a container engine CLI.
//!
//! Every action is a single engine invocation (`docker create`, `docker
//! start`, ...) executed through a [`Shell`]. Containers created here carry
//! the [`DEN_LABEL`] label so they can be listed and bulk deleted later.

use std::{path::PathBuf, rc::Rc};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::shell::{CommandLine, RunOptions, Shell, ShellError};

/// Engine executable used when none is configured.
pub const DEFAULT_ENGINE: &str = "docker";

/// Label attached to every den container.
pub const DEN_LABEL: &str = "den";

/// Mount point of the project directory inside a den.
pub const SOURCE_MOUNT: &str = "/src";

const DOCKER_SOCKET: &str = "/var/run/docker.sock";
const SSH_AGENT_MOUNT: &str = "/run/ssh-agent";

/// Engine output fragments that mean the daemon itself is not reachable.
const UNREACHABLE_MARKERS: &[&str] = &[
    "Cannot connect to the Docker daemon",
    "Is the docker daemon running",
    "connection refused",
    "Cannot connect to Podman",
];

/// Errors raised by container engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine daemon could not be contacted
    #[error("Unable to reach `{engine}`, ensure the engine is running and reachable.")]
    Unreachable {
        /// Engine executable
        engine: String,
        /// Engine diagnostic output
        details: String,
    },

    /// The engine executable is not on the `PATH`
    #[error("`{engine}` is not installed or not on the PATH.")]
    NotInstalled {
        /// Engine executable
        engine: String,
    },

    /// No image was given and none is configured
    #[error("There is no defined image to build off of.")]
    UndefinedImage,

    /// An engine command failed
    #[error(transparent)]
    Process(#[from] ShellError),

    /// Engine output could not be decoded
    #[error("failed to decode engine output '{line}': {details}")]
    Decode {
        /// Offending output line
        line: String,
        /// Decoder error details
        details: String,
    },
}

/// Everything needed to create a den.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSpec {
    /// Container and host name.
    pub name: String,
    /// Image to create the container from.
    pub image: String,
    /// Project directory mounted at [`SOURCE_MOUNT`].
    pub project_root: PathBuf,
    /// Published ports as `(guest, host)` pairs.
    pub ports: Vec<(String, String)>,
    /// Mount the engine socket inside the den.
    pub with_docker: bool,
    /// Host SSH agent socket to forward.
    pub ssh_agent: Option<String>,
    /// Host devices to expose.
    pub devices: Vec<String>,
    /// Command to run instead of the image default.
    pub command: Vec<String>,
}

/// One den as reported by the engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContainerSummary {
    /// Container name.
    #[serde(rename = "Names")]
    pub name: String,
    /// Lifecycle state (`running`, `exited`, ...).
    #[serde(rename = "State", default)]
    pub state: String,
    /// Image reference.
    #[serde(rename = "Image", default)]
    pub image: String,
}

/// Container engine driven through its command line.
pub struct ContainerEngine {
    shell: Rc<dyn Shell>,
    program: String,
    debug: bool,
}

impl ContainerEngine {
    /// Creates an engine that runs `program` through `shell`.
    ///
    /// In debug mode connection failures surface with the engine's own
    /// output instead of the generic reachability message.
    pub fn new(shell: Rc<dyn Shell>, program: impl Into<String>, debug: bool) -> Self {
        Self {
            shell,
            program: program.into(),
            debug,
        }
    }

    /// Engine executable.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the `create` command line for a den.
    pub fn create_command(&self, spec: &CreateSpec) -> CommandLine {
        let mut volume = spec.project_root.display().to_string();
        if !volume.ends_with('/') {
            volume.push('/');
        }

        let mut command = CommandLine::new(&self.program)
            .arg("create")
            .args(["--hostname", spec.name.as_str(), "--interactive"])
            .args(["--label", DEN_LABEL, "--name", spec.name.as_str()]);

        for (guest, host) in &spec.ports {
            let host = if host.is_empty() { guest } else { host };
            command = command.args(["--publish".to_string(), format!("{guest}:{host}")]);
        }

        command = command
            .arg("--tty")
            .args(["--volume".to_string(), format!("{volume}:{SOURCE_MOUNT}")]);

        if spec.with_docker {
            command = command.args(["--volume".to_string(), format!("{DOCKER_SOCKET}:{DOCKER_SOCKET}")]);
        }

        if let Some(agent) = &spec.ssh_agent {
            command = command
                .args(["--volume".to_string(), format!("{agent}:{SSH_AGENT_MOUNT}")])
                .args(["--env".to_string(), format!("SSH_AUTH_SOCK={SSH_AGENT_MOUNT}")]);
        }

        for device in &spec.devices {
            command = command.args(["--device", device.as_str()]);
        }

        command.arg(&spec.image).args(spec.command.iter().cloned())
    }

    /// Creates a den without starting it.
    ///
    /// # Errors
    /// Returns `EngineError` if the engine is missing, unreachable or fails.
    #[instrument(skip(self, spec), fields(name = %spec.name, image = %spec.image))]
    pub fn create(&self, spec: &CreateSpec) -> Result<(), EngineError> {
        self.ensure_installed()?;
        self.run(&self.create_command(spec), RunOptions::quiet())
            .map(|_| ())
    }

    /// Starts a den attached to the terminal and returns its exit code.
    ///
    /// # Errors
    /// Returns `EngineError` if the engine is missing or cannot be started.
    #[instrument(skip(self))]
    pub fn start(&self, name: &str) -> Result<i32, EngineError> {
        self.ensure_installed()?;
        let command = CommandLine::new(&self.program).args(["start", "--attach", "--interactive", name]);
        self.run(&command, RunOptions::interactive())
    }

    /// Stops a running den.
    ///
    /// # Errors
    /// Returns `EngineError` if the engine is missing, unreachable or fails.
    #[instrument(skip(self))]
    pub fn stop(&self, name: &str) -> Result<(), EngineError> {
        self.ensure_installed()?;
        let command = CommandLine::new(&self.program).args(["stop", "--time", "1", name]);
        self.run(&command, RunOptions::quiet()).map(|_| ())
    }

    /// Force deletes a den.
    ///
    /// # Errors
    /// Returns `EngineError` if the engine is missing, unreachable or fails.
    #[instrument(skip(self))]
    pub fn delete(&self, name: &str) -> Result<(), EngineError> {
        self.ensure_installed()?;
        let command = CommandLine::new(&self.program).args(["rm", "--force", name]);
        self.run(&command, RunOptions::quiet()).map(|_| ())
    }

    /// Lists dens, optionally only the running ones.
    ///
    /// # Errors
    /// Returns `EngineError` if the engine fails or prints undecodable output.
    #[instrument(skip(self))]
    pub fn list(&self, running_only: bool) -> Result<Vec<ContainerSummary>, EngineError> {
        self.ensure_installed()?;
        let mut command = CommandLine::new(&self.program).arg("ps");
        if !running_only {
            command = command.arg("--all");
        }
        command = command
            .args(["--filter".to_string(), format!("label={DEN_LABEL}")])
            .args(["--format", "{{json .}}"]);

        let lines = self
            .shell
            .output(&command)
            .map_err(|e| self.classify(e))?;

        lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str::<ContainerSummary>(line).map_err(|e| EngineError::Decode {
                    line: line.clone(),
                    details: e.to_string(),
                })
            })
            .collect()
    }

    fn run(&self, command: &CommandLine, options: RunOptions) -> Result<i32, EngineError> {
        self.shell
            .run(command, options)
            .map_err(|e| self.classify(e))
    }

    fn ensure_installed(&self) -> Result<(), EngineError> {
        if self.shell.is_installed(&self.program) {
            Ok(())
        } else {
            Err(EngineError::NotInstalled {
                engine: self.program.clone(),
            })
        }
    }

    fn classify(&self, error: ShellError) -> EngineError {
        let unreachable = error
            .stderr()
            .is_some_and(|stderr| UNREACHABLE_MARKERS.iter().any(|marker| stderr.contains(marker)));

        if unreachable && !self.debug {
            debug!(%error, "Engine daemon unreachable");
            return EngineError::Unreachable {
                engine: self.program.clone(),
                details: error.stderr().unwrap_or_default().to_string(),
            };
        }

        EngineError::Process(error)
    }
}
