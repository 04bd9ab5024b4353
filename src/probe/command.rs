//! Probes that run an executable and check its exit status.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

use crate::config::{CompilerConfig, DriverConfig};
use crate::error::{DoctorError, Result};
use crate::shell::{self, CommandOptions};

use super::{Observation, Probe, ProbeId};

static DRIVER_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Driver Version:\s*([0-9][0-9.]*)").unwrap());
static DRIVER_CUDA_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CUDA Version:\s*([0-9][0-9.]*)").unwrap());
static COMPILER_RELEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"release\s+([0-9]+\.[0-9]+)").unwrap());

/// `Present` iff the executable is found and exits zero.
pub struct CommandProbe {
    id: ProbeId,
    description: String,
    program: String,
    args: Vec<String>,
    timeout: Duration,
    summarize: fn(&str) -> String,
}

impl CommandProbe {
    /// Generic command probe with first-line output summaries.
    pub fn new(id: ProbeId, description: &str, program: &str, args: Vec<String>) -> Self {
        Self {
            id,
            description: description.to_string(),
            program: program.to_string(),
            args,
            timeout: Duration::from_secs(120),
            summarize: first_line,
        }
    }

    /// The driver status tool, run without arguments by default.
    pub fn driver(config: &DriverConfig, timeout: Duration) -> Self {
        Self {
            summarize: summarize_driver,
            ..Self::new(
                ProbeId::DriverPresent,
                &format!("Checking driver ({})", config.command),
                &config.command,
                config.args.clone(),
            )
        }
        .with_timeout(timeout)
    }

    /// The compiler, run with its version flag.
    pub fn compiler(config: &CompilerConfig, timeout: Duration) -> Self {
        Self {
            summarize: summarize_compiler,
            ..Self::new(
                ProbeId::CompilerPresent,
                &format!("Checking compiler ({} {})", config.command, config.version_flag),
                &config.command,
                vec![config.version_flag.clone()],
            )
        }
        .with_timeout(timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Probe for CommandProbe {
    fn id(&self) -> ProbeId {
        self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self) -> Result<Observation> {
        let options = CommandOptions::with_timeout(Some(self.timeout));
        let observation = match shell::run(&self.program, &self.args, &options) {
            Ok(output) if output.success => Observation::present((self.summarize)(&output.combined())),
            Ok(output) => Observation::absent(output.failure_text()),
            Err(DoctorError::CommandFailed { .. }) if shell::find_executable(&self.program).is_none() => {
                Observation::absent(format!("`{}` not found in PATH", self.program))
            }
            Err(e) => Observation::absent(e.to_string()),
        };
        Ok(observation)
    }
}

fn first_line(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("exited with code 0")
        .to_string()
}

fn summarize_driver(output: &str) -> String {
    let driver = DRIVER_VERSION.captures(output).map(|c| c[1].to_string());
    let cuda = DRIVER_CUDA_VERSION.captures(output).map(|c| c[1].to_string());
    match (driver, cuda) {
        (Some(d), Some(c)) => format!("driver {}, CUDA {}", d, c),
        (Some(d), None) => format!("driver {}", d),
        (None, Some(c)) => format!("CUDA {}", c),
        (None, None) => first_line(output),
    }
}

fn summarize_compiler(output: &str) -> String {
    COMPILER_RELEASE
        .captures(output)
        .map(|c| format!("release {}", &c[1]))
        .unwrap_or_else(|| first_line(output))
}
