//! Optional ML framework probes.
//!
//! Each probe runs the Python interpreter with a short script that imports
//! the binding and counts accelerators. The script exits with
//! [`NOT_INSTALLED_EXIT`] when the import fails, which is reported as
//! `Unknown` rather than `Absent`: the binding is missing, not broken.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::{DoctorError, Result};
use crate::shell::{self, CommandOptions};

use super::{Observation, Probe, ProbeId};

/// Exit code the probe scripts use for a failed import.
pub const NOT_INSTALLED_EXIT: i32 = 3;

const TORCH_SCRIPT: &str = r#"import sys
try:
    import torch
except ImportError:
    sys.exit(3)
if not torch.cuda.is_available():
    print("torch " + torch.__version__ + ": CUDA not available")
    sys.exit(1)
count = torch.cuda.device_count()
print("torch " + torch.__version__ + ": " + str(count) + " device(s), " + torch.cuda.get_device_name(0))
"#;

const TENSORFLOW_SCRIPT: &str = r#"import os, sys
os.environ.setdefault("TF_CPP_MIN_LOG_LEVEL", "3")
try:
    import tensorflow as tf
except ImportError:
    sys.exit(3)
gpus = tf.config.list_physical_devices("GPU")
print("tensorflow " + tf.__version__ + ": " + str(len(gpus)) + " GPU device(s)")
sys.exit(0 if gpus else 1)
"#;

/// Supported framework bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    Torch,
    Tensorflow,
}

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::Torch, Framework::Tensorflow];

    pub fn probe_id(&self) -> ProbeId {
        match self {
            Framework::Torch => ProbeId::TorchCuda,
            Framework::Tensorflow => ProbeId::TensorflowCuda,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::Torch => "PyTorch",
            Framework::Tensorflow => "TensorFlow",
        }
    }

    /// Python module imported by the probe.
    pub fn module(&self) -> &'static str {
        match self {
            Framework::Torch => "torch",
            Framework::Tensorflow => "tensorflow",
        }
    }

    fn script(&self) -> &'static str {
        match self {
            Framework::Torch => TORCH_SCRIPT,
            Framework::Tensorflow => TENSORFLOW_SCRIPT,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Probe for one framework binding.
pub struct FrameworkProbe {
    framework: Framework,
    python: String,
    timeout: Duration,
    description: String,
}

impl FrameworkProbe {
    pub fn new(framework: Framework, python: &str, timeout: Duration) -> Self {
        Self {
            framework,
            python: python.to_string(),
            timeout,
            description: format!("Checking {} CUDA support", framework.display_name()),
        }
    }
}

impl Probe for FrameworkProbe {
    fn id(&self) -> ProbeId {
        self.framework.probe_id()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self) -> Result<Observation> {
        let module = self.framework.module();
        let options = CommandOptions::with_timeout(Some(self.timeout));
        let observation = match shell::run(&self.python, &["-c", self.framework.script()], &options) {
            Ok(output) if output.exit_code == Some(NOT_INSTALLED_EXIT) => {
                Observation::unknown(format!("{} is not installed", module))
            }
            Ok(output) if output.success => Observation::present(output.stdout.trim().to_string()),
            Ok(output) if !output.stdout.trim().is_empty() => {
                Observation::absent(output.stdout.trim().to_string())
            }
            Ok(output) => Observation::absent(output.failure_text()),
            Err(DoctorError::CommandFailed { .. }) => Observation::unknown(format!(
                "`{}` not available; cannot import {}",
                self.python, module
            )),
            Err(e) => Observation::absent(e.to_string()),
        };
        Ok(observation)
    }
}
