//! Remediation blocks.
//!
//! A block is a titled list of literal commands. Nothing here runs them;
//! they are printed for the user to copy.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::DoctorConfig;
use crate::probe::Framework;
use crate::shell::ShellType;

const CUDA_KEYRING_URL: &str =
    "https://developer.download.nvidia.com/compute/cuda/repos/ubuntu2204/x86_64/cuda-keyring_1.1-1_all.deb";

/// What a block fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "framework", rename_all = "snake_case")]
pub enum RemedyKind {
    DriverRepair,
    ToolkitInstall,
    ToolkitPath,
    FrameworkInstall(Framework),
    AllClear,
}

/// A titled group of commands addressing one problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationBlock {
    #[serde(flatten)]
    pub kind: RemedyKind,
    pub title: String,
    pub commands: Vec<String>,
}

impl RemediationBlock {
    pub fn new(kind: RemedyKind, title: impl Into<String>, commands: Vec<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            commands,
        }
    }

    pub fn driver_repair() -> Self {
        Self::new(
            RemedyKind::DriverRepair,
            "Install or repair the NVIDIA driver",
            vec![
                "lspci | grep -i nvidia".to_string(),
                "sudo ubuntu-drivers autoinstall".to_string(),
                "sudo reboot".to_string(),
            ],
        )
    }

    pub fn toolkit_install(ctx: &RemedyContext) -> Self {
        let mut commands = vec![
            format!("wget {}", CUDA_KEYRING_URL),
            "sudo dpkg -i cuda-keyring_1.1-1_all.deb".to_string(),
            "sudo apt-get update".to_string(),
            "sudo apt-get -y install cuda-toolkit".to_string(),
        ];
        commands.extend(ctx.environment_commands());
        Self::new(RemedyKind::ToolkitInstall, "Install the CUDA toolkit", commands)
    }

    pub fn toolkit_path(ctx: &RemedyContext) -> Self {
        Self::new(
            RemedyKind::ToolkitPath,
            format!(
                "Add the CUDA toolkit at {} to your environment",
                ctx.toolkit_dir.display()
            ),
            ctx.environment_commands(),
        )
    }

    pub fn framework_install(ctx: &RemedyContext, framework: Framework) -> Self {
        Self::new(
            RemedyKind::FrameworkInstall(framework),
            format!("Install {} with CUDA support", framework.display_name()),
            ctx.install_commands(framework).to_vec(),
        )
    }

    pub fn all_clear() -> Self {
        Self::new(RemedyKind::AllClear, "All components verified", Vec::new())
    }

    pub fn is_all_clear(&self) -> bool {
        self.kind == RemedyKind::AllClear
    }
}

/// Configuration-derived values the blocks interpolate.
#[derive(Debug, Clone)]
pub struct RemedyContext {
    pub toolkit_dir: PathBuf,
    pub shell: ShellType,
    pub torch_install: Vec<String>,
    pub tensorflow_install: Vec<String>,
}

impl RemedyContext {
    pub fn from_config(config: &DoctorConfig, shell: ShellType) -> Self {
        Self {
            toolkit_dir: config.toolkit_dir.clone(),
            shell,
            torch_install: config.frameworks.torch.install.clone(),
            tensorflow_install: config.frameworks.tensorflow.install.clone(),
        }
    }

    pub fn install_commands(&self, framework: Framework) -> &[String] {
        match framework {
            Framework::Torch => &self.torch_install,
            Framework::Tensorflow => &self.tensorflow_install,
        }
    }

    /// Commands that put the toolkit's binaries and libraries on the
    /// search paths and persist that in the shell's startup file.
    fn environment_commands(&self) -> Vec<String> {
        let root = self.toolkit_dir.display().to_string();
        let bin = format!("{}/bin", root.trim_end_matches('/'));
        let lib = format!("{}/lib64", root.trim_end_matches('/'));
        let rc = self.shell.rc_file();
        vec![
            format!(
                "echo '{}' >> {}",
                self.shell.prepend_path("PATH", &bin),
                rc
            ),
            format!(
                "echo '{}' >> {}",
                self.shell.prepend_path("LD_LIBRARY_PATH", &lib),
                rc
            ),
            format!("source {}", rc),
        ]
    }
}

impl Default for RemedyContext {
    fn default() -> Self {
        Self::from_config(&DoctorConfig::default(), ShellType::Bash)
    }
}
