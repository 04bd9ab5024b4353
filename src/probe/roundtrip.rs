//! End-to-end toolchain probe.
//!
//! Compiles a small device-enumeration program with the CUDA compiler and
//! runs it. Passing this means the compiler, headers, runtime library and
//! driver all line up, which presence checks alone cannot show.
//!
//! Work happens in a private, uniquely named directory that is removed when
//! the probe returns, whatever path it returns by.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use crate::error::{DoctorError, Result};
use crate::shell::{self, CommandOptions};

use super::{Observation, Probe, ProbeId};

/// Source compiled by the probe.
pub const DEVICE_QUERY_SOURCE: &str = r#"#include <cstdio>
#include <cuda_runtime.h>

int main() {
    int count = 0;
    cudaError_t err = cudaGetDeviceCount(&count);
    if (err != cudaSuccess) {
        std::fprintf(stderr, "CUDA error: %s\n", cudaGetErrorString(err));
        return 1;
    }
    std::printf("Found %d CUDA device(s)\n", count);
    for (int dev = 0; dev < count; ++dev) {
        cudaDeviceProp prop;
        if (cudaGetDeviceProperties(&prop, dev) == cudaSuccess) {
            std::printf("Device %d: %s (compute %d.%d)\n", dev, prop.name, prop.major, prop.minor);
        }
    }
    return 0;
}
"#;

const SOURCE_NAME: &str = "device_query.cu";
const BINARY_STEM: &str = "device_query";

/// Compile-and-run probe.
pub struct RoundtripProbe {
    compiler: String,
    scratch_parent: Option<PathBuf>,
    timeout: Duration,
}

impl RoundtripProbe {
    pub fn new(compiler: &str, scratch_parent: Option<&Path>, timeout: Duration) -> Self {
        Self {
            compiler: compiler.to_string(),
            scratch_parent: scratch_parent.map(Path::to_path_buf),
            timeout,
        }
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("gpu-doctor-");
        let dir = match &self.scratch_parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        tracing::debug!(path = %dir.path().display(), "created scratch directory");
        Ok(dir)
    }

    fn compile(&self, workdir: &Path, source: &Path, binary: &Path) -> Option<Observation> {
        let args: Vec<OsString> = vec![
            source.as_os_str().to_os_string(),
            OsString::from("-o"),
            binary.as_os_str().to_os_string(),
        ];
        let options = CommandOptions {
            cwd: Some(workdir.to_path_buf()),
            timeout: Some(self.timeout),
        };
        match shell::run(&self.compiler, &args, &options) {
            Ok(output) if output.success => None,
            Ok(output) => Some(Observation::absent(format!(
                "compilation failed: {}",
                output.failure_text()
            ))),
            Err(DoctorError::CommandFailed { message, .. }) => Some(Observation::absent(format!(
                "compilation failed: `{}` could not be run: {}",
                self.compiler, message
            ))),
            Err(e) => Some(Observation::absent(format!("compilation failed: {}", e))),
        }
    }
}

impl Probe for RoundtripProbe {
    fn id(&self) -> ProbeId {
        ProbeId::RuntimeRoundtrip
    }

    fn description(&self) -> &str {
        "Compiling and running a CUDA device query"
    }

    fn run(&self) -> Result<Observation> {
        let scratch = self.scratch_dir()?;
        let source = scratch.path().join(SOURCE_NAME);
        fs::write(&source, DEVICE_QUERY_SOURCE)?;
        let binary = scratch
            .path()
            .join(format!("{}{}", BINARY_STEM, std::env::consts::EXE_SUFFIX));

        if let Some(failed) = self.compile(scratch.path(), &source, &binary) {
            return Ok(failed);
        }

        let options = CommandOptions {
            cwd: Some(scratch.path().to_path_buf()),
            timeout: Some(self.timeout),
        };
        let no_args: [&str; 0] = [];
        let observation = match shell::run(&binary, &no_args, &options) {
            Ok(output) if output.success => Observation::present(
                output
                    .stdout
                    .lines()
                    .next()
                    .unwrap_or("device query succeeded")
                    .trim()
                    .to_string(),
            ),
            Ok(output) => Observation::absent(format!("execution failed: {}", output.failure_text())),
            Err(e) => Observation::absent(format!("execution failed: {}", e)),
        };
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeResult;

    fn is_empty_dir(path: &Path) -> bool {
        fs::read_dir(path).unwrap().next().is_none()
    }

    #[test]
    fn source_enumerates_devices() {
        assert!(DEVICE_QUERY_SOURCE.contains("cudaGetDeviceCount"));
        assert!(DEVICE_QUERY_SOURCE.contains("return 1;"));
    }

    #[test]
    fn missing_compiler_is_absent_not_unknown() {
        let scratch = tempfile::TempDir::new().unwrap();
        let probe = RoundtripProbe::new(
            "/nonexistent/bin/nvcc",
            Some(scratch.path()),
            Duration::from_secs(5),
        );

        let observation = probe.run().unwrap();
        assert_eq!(observation.result, ProbeResult::Absent);
        assert!(observation.detail.starts_with("compilation failed"));
        assert!(is_empty_dir(scratch.path()));
    }

    #[test]
    fn unwritable_scratch_location_is_an_error() {
        let scratch = tempfile::TempDir::new().unwrap();
        let probe = RoundtripProbe::new(
            "nvcc",
            Some(&scratch.path().join("does/not/exist")),
            Duration::from_secs(5),
        );

        assert!(probe.run().is_err());
    }

    #[cfg(unix)]
    mod with_fake_compiler {
        use super::*;
        use crate::probe::testing::fake_tool_command;
        use tempfile::TempDir;

        /// Compiler stand-in: checks the source exists and writes an
        /// executable that prints `stdout_line` and exits with `code`.
        fn fake_compiler(dir: &Path, stdout_line: &str, code: i32) -> String {
            let body = format!(
                "[ -f \"$1\" ] || exit 2\nprintf '#!/bin/sh\\necho \"{}\"\\nexit {}\\n' > \"$3\"\nchmod +x \"$3\"",
                stdout_line, code
            );
            fake_tool_command(dir, "nvcc", &body)
        }

        #[test]
        fn compile_and_run_success_is_present() {
            let tools = TempDir::new().unwrap();
            let scratch = TempDir::new().unwrap();
            let compiler = fake_compiler(tools.path(), "Found 2 CUDA device(s)", 0);
            let probe = RoundtripProbe::new(&compiler, Some(scratch.path()), Duration::from_secs(10));

            let observation = probe.run().unwrap();
            assert_eq!(observation.result, ProbeResult::Present);
            assert_eq!(observation.detail, "Found 2 CUDA device(s)");
            assert!(is_empty_dir(scratch.path()));
        }

        #[test]
        fn failing_binary_is_absent() {
            let tools = TempDir::new().unwrap();
            let scratch = TempDir::new().unwrap();
            let compiler = fake_compiler(tools.path(), "CUDA error: no CUDA-capable device", 1);
            let probe = RoundtripProbe::new(&compiler, Some(scratch.path()), Duration::from_secs(10));

            let observation = probe.run().unwrap();
            assert_eq!(observation.result, ProbeResult::Absent);
            assert!(observation.detail.starts_with("execution failed"));
        }

        #[test]
        fn compiler_error_is_absent_and_cleans_up() {
            let tools = TempDir::new().unwrap();
            let scratch = TempDir::new().unwrap();
            let compiler = fake_tool_command(
                tools.path(),
                "nvcc",
                "echo 'fatal error: cuda_runtime.h: No such file or directory' >&2\nexit 1",
            );
            let probe = RoundtripProbe::new(&compiler, Some(scratch.path()), Duration::from_secs(10));

            let observation = probe.run().unwrap();
            assert_eq!(observation.result, ProbeResult::Absent);
            assert!(observation.detail.contains("cuda_runtime.h"));
            assert!(is_empty_dir(scratch.path()));
        }
    }
}
