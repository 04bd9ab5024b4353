//! External program execution.
//!
//! Probes run programs directly (no intermediate shell) so that a missing
//! executable is reported as a spawn failure rather than a shell exit code.

use crate::error::{DoctorError, Result};
use std::ffi::OsStr;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Result of running an external program to completion.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program exited with code 0.
    pub success: bool,
}

impl CommandOutput {
    fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: status.code(),
            stdout,
            stderr,
            duration,
            success: status.success(),
        }
    }

    /// Stdout followed by stderr, trimmed.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.trim_end().to_string();
        let stderr = self.stderr.trim_end();
        if !stderr.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stderr);
        }
        text
    }

    /// Human-readable description of a failed run.
    pub fn failure_text(&self) -> String {
        let status = match self.exit_code {
            Some(code) => format!("exited with code {}", code),
            None => "terminated by signal".to_string(),
        };
        let output = self.combined();
        if output.is_empty() {
            status
        } else {
            format!("{}: {}", status, output)
        }
    }
}

/// Options for program execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Wall-clock limit; the child is killed when exceeded (None = wait forever).
    pub timeout: Option<Duration>,
}

impl CommandOptions {
    /// Options with a timeout and no working directory override.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { cwd: None, timeout }
    }
}

/// Run `program` with `args`, capturing output.
///
/// Returns `Err(CommandFailed)` if the program cannot be started and
/// `Err(CommandTimedOut)` if it outlives `options.timeout`. A non-zero
/// exit is reported through [`CommandOutput::success`], not as an error.
pub fn run<P, S>(program: P, args: &[S], options: &CommandOptions) -> Result<CommandOutput>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let command_line = display_command(program, args);
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    tracing::debug!(command = %command_line, "spawning");
    let mut child = spawn(&mut cmd).map_err(|e| DoctorError::CommandFailed {
        command: command_line.clone(),
        message: e.to_string(),
    })?;

    let stdout = child.stdout.take().map(read_pipe);
    let stderr = child.stderr.take().map(read_pipe);

    let status = match options.timeout {
        Some(limit) => wait_with_timeout(&mut child, limit)?,
        None => Some(child.wait()?),
    };

    let Some(status) = status else {
        // Grandchildren may still hold the pipes open, so the reader
        // threads are left detached instead of joined.
        let _ = child.kill();
        let _ = child.wait();
        let seconds = options.timeout.map(|t| t.as_secs()).unwrap_or_default();
        tracing::warn!(command = %command_line, seconds, "command timed out");
        return Err(DoctorError::CommandTimedOut {
            command: command_line,
            seconds,
        });
    };

    let stdout = join_pipe(stdout);
    let stderr = join_pipe(stderr);
    let output = CommandOutput::from_status(status, stdout, stderr, start.elapsed());
    tracing::debug!(
        command = %command_line,
        exit_code = ?output.exit_code,
        elapsed_ms = output.duration.as_millis() as u64,
        "command finished"
    );
    Ok(output)
}

/// Render a program and its arguments for messages and logs.
pub fn display_command<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> String {
    let mut parts = vec![program.to_string_lossy().to_string()];
    parts.extend(args.iter().map(|a| a.as_ref().to_string_lossy().to_string()));
    parts.join(" ")
}

/// Spawn, tolerating ETXTBSY on an executable that was just written.
#[cfg(unix)]
fn spawn(cmd: &mut Command) -> std::io::Result<Child> {
    const BUSY_RETRIES: u32 = 5;
    let mut attempts = 0;
    loop {
        match cmd.spawn() {
            Err(e) if e.raw_os_error() == Some(libc::ETXTBSY) && attempts < BUSY_RETRIES => {
                attempts += 1;
                thread::sleep(POLL_INTERVAL);
            }
            other => return other,
        }
    }
}

#[cfg(not(unix))]
fn spawn(cmd: &mut Command) -> std::io::Result<Child> {
    cmd.spawn()
}

fn read_pipe<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn join_pipe(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).to_string())
        .unwrap_or_default()
}

/// Poll until the child exits or `limit` elapses. A limit past the end of
/// the clock waits without a deadline.
fn wait_with_timeout(child: &mut Child, limit: Duration) -> Result<Option<ExitStatus>> {
    let Some(deadline) = Instant::now().checked_add(limit) else {
        return Ok(Some(child.wait()?));
    };
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {}
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e.into());
            }
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Result<CommandOutput> {
        run("/bin/sh", &["-c", script], &CommandOptions::default())
    }

    #[test]
    fn run_successful_command() {
        let result = sh("echo hello").unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn run_failing_command() {
        let result = sh("echo broken >&2; exit 4").unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(4));
        assert!(result.stderr.contains("broken"));
    }

    #[test]
    fn run_missing_program_is_command_failed() {
        let err = run(
            "/nonexistent/gpu-doctor-missing-tool",
            &["--version"],
            &CommandOptions::default(),
        )
        .unwrap_err();

        match err {
            DoctorError::CommandFailed { command, .. } => {
                assert!(command.contains("gpu-doctor-missing-tool --version"));
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn run_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let result = run("/bin/sh", &["-c", "pwd"], &options).unwrap();

        assert!(result.success);
        let expected = temp.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(result.stdout.contains(&expected));
    }

    #[test]
    fn timeout_kills_long_running_command() {
        let options = CommandOptions::with_timeout(Some(Duration::from_millis(200)));
        let start = Instant::now();

        let err = run("/bin/sh", &["-c", "exec sleep 10"], &options).unwrap_err();

        assert!(matches!(err, DoctorError::CommandTimedOut { .. }));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn timeout_not_hit_by_fast_command() {
        let options = CommandOptions::with_timeout(Some(Duration::from_secs(10)));
        let result = run("/bin/sh", &["-c", "echo fast"], &options).unwrap();
        assert!(result.success);
    }

    #[test]
    fn unbounded_timeout_waits_for_exit() {
        let options = CommandOptions::with_timeout(Some(Duration::MAX));
        let result = run("/bin/sh", &["-c", "echo done"], &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("done"));
    }

    #[test]
    fn failure_text_includes_code_and_output() {
        let result = sh("echo 'NVIDIA-SMI has failed' >&2; exit 9").unwrap();
        let text = result.failure_text();
        assert!(text.contains("exited with code 9"));
        assert!(text.contains("NVIDIA-SMI has failed"));
    }

    #[test]
    fn combined_joins_streams() {
        let result = sh("echo out; echo err >&2").unwrap();
        assert_eq!(result.combined(), "out\nerr");
    }

    #[test]
    fn display_command_joins_args() {
        let shown = display_command(OsStr::new("nvcc"), &["probe.cu", "-o", "probe"]);
        assert_eq!(shown, "nvcc probe.cu -o probe");
    }
}
