//! Integration tests for the gpu-doctor binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Config where every tool and path points into a directory that does
/// not exist, so every probe fails quickly.
fn broken_config(dir: &Path) -> String {
    let m = dir.join("missing");
    format!(
        r#"driver:
  command: {m}/nvidia-smi
compiler:
  command: {m}/nvcc
toolkit_dir: {m}/cuda
library_paths:
  - {m}/libcudart.so
python: {m}/python3
timeout_secs: 10
scratch_dir: {d}
"#,
        m = m.display(),
        d = dir.display()
    )
}

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("gpu-doctor.yml"), config).unwrap();
    temp
}

fn gpu_doctor(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("gpu-doctor"));
    cmd.current_dir(dir);
    cmd.env_remove("GPU_DOCTOR_CONFIG");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    gpu_doctor(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Diagnose the NVIDIA driver"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    gpu_doctor(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_lists_probes_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = gpu_doctor(temp.path()).arg("probes").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let ids: Vec<_> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(
        ids,
        vec![
            "driver_present",
            "compiler_present",
            "toolkit_dir_present",
            "libraries_present",
            "runtime_roundtrip",
            "torch_cuda",
            "tensorflow_cuda"
        ]
    );
    Ok(())
}

#[test]
fn cli_no_args_on_broken_machine_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let project = setup_project(&broken_config(temp.path()));
    gpu_doctor(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("driver_present"))
        .stdout(predicate::str::contains("NOT-OK"))
        .stdout(predicate::str::contains("NOT-TESTED"))
        .stdout(predicate::str::contains("Install or repair the NVIDIA driver"))
        .stdout(predicate::str::contains("Install the CUDA toolkit"))
        .stdout(predicate::str::contains("All components verified").not());
    Ok(())
}

#[test]
fn cli_check_json_lists_every_block() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config_path = temp.path().join("doctor.yml");
    fs::write(&config_path, broken_config(temp.path()))?;

    let output = gpu_doctor(temp.path())
        .args(["check", "--json", "--config"])
        .arg(&config_path)
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let probes = value["probes"].as_array().unwrap();
    assert_eq!(probes.len(), 7);
    assert_eq!(probes[0]["name"], "driver_present");
    assert_eq!(probes[0]["result"], "absent");
    assert_eq!(probes[5]["result"], "unknown");

    let kinds: Vec<_> = value["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "driver_repair",
            "toolkit_install",
            "framework_install",
            "framework_install"
        ]
    );
    assert_eq!(value["recommendations"][2]["framework"], "torch");
    assert_eq!(value["recommendations"][3]["framework"], "tensorflow");
    Ok(())
}

#[test]
fn cli_config_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config_path = temp.path().join("doctor.yml");
    fs::write(&config_path, "driver:\n  command: /opt/bin/custom-smi\n")?;

    gpu_doctor(temp.path())
        .env("GPU_DOCTOR_CONFIG", &config_path)
        .arg("probes")
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/bin/custom-smi"));
    Ok(())
}

#[test]
fn cli_missing_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    gpu_doctor(temp.path())
        .args(["check", "--config", "does-not-exist.yml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_invalid_config_fails_with_every_error() -> Result<(), Box<dyn std::error::Error>> {
    let project = setup_project("python: \"\"\ntimeout_secs: 0\nlibrary_paths: []\n");
    gpu_doctor(project.path())
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("python"))
        .stderr(predicate::str::contains("timeout_secs"))
        .stderr(predicate::str::contains("library_paths"));
    Ok(())
}

#[test]
fn cli_unknown_config_key_fails() -> Result<(), Box<dyn std::error::Error>> {
    let project = setup_project("driverr:\n  command: nvidia-smi\n");
    gpu_doctor(project.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_generates_completions() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    gpu_doctor(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gpu-doctor"));
    Ok(())
}

#[test]
fn cli_quiet_hides_progress() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let project = setup_project(&broken_config(temp.path()));
    gpu_doctor(project.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/7]").not())
        .stdout(predicate::str::contains("Recommendations"));
    Ok(())
}

#[test]
fn cli_verbose_shows_detail() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let project = setup_project(&broken_config(temp.path()));
    gpu_doctor(project.path())
        .args(["check", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compilation failed"))
        .stdout(predicate::str::contains("Using configuration from"));
    Ok(())
}
