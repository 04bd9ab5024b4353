//! Fake executables for probe tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable `sh` script named `name` into `dir`.
pub(crate) fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Path string for a fake tool, as it would appear in config.
pub(crate) fn fake_tool_command(dir: &Path, name: &str, body: &str) -> String {
    fake_tool(dir, name, body).to_string_lossy().to_string()
}
