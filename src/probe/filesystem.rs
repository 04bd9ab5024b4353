//! Path existence probes.
//!
//! These never report `Unknown`: a path either exists or it does not.

use std::path::{Path, PathBuf};

use crate::error::Result;

use super::{Observation, Probe, ProbeId};

/// `Present` iff a directory exists.
pub struct DirectoryProbe {
    id: ProbeId,
    description: String,
    path: PathBuf,
}

impl DirectoryProbe {
    pub fn new(id: ProbeId, path: &Path) -> Self {
        Self {
            id,
            description: format!("Checking {}", path.display()),
            path: path.to_path_buf(),
        }
    }

    /// The CUDA toolkit installation directory.
    pub fn toolkit(path: &Path) -> Self {
        Self::new(ProbeId::ToolkitDirPresent, path)
    }
}

impl Probe for DirectoryProbe {
    fn id(&self) -> ProbeId {
        self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self) -> Result<Observation> {
        let shown = self.path.display();
        Ok(if self.path.is_dir() {
            Observation::present(format!("{} exists", shown))
        } else if self.path.exists() {
            Observation::absent(format!("{} exists but is not a directory", shown))
        } else {
            Observation::absent(format!("{} not found", shown))
        })
    }
}

/// `Present` iff at least one of the listed paths exists.
pub struct AnyPathProbe {
    id: ProbeId,
    description: String,
    paths: Vec<PathBuf>,
}

impl AnyPathProbe {
    pub fn new(id: ProbeId, description: &str, paths: Vec<PathBuf>) -> Self {
        Self {
            id,
            description: description.to_string(),
            paths,
        }
    }

    /// Well-known CUDA shared libraries.
    pub fn libraries(paths: &[PathBuf]) -> Self {
        Self::new(
            ProbeId::LibrariesPresent,
            "Checking CUDA shared libraries",
            paths.to_vec(),
        )
    }
}

impl Probe for AnyPathProbe {
    fn id(&self) -> ProbeId {
        self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self) -> Result<Observation> {
        if let Some(found) = self.paths.iter().find(|p| p.exists()) {
            return Ok(Observation::present(format!("found {}", found.display())));
        }
        let checked = self
            .paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(Observation::absent(format!("none of: {}", checked)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeResult;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn existing_directory_is_present() {
        let temp = TempDir::new().unwrap();
        let cuda = temp.path().join("cuda");
        fs::create_dir(&cuda).unwrap();

        let observation = DirectoryProbe::toolkit(&cuda).run().unwrap();
        assert_eq!(observation.result, ProbeResult::Present);
    }

    #[test]
    fn missing_directory_is_absent() {
        let temp = TempDir::new().unwrap();
        let observation = DirectoryProbe::toolkit(&temp.path().join("cuda"))
            .run()
            .unwrap();
        assert_eq!(observation.result, ProbeResult::Absent);
        assert!(observation.detail.ends_with("not found"));
    }

    #[test]
    fn file_in_place_of_directory_is_absent() {
        let temp = TempDir::new().unwrap();
        let cuda = temp.path().join("cuda");
        fs::write(&cuda, "").unwrap();

        let observation = DirectoryProbe::toolkit(&cuda).run().unwrap();
        assert_eq!(observation.result, ProbeResult::Absent);
        assert!(observation.detail.contains("not a directory"));
    }

    #[test]
    fn any_one_library_is_enough() {
        let temp = TempDir::new().unwrap();
        let present = temp.path().join("libcuda.so");
        fs::write(&present, "").unwrap();
        let paths = vec![temp.path().join("libcudart.so"), present.clone()];

        let observation = AnyPathProbe::libraries(&paths).run().unwrap();
        assert_eq!(observation.result, ProbeResult::Present);
        assert!(observation.detail.contains(&present.display().to_string()));
    }

    #[test]
    fn no_library_is_absent_and_lists_paths() {
        let temp = TempDir::new().unwrap();
        let paths = vec![temp.path().join("a.so"), temp.path().join("b.so")];

        let observation = AnyPathProbe::libraries(&paths).run().unwrap();
        assert_eq!(observation.result, ProbeResult::Absent);
        assert!(observation.detail.contains("a.so"));
        assert!(observation.detail.contains("b.so"));
    }

    #[test]
    fn path_probes_are_idempotent() {
        let temp = TempDir::new().unwrap();
        let probe = DirectoryProbe::toolkit(temp.path());
        assert_eq!(probe.run().unwrap(), probe.run().unwrap());
    }
}
