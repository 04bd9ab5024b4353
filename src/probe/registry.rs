//! Probe registry.
//!
//! Holds the ordered list of probes for one run. Registration order is the
//! order probes execute in and the order they appear in the report.

use crate::config::DoctorConfig;

use super::{
    AnyPathProbe, CommandProbe, DirectoryProbe, Framework, FrameworkProbe, Probe, ProbeId,
    RoundtripProbe,
};

/// Ordered set of probes, at most one per [`ProbeId`].
#[derive(Default)]
pub struct ProbeRegistry {
    probes: Vec<Box<dyn Probe>>,
}

impl ProbeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard probe set, configured from `config`.
    pub fn from_config(config: &DoctorConfig) -> Self {
        let timeout = config.timeout();
        let mut registry = Self::new();

        registry.register(Box::new(CommandProbe::driver(&config.driver, timeout)));
        registry.register(Box::new(CommandProbe::compiler(&config.compiler, timeout)));
        registry.register(Box::new(DirectoryProbe::toolkit(&config.toolkit_dir)));
        registry.register(Box::new(AnyPathProbe::libraries(&config.library_paths)));
        registry.register(Box::new(RoundtripProbe::new(
            &config.compiler.command,
            config.scratch_dir.as_deref(),
            timeout,
        )));
        for framework in Framework::ALL {
            registry.register(Box::new(FrameworkProbe::new(
                framework,
                &config.python,
                timeout,
            )));
        }

        registry
    }

    /// Add a probe. A probe with an already registered id replaces the
    /// earlier one in place.
    pub fn register(&mut self, probe: Box<dyn Probe>) {
        match self.probes.iter().position(|p| p.id() == probe.id()) {
            Some(index) => self.probes[index] = probe,
            None => self.probes.push(probe),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Probe> {
        self.probes.iter().map(|p| &**p)
    }

    /// Registered ids in order.
    pub fn ids(&self) -> Vec<ProbeId> {
        self.probes.iter().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}
