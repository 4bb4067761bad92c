//! Unit manifest: the declarations a harness collected for one run.
use std::{fs, io::Read, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tagsel_core::{Declaration, UnitRegistry};
use tracing::debug;

/// On-disk shape: `{"units": [{"id": ..., "parents": [...], "tags": [...]}]}`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub units: Vec<Declaration>,
}

impl Manifest {
    /// Read a manifest from `path`, or stdin when `path` is `-`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read manifest from stdin")?;
            buf
        } else {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read manifest {}", path.display()))?
        };

        let manifest: Manifest =
            serde_json::from_str(&raw).context("manifest is not valid JSON")?;
        debug!(units = manifest.units.len(), "manifest loaded");
        Ok(manifest)
    }

    /// Declare every unit in manifest order.
    pub fn into_registry(self) -> anyhow::Result<UnitRegistry> {
        let mut registry = UnitRegistry::new();
        registry
            .declare_all(self.units)
            .context("invalid unit declaration")?;
        Ok(registry)
    }
}
