use anyhow::{Context, Result};
use cesgraph::model::{Distinction, Relation, Universe};
use cesgraph::synth::SynthCes;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Input document: universe labels plus precomputed distinctions and relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDoc {
    pub labels: Universe,
    pub distinctions: Vec<Distinction>,
    pub relations: Vec<Relation>,
}

impl InputDoc {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }
}

impl From<SynthCes> for InputDoc {
    fn from(s: SynthCes) -> Self {
        Self {
            labels: s.universe,
            distinctions: s.distinctions,
            relations: s.relations,
        }
    }
}

/// Pretty-print `value` to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
