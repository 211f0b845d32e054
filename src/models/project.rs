//! Project layout as seen by the adapter
//!
//! The host build model owns the project. The adapter only needs to know
//! where its spec sources live: `<base>/<source_dir>/<bdd_dir>/<lang>`.

use std::path::{Path, PathBuf};

/// Default source directory under the project base
pub const SOURCE_DIR: &str = "src";

/// Default BDD directory under the source directory
pub const BDD_DIR: &str = "spec";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub base_dir: PathBuf,
    pub source_dir: String,
    pub bdd_dir: String,
}

impl Project {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let name = base_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());

        Self {
            name,
            base_dir,
            source_dir: SOURCE_DIR.to_string(),
            bdd_dir: BDD_DIR.to_string(),
        }
    }

    pub fn with_source_dir(mut self, dir: impl Into<String>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_bdd_dir(mut self, dir: impl Into<String>) -> Self {
        self.bdd_dir = dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Root of the spec sources for a language, e.g. `src/spec/scala`
    pub fn spec_root(&self, lang: &str) -> PathBuf {
        self.base_dir
            .join(&self.source_dir)
            .join(&self.bdd_dir)
            .join(lang)
    }
}
