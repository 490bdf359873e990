use std::path::{Path, PathBuf};

use crate::fetch::FetchSettings;

#[derive(Debug, Clone)]
pub struct HarvesterConfig {
    /// Directory thread files are written into.
    pub raw_dir: PathBuf,
    pub fetch: FetchSettings,
}

impl HarvesterConfig {
    pub fn default_with_output(raw_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            fetch: FetchSettings::default(),
        }
    }

    /// Uses `<base_dir>/transcript/raw` as the raw directory.
    pub fn from_base_dir(base_dir: &Path) -> Self {
        Self::default_with_output(base_dir.join("transcript").join("raw"))
    }
}
