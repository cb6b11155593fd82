use crate::error::{ConvertError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROJECT_FILE: &str = ".project";
pub const CPROJECT_FILE: &str = ".cproject";

/// A SW4STM32 project folder as generated by STM32CubeMX.
#[derive(Debug, Clone)]
pub struct ProjectLocation {
    pub root: PathBuf,
    /// Folder base name without extension, used as the Makefile `TARGET`.
    pub name: String,
}

impl ProjectLocation {
    pub fn resolve(path: &Path) -> Result<Self> {
        let invalid = || ConvertError::InvalidUsage {
            path: path.to_path_buf(),
        };
        let root = std::path::absolute(path).map_err(|_| invalid())?;
        if !root.is_dir() {
            return Err(invalid());
        }
        let name = match root.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            // `..` and friends have no stem until resolved.
            None => fs::canonicalize(&root)
                .ok()
                .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
                .ok_or_else(invalid)?,
        };

        let location = ProjectLocation { root, name };
        if !(location.project_file().is_file() && location.cproject_file().is_file()) {
            return Err(ConvertError::ProjectNotFound {
                path: location.root,
            });
        }
        debug!("Project {} at {}", location.name, location.root.display());
        Ok(location)
    }

    pub fn project_file(&self) -> PathBuf {
        self.root.join(PROJECT_FILE)
    }

    pub fn cproject_file(&self) -> PathBuf {
        self.root.join(CPROJECT_FILE)
    }
}
