//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::debug;

use super::Planner;
use crate::error::{FootholdError, Result};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
}

impl PlannerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG data directory:
    /// `$XDG_DATA_HOME/foothold/foothold.db` or
    /// `~/.local/share/foothold/foothold.db`.
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the planner, creating the database file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `FootholdError::FileSystem` if the parent directory cannot be
    /// created, `FootholdError::XdgDirectory` if no default location can be
    /// determined and `FootholdError::Database` if initialization fails.
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| FootholdError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let planner = Planner::new(canonical_path(db_path)?);
        planner.with_db(|_| Ok(())).await?;
        debug!("Opened plan store at {}", planner.db_path.display());

        Ok(planner)
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("foothold")
            .place_data_file("foothold.db")
            .map_err(|e| FootholdError::XdgDirectory(e.to_string()))
    }
}

/// Resolves the parent directory so every spelling of a path names the same
/// database file.
fn canonical_path(db_path: PathBuf) -> Result<PathBuf> {
    let Some(file_name) = db_path.file_name() else {
        return Ok(db_path);
    };
    let parent = match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let parent = std::fs::canonicalize(parent).map_err(|e| FootholdError::FileSystem {
        path: parent.to_path_buf(),
        source: e,
    })?;
    Ok(parent.join(file_name))
}
