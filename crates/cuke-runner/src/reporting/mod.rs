//! Discovery reports written by runner plugins.

pub mod json;

use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::RunnerError;
use crate::tree::FeatureNode;

/// An opened `json:` plugin destination.
///
/// Every [`write`](Self::write) replaces the file contents, so the file
/// always holds exactly one report.
#[derive(Debug)]
pub struct JsonReporter {
    path: PathBuf,
    file: File,
}

impl JsonReporter {
    /// Create (or truncate) the report file, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Report`] when the file cannot be created.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, RunnerError> {
        let path = path.into();
        let report_err = |source| RunnerError::Report {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(report_err)?;
        }
        let file = File::create(&path).map_err(report_err)?;
        debug!("opened json report {}", path.display());
        Ok(Self { path, file })
    }

    /// Destination of the report.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the report with one for `features`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Serialise`] or [`RunnerError::Report`].
    pub fn write(&mut self, features: &[FeatureNode]) -> Result<(), RunnerError> {
        let report_err = |source| RunnerError::Report {
            path: self.path.clone(),
            source,
        };
        self.file.set_len(0).map_err(report_err)?;
        self.file.rewind().map_err(report_err)?;
        let mut writer = BufWriter::new(&self.file);
        json::write(&mut writer, features)?;
        writer.flush().map_err(report_err)
    }

    /// Close and delete the report file.
    pub fn discard(self) {
        let Self { path, file } = self;
        drop(file);
        if let Err(err) = fs::remove_file(&path) {
            warn!("could not remove report {}: {err}", path.display());
        }
    }
}
