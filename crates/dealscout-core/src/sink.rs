//! Report persistence.

use std::path::{Path, PathBuf};

use crate::report::Report;
use crate::CoreError;

/// Accepts a finished [`Report`] and stores it somewhere.
pub trait ReportSink {
    /// Persists `report`, returning where it was written.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the report cannot be serialized or stored.
    fn persist(&self, report: &Report) -> Result<PathBuf, CoreError>;
}

/// Writes each report as `{directory}/{title}.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    directory: PathBuf,
}

impl JsonFileSink {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn report_path(&self, title: &str) -> PathBuf {
        // Path separators in a title would escape the output directory.
        let stem: String = title
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.directory.join(format!("{stem}.json"))
    }
}

impl ReportSink for JsonFileSink {
    fn persist(&self, report: &Report) -> Result<PathBuf, CoreError> {
        let path = self.report_path(&report.title);
        let io_err = |source| CoreError::ReportIo {
            path: path.display().to_string(),
            source,
        };

        std::fs::create_dir_all(&self.directory).map_err(io_err)?;
        let body = serde_json::to_string(report)?;
        std::fs::write(&path, body).map_err(io_err)?;

        tracing::info!(path = %path.display(), products = report.products.len(), "report written");
        Ok(path)
    }
}
