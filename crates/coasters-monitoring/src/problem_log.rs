//! Append-only notifications log for problem alerts.

use std::path::{Path, PathBuf};

use chrono::DateTime;
use coasters_analysis::domain::reports::ProblemAlert;
use coasters_core::error::DomainError;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Appends one line per problem alert to a file.
#[derive(Debug, Clone)]
pub struct ProblemLog {
    path: PathBuf,
}

impl ProblemLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Formats `alert` as `[YYYY-MM-DD HH:MM:SS] Coaster <id> - Problem: <details>`.
    ///
    /// The timestamp is rendered in UTC.
    #[must_use]
    pub fn format_line(alert: &ProblemAlert) -> String {
        let at = DateTime::from_timestamp(alert.timestamp, 0).map_or_else(
            || alert.timestamp.to_string(),
            |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        format!(
            "[{at}] Coaster {} - Problem: {}",
            alert.coaster_id, alert.details
        )
    }

    /// Appends the formatted line for `alert`, creating the parent directory
    /// and the file as needed. Returns the line written, without newline.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the file cannot be written.
    pub async fn append(&self, alert: &ProblemAlert) -> Result<String, DomainError> {
        let line = Self::format_line(alert);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(&self.path, &e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| io_error(&self.path, &e))?;
        file.write_all(format!("{line}\n").as_bytes())
            .await
            .map_err(|e| io_error(&self.path, &e))?;
        file.flush().await.map_err(|e| io_error(&self.path, &e))?;

        Ok(line)
    }
}

fn io_error(path: &Path, error: &std::io::Error) -> DomainError {
    DomainError::Infrastructure(format!("{}: {error}", path.display()))
}
