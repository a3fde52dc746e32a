//! Output artifact persistence.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{AppError, artifact_basename};
use crate::services::assembler::AssembledEmail;

/// Paths of the two files one run produces.
#[derive(Debug, Clone)]
pub struct WrittenArtifacts {
    pub html_path: PathBuf,
    pub text_path: PathBuf,
}

/// Write the HTML and plain-text artifacts as siblings under `out_dir`,
/// creating the directory as needed.
pub fn write_artifacts(
    out_dir: &Path,
    subject: &str,
    started_at: DateTime<Utc>,
    email: &AssembledEmail,
) -> Result<WrittenArtifacts, AppError> {
    std::fs::create_dir_all(out_dir)?;

    let basename = artifact_basename(subject, started_at);
    let html_path = out_dir.join(format!("{}.html", basename));
    let text_path = out_dir.join(format!("{}.txt", basename));

    std::fs::write(&html_path, &email.html)?;
    std::fs::write(&text_path, &email.text)?;

    Ok(WrittenArtifacts { html_path, text_path })
}
