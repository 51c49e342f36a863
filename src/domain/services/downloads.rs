use std::path::PathBuf;

use anyhow::Result;

use crate::domain::models::CodeArtifact;
use crate::domain::services::artifacts;

fn downloads_dir() -> PathBuf {
    return dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
}

/// Writes an artifact to the user's downloads directory and returns the
/// final path. Falls back to `code.{ext}` when the artifact carries no
/// filename of its own.
pub async fn save_artifact(artifact: &CodeArtifact) -> Result<PathBuf> {
    let filename = artifact.filename.clone().unwrap_or_else(|| {
        return format!("code.{}", artifacts::file_extension(&artifact.language));
    });

    let path = downloads_dir().join(filename);
    tokio::fs::write(&path, &artifact.code).await?;

    return Ok(path);
}
