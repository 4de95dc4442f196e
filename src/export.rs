// workorder-generation-service/src/export.rs
//
// Writes generated documents to the local output directory. The
// in-memory artifact stays valid if a write fails, so a failed export
// can simply be retried.

use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::error::{DocumentError, Result};
use crate::models::GeneratedDocument;

/// Metadata of a successfully written file.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub path: PathBuf,
    pub file_name: String,
    pub file_size: u64,
    pub sha256_checksum: String,
    pub mime_type: String,
}

pub struct DocumentExporter {
    output_dir: PathBuf,
}

impl DocumentExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one document and return its metadata including the SHA-256
    /// checksum of the written bytes.
    #[instrument(skip(self, document), fields(file_name = %document.filename))]
    pub async fn export(&self, document: &GeneratedDocument) -> Result<ExportResult> {
        let data = general_purpose::STANDARD
            .decode(&document.content_base64)
            .map_err(|e| DocumentError::ExportFailed(format!("invalid payload: {e}")))?;

        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            DocumentError::ExportFailed(format!(
                "cannot create {}: {e}",
                self.output_dir.display()
            ))
        })?;

        let path = self.output_dir.join(&document.filename);

        let mut hasher = Sha256::new();
        hasher.update(&data);
        let sha256_checksum = hex::encode(hasher.finalize());

        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| DocumentError::ExportFailed(format!("cannot write {}: {e}", path.display())))?;

        info!(
            path = %path.display(),
            file_size = data.len(),
            sha256 = %sha256_checksum,
            "Exported document"
        );

        Ok(ExportResult {
            path,
            file_name: document.filename.clone(),
            file_size: data.len() as u64,
            sha256_checksum,
            mime_type: document.mime_type.clone(),
        })
    }

    /// Write every document, skipping individual failures.
    pub async fn export_all(&self, documents: &[GeneratedDocument]) -> Vec<ExportResult> {
        let mut results = Vec::with_capacity(documents.len());
        for document in documents {
            match self.export(document).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(file_name = %document.filename, error = %e, "Export failed, continuing");
                }
            }
        }
        results
    }
}
