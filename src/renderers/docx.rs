// workorder-generation-service/src/renderers/docx.rs

use crate::error::Result;
use std::process::Command;
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{debug, info};

pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Converts the markdown rendition into the downloadable DOCX form
    /// via Pandoc.
    pub async fn render(&self, markdown_content: &str, title: &str) -> Result<Vec<u8>> {
        info!(title = %title, "Rendering DOCX document");

        let mut md_file = NamedTempFile::new()?;
        // Pandoc infers the writer from the output extension.
        let docx_file = tempfile::Builder::new().suffix(".docx").tempfile()?;

        use std::io::Write;
        md_file.write_all(markdown_content.as_bytes())?;
        md_file.flush()?;

        debug!("Markdown written to: {:?}", md_file.path());

        let mut cmd = Command::new("pandoc");
        cmd.arg(md_file.path())
            .arg("-o")
            .arg(docx_file.path())
            .arg("--from=markdown")
            .arg("--to=docx")
            .arg("--metadata")
            .arg(format!("title={}", title));

        debug!("Running Pandoc: {:?}", cmd);

        let output = cmd.output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(crate::error::DocumentError::Pandoc(stderr.to_string()));
        }

        let docx_bytes = fs::read(docx_file.path()).await?;

        info!(
            title = %title,
            size_kb = docx_bytes.len() / 1024,
            "DOCX generated successfully"
        );

        Ok(docx_bytes)
    }
}
