// workorder-generation-service/src/renderers/html.rs

use crate::error::Result;
use std::process::Command;
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{debug, info};

pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Converts the markdown rendition into a standalone HTML page via
    /// Pandoc, suitable for the on-screen print preview.
    pub async fn render(&self, markdown_content: &str, title: &str) -> Result<Vec<u8>> {
        info!(title = %title, "Rendering HTML document");

        let mut md_file = NamedTempFile::new()?;
        let html_file = NamedTempFile::new()?;

        use std::io::Write;
        md_file.write_all(markdown_content.as_bytes())?;
        md_file.flush()?;

        debug!("Markdown written to: {:?}", md_file.path());

        let mut cmd = Command::new("pandoc");
        cmd.arg(md_file.path())
            .arg("-o")
            .arg(html_file.path())
            .arg("--from=markdown")
            .arg("--to=html5")
            .arg("--standalone")
            .arg("--metadata")
            .arg(format!("title={}", title))
            .arg("--metadata")
            .arg("lang=ru");

        debug!("Running Pandoc: {:?}", cmd);

        let output = cmd.output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(crate::error::DocumentError::Pandoc(stderr.to_string()));
        }

        let html_bytes = fs::read(html_file.path()).await?;

        info!(
            title = %title,
            size_kb = html_bytes.len() / 1024,
            "HTML generated successfully"
        );

        Ok(html_bytes)
    }
}
