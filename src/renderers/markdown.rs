// workorder-generation-service/src/renderers/markdown.rs

use crate::document::{Alignment, Block, ParagraphBlock, TextRun, WorkOrderDocument};
use crate::error::Result;
use tracing::info;

pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Serializes the structured artifact into Pandoc markdown. Also the
    /// intermediate representation for the HTML and DOCX renderers.
    pub fn to_markdown(&self, document: &WorkOrderDocument) -> String {
        let mut out = String::new();
        let mut first = true;

        for block in &document.blocks {
            if !first {
                out.push('\n');
            }
            first = false;

            match block {
                Block::Paragraph(p) => {
                    out.push_str(&paragraph_markdown(p));
                    out.push('\n');
                }
                Block::Table(table) => {
                    out.push_str(&format!("| {} |\n", table.header.join(" | ")));
                    out.push_str(&format!("|{}\n", " --- |".repeat(table.header.len())));
                    for row in &table.rows {
                        out.push_str(&format!(
                            "| {} | {} | {} | {} | {} | {} |\n",
                            row.index, row.name, row.quantity, row.unit, row.unit_price, row.total
                        ));
                    }
                }
            }
        }

        out
    }

    pub fn render(&self, document: &WorkOrderDocument) -> Result<Vec<u8>> {
        let markdown = self.to_markdown(document);

        info!(
            title = %document.title,
            size_bytes = markdown.len(),
            "Markdown generated successfully"
        );

        Ok(markdown.into_bytes())
    }
}

fn paragraph_markdown(paragraph: &ParagraphBlock) -> String {
    if paragraph.runs.is_empty() {
        return String::new();
    }

    let body: String = paragraph.runs.iter().map(run_markdown).collect();
    match paragraph.alignment {
        // Pandoc markdown has no centering; centered blocks become headings.
        Alignment::Center => format!("# {}", body),
        Alignment::Left | Alignment::Right => body,
    }
}

fn run_markdown(run: &TextRun) -> String {
    if !run.bold || run.text.trim().is_empty() {
        return run.text.clone();
    }
    // Emphasis markers must hug non-whitespace, so trailing spaces of a
    // bold run move outside the markers.
    let trimmed = run.text.trim_end();
    let trailing = &run.text[trimmed.len()..];
    format!("**{}**{}", trimmed, trailing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ServiceRow, ServiceTable};

    #[test]
    fn bold_runs_keep_markers_tight() {
        let p = ParagraphBlock::new(vec![TextRun::bold("Телефон: "), TextRun::plain("123")]);
        assert_eq!(paragraph_markdown(&p), "**Телефон:** 123");
    }

    #[test]
    fn centered_paragraphs_become_headings() {
        let p = ParagraphBlock::centered(vec![TextRun::bold("ЗАКАЗ-НАРЯД")]);
        assert_eq!(paragraph_markdown(&p), "# **ЗАКАЗ-НАРЯД**");
    }

    #[test]
    fn table_serializes_as_pipe_table() {
        let doc = WorkOrderDocument {
            title: "ЗАКАЗ-НАРЯД".into(),
            blocks: vec![Block::Table(ServiceTable {
                header: vec!["№".into(), "Наименование".into()],
                rows: vec![ServiceRow {
                    index: 1,
                    name: "Мойка".into(),
                    quantity: "1".into(),
                    unit: "шт".into(),
                    unit_price: "300.00".into(),
                    total: "300.00".into(),
                }],
            })],
        };
        let md = MarkdownRenderer::new().to_markdown(&doc);
        assert!(md.contains("| № | Наименование |"));
        assert!(md.contains("| --- | --- |"));
        assert!(md.contains("| 1 | Мойка | 1 | шт | 300.00 | 300.00 |"));
    }
}
