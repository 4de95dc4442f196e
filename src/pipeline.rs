// workorder-generation-service/src/pipeline.rs
//
// Orchestrates one generation request: resolve template → recompute
// totals → bind → substitute placeholders / build the structured
// artifact → render every requested format.

use base64::{engine::general_purpose, Engine as _};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::document::{self, WorkOrderDocument};
use crate::error::{DocumentError, Result};
use crate::models::{
    DocumentBinding, DocumentFormat, DocumentTemplate, GeneratedDocument, GenerationRequest,
    GenerationResponse,
};
use crate::renderers::{DocxRenderer, HtmlRenderer, MarkdownRenderer};
use crate::template;
use crate::templates;

pub struct DocumentPipeline {
    markdown_renderer: MarkdownRenderer,
    html_renderer: HtmlRenderer,
    docx_renderer: DocxRenderer,
}

impl DocumentPipeline {
    pub fn new() -> Self {
        Self {
            markdown_renderer: MarkdownRenderer::new(),
            html_renderer: HtmlRenderer::new(),
            docx_renderer: DocxRenderer::new(),
        }
    }

    /// Structured artifact for the on-screen preview, without rendering
    /// any export format.
    pub fn build_preview(
        &self,
        request: &GenerationRequest,
        template_collection: &[DocumentTemplate],
    ) -> Result<WorkOrderDocument> {
        let binding = self.bind(request, template_collection)?;
        Ok(document::build_document(&binding))
    }

    pub async fn process(
        &self,
        request: GenerationRequest,
        template_collection: &[DocumentTemplate],
    ) -> GenerationResponse {
        let request_id = Uuid::new_v4().to_string();

        info!(
            request_id = %request_id,
            deal = %request.deal.number,
            formats = ?request.output_formats,
            "Processing work-order generation request"
        );

        let binding = match self.bind(&request, template_collection) {
            Ok(binding) => binding,
            Err(e) => {
                error!("Failed to bind request: {}", e);
                return GenerationResponse::error(request_id, e.to_string());
            }
        };

        // Placeholder substitution over the selected template.
        let rendered = template::render(&binding.template.content, &binding);
        for token in &rendered.unresolved {
            warn!(token = %token, "Unresolved placeholder left verbatim");
        }

        // Structured artifact and its markdown rendition, shared by the
        // HTML and DOCX renderers.
        let artifact = document::build_document(&binding);
        let markdown_content = self.markdown_renderer.to_markdown(&artifact);

        let filename_stem =
            WorkOrderDocument::filename_stem(&binding.deal.number, &binding.deal.date);

        let mut documents = Vec::new();

        for format in &request.output_formats {
            match self
                .render_document(*format, &rendered.text, &markdown_content, &artifact, &filename_stem)
                .await
            {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    warn!("Failed to render {} format: {}", format.name(), e);
                    // Continue with other formats instead of failing completely
                }
            }
        }

        if documents.is_empty() {
            error!("Failed to generate any documents");
            return GenerationResponse::error(
                request_id,
                "Failed to generate documents in any requested format".to_string(),
            );
        }

        info!(
            request_id = %request_id,
            document_count = documents.len(),
            "Successfully generated documents"
        );

        GenerationResponse::success(request_id, documents, rendered.unresolved)
    }

    fn bind(
        &self,
        request: &GenerationRequest,
        template_collection: &[DocumentTemplate],
    ) -> Result<DocumentBinding> {
        let template = match (&request.template_id, &request.template) {
            (Some(id), _) => templates::find_template(template_collection, id)?,
            (None, Some(inline)) => inline.clone(),
            (None, None) => {
                return Err(DocumentError::InvalidRequest(
                    "either template_id or an inline template is required".to_string(),
                ))
            }
        };

        Ok(DocumentBinding::new(
            template,
            request.deal.clone(),
            request.services.clone(),
        ))
    }

    async fn render_document(
        &self,
        format: DocumentFormat,
        template_text: &str,
        markdown_content: &str,
        artifact: &WorkOrderDocument,
        filename_stem: &str,
    ) -> Result<GeneratedDocument> {
        let (content_bytes, mime_type, extension) = match format {
            DocumentFormat::Text => (
                template_text.as_bytes().to_vec(),
                "text/plain; charset=utf-8",
                "txt",
            ),
            DocumentFormat::Markdown => (
                self.markdown_renderer.render(artifact)?,
                "text/markdown; charset=utf-8",
                "md",
            ),
            DocumentFormat::Html => (
                self.html_renderer
                    .render(markdown_content, &artifact.title)
                    .await?,
                "text/html; charset=utf-8",
                "html",
            ),
            DocumentFormat::Docx => (
                self.docx_renderer
                    .render(markdown_content, &artifact.title)
                    .await?,
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "docx",
            ),
        };

        let content_base64 = general_purpose::STANDARD.encode(&content_bytes);
        let size_bytes = content_bytes.len();

        Ok(GeneratedDocument {
            format,
            content_base64,
            filename: format!("{}.{}", filename_stem, extension),
            mime_type: mime_type.to_string(),
            size_bytes,
        })
    }
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientName, DealRecord, ServiceLine, Vehicle};
    use base64::{engine::general_purpose, Engine as _};

    fn request(formats: Vec<DocumentFormat>) -> GenerationRequest {
        GenerationRequest {
            template_id: Some("standard".to_string()),
            template: None,
            deal: DealRecord {
                id: "42".into(),
                number: "42".into(),
                date: "2024-05-01".into(),
                client_name: ClientName {
                    last_name: "Иванов".into(),
                    first_name: "Иван".into(),
                    middle_name: "Иванович".into(),
                },
                phone: "+7 900 123-45-67".into(),
                vehicle: Vehicle {
                    brand: "Toyota".into(),
                    model: "Camry".into(),
                    vin: "JTNBE46K473000000".into(),
                    year: "2018".into(),
                },
                status: "Переговоры".into(),
                amount: 240.0,
            },
            services: vec![
                ServiceLine::new("Замена масла", 2.0, "шт", 100.0, 10.0, 0.0),
                ServiceLine::new("Диагностика", 1.0, "шт", 50.0, 0.0, 20.0),
            ],
            output_formats: formats,
        }
    }

    #[tokio::test]
    async fn text_format_substitutes_the_builtin_template() {
        let pipeline = DocumentPipeline::new();
        let response = pipeline
            .process(request(vec![DocumentFormat::Text]), &[])
            .await;

        assert_eq!(response.status, "success");
        assert!(response.unresolved_placeholders.is_empty());
        assert_eq!(response.documents.len(), 1);

        let doc = &response.documents[0];
        assert_eq!(doc.filename, "Заказ-наряд_42_2024-05-01.txt");
        assert_eq!(doc.mime_type, "text/plain; charset=utf-8");

        let bytes = general_purpose::STANDARD.decode(&doc.content_base64).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("№42 от 2024-05-01"));
        assert!(text.contains("Всего к оплате: 240.00 руб."));
        assert!(text.contains("на сумму: двести сорок рублей"));
        assert!(!text.contains("{{"));
    }

    #[tokio::test]
    async fn markdown_format_carries_the_services_table() {
        let pipeline = DocumentPipeline::new();
        let response = pipeline
            .process(request(vec![DocumentFormat::Markdown]), &[])
            .await;

        assert_eq!(response.status, "success");
        let doc = &response.documents[0];
        assert_eq!(doc.filename, "Заказ-наряд_42_2024-05-01.md");

        let bytes = general_purpose::STANDARD.decode(&doc.content_base64).unwrap();
        let md = String::from_utf8(bytes).unwrap();
        assert!(md.contains("| 1 | Замена масла | 2 | шт | 100.00 | 180.00 |"));
        assert!(md.contains("| 2 | Диагностика | 1 | шт | 50.00 | 60.00 |"));
    }

    #[tokio::test]
    async fn forged_line_totals_do_not_reach_the_rendered_totals() {
        let pipeline = DocumentPipeline::new();
        let mut req = request(vec![DocumentFormat::Text]);
        for line in &mut req.services {
            line.total = 999_999.0;
        }

        let response = pipeline.process(req, &[]).await;
        assert_eq!(response.status, "success");

        let bytes = general_purpose::STANDARD
            .decode(&response.documents[0].content_base64)
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Всего к оплате: 240.00 руб."));
        assert!(text.contains("на сумму: двести сорок рублей"));
        assert!(!text.contains("999999"));
    }

    #[tokio::test]
    async fn process_is_repeatable() {
        let pipeline = DocumentPipeline::new();
        let a = pipeline.process(request(vec![DocumentFormat::Text]), &[]).await;
        let b = pipeline.process(request(vec![DocumentFormat::Text]), &[]).await;
        assert_eq!(
            a.documents[0].content_base64,
            b.documents[0].content_base64
        );
    }

    #[tokio::test]
    async fn missing_template_is_an_error_response() {
        let pipeline = DocumentPipeline::new();
        let mut req = request(vec![DocumentFormat::Text]);
        req.template_id = Some("missing".to_string());
        let response = pipeline.process(req, &[]).await;
        assert_eq!(response.status, "error");
        assert!(response.documents.is_empty());
    }

    #[test]
    fn preview_builds_the_structured_artifact() {
        let pipeline = DocumentPipeline::new();
        let artifact = pipeline
            .build_preview(&request(vec![DocumentFormat::Text]), &[])
            .unwrap();
        assert_eq!(artifact.title, "ЗАКАЗ-НАРЯД");
        assert!(!artifact.blocks.is_empty());
    }
}
