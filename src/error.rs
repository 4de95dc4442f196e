// workorder-generation-service/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("CRM is not configured: {0}")]
    NotConfigured(String),

    #[error("CRM request failed: {0}")]
    Crm(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pandoc error: {0}")]
    Pandoc(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),
}

impl DocumentError {
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            error_type: match self {
                DocumentError::NotConfigured(_) => "not_configured",
                DocumentError::Crm(_) => "crm_error",
                DocumentError::Http(_) => "http_error",
                DocumentError::Io(_) => "io_error",
                DocumentError::Pandoc(_) => "pandoc_error",
                DocumentError::Serialization(_) => "serialization_error",
                DocumentError::TemplateNotFound(_) => "template_not_found",
                DocumentError::InvalidRequest(_) => "invalid_request",
                DocumentError::ExportFailed(_) => "export_failed",
            }
            .to_string(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}
