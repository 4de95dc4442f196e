// workorder-generation-service/src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Plain-text rendition produced by template substitution.
    Text,
    Markdown,
    Html,
    Docx,
}

impl DocumentFormat {
    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "text",
            DocumentFormat::Markdown => "markdown",
            DocumentFormat::Html => "html",
            DocumentFormat::Docx => "docx",
        }
    }
}

/// One billable service line of a work order. `total` is never supplied
/// independently: every constructor and update recomputes it from the
/// other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLine {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub discount_percent: f64,
    pub vat_percent: f64,
    pub total: f64,
}

impl ServiceLine {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        unit_price: f64,
        discount_percent: f64,
        vat_percent: f64,
    ) -> Self {
        let total = calc::line_total(quantity, unit_price, discount_percent, vat_percent);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            discount_percent,
            vat_percent,
            total,
        }
    }

    /// Re-derives `total` from the other five fields, discarding
    /// whatever value the line carried. Deserialized lines go through
    /// this before any aggregation, so a forged or stale `total` in a
    /// request payload never reaches the totals block.
    pub fn recomputed(&self) -> Self {
        let mut line = self.clone();
        line.total =
            calc::line_total(line.quantity, line.unit_price, line.discount_percent, line.vat_percent);
        line
    }

    /// Returns a new line with the delta applied and `total` recomputed
    /// in the same step, so no intermediate state carries a stale total.
    pub fn apply(&self, update: &LineUpdate) -> Self {
        let mut line = self.clone();
        if let Some(name) = &update.name {
            line.name = name.clone();
        }
        if let Some(quantity) = update.quantity {
            line.quantity = quantity;
        }
        if let Some(unit) = &update.unit {
            line.unit = unit.clone();
        }
        if let Some(unit_price) = update.unit_price {
            line.unit_price = unit_price;
        }
        if let Some(discount_percent) = update.discount_percent {
            line.discount_percent = discount_percent;
        }
        if let Some(vat_percent) = update.vat_percent {
            line.vat_percent = vat_percent;
        }
        line.recomputed()
    }
}

/// Field-delta for a [`ServiceLine`] edit. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineUpdate {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub discount_percent: Option<f64>,
    pub vat_percent: Option<f64>,
}

/// Order-level aggregates, recomputed in full from the line list on
/// every read. `total` folds per-line VAT in; `subtotal` and `discount`
/// are pre-tax, so `total != subtotal - discount` whenever VAT is
/// present. That asymmetry mirrors the accounting convention of the
/// printed form and is intentional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientName {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub brand: String,
    pub model: String,
    pub vin: String,
    pub year: String,
}

/// Deal record mapped from the CRM, immutable input to a
/// document-creation session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub id: String,
    pub number: String,
    pub date: String,
    pub client_name: ClientName,
    pub phone: String,
    pub vehicle: Vehicle,
    pub status: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub content: String,
}

/// Ephemeral aggregate passed to the substitution engine and the
/// document renderer. Constructed fresh per generation request.
#[derive(Debug, Clone)]
pub struct DocumentBinding {
    pub template: DocumentTemplate,
    pub deal: DealRecord,
    pub services: Vec<ServiceLine>,
    pub totals: OrderTotals,
}

impl DocumentBinding {
    pub fn new(template: DocumentTemplate, deal: DealRecord, services: Vec<ServiceLine>) -> Self {
        // Lines may come straight off the wire; their totals are
        // re-derived here so aggregation never trusts a supplied value.
        let services: Vec<ServiceLine> = services.iter().map(ServiceLine::recomputed).collect();
        let totals = calc::order_totals(&services);
        Self {
            template,
            deal,
            services,
            totals,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Id of a template in the caller-supplied (or built-in) collection.
    pub template_id: Option<String>,
    /// Inline template, used when `template_id` is absent.
    pub template: Option<DocumentTemplate>,
    pub deal: DealRecord,
    pub services: Vec<ServiceLine>,
    pub output_formats: Vec<DocumentFormat>,
}

impl GenerationRequest {
    /// Requested formats, or `defaults` when the request leaves them
    /// empty.
    pub fn effective_formats(&self, defaults: &[DocumentFormat]) -> Vec<DocumentFormat> {
        if self.output_formats.is_empty() {
            defaults.to_vec()
        } else {
            self.output_formats.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub format: DocumentFormat,
    pub content_base64: String,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub request_id: String,
    pub status: String,
    pub documents: Vec<GeneratedDocument>,
    /// Placeholder tokens that had no mapping; left verbatim in the output.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unresolved_placeholders: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResponse {
    pub fn success(
        request_id: String,
        documents: Vec<GeneratedDocument>,
        unresolved_placeholders: Vec<String>,
    ) -> Self {
        Self {
            request_id,
            status: "success".to_string(),
            documents,
            unresolved_placeholders,
            error: None,
            generated_at: Utc::now(),
        }
    }

    pub fn error(request_id: String, error: String) -> Self {
        Self {
            request_id,
            status: "error".to_string(),
            documents: vec![],
            unresolved_placeholders: vec![],
            error: Some(error),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_line_computes_total() {
        let line = ServiceLine::new("Замена масла", 2.0, "шт", 100.0, 10.0, 0.0);
        assert!((line.total - 180.0).abs() < 1e-9);
    }

    #[test]
    fn apply_recomputes_total_atomically() {
        let line = ServiceLine::new("Диагностика", 1.0, "шт", 50.0, 0.0, 0.0);
        let updated = line.apply(&LineUpdate {
            vat_percent: Some(20.0),
            ..Default::default()
        });
        assert!((updated.total - 60.0).abs() < 1e-9);
        // original is untouched
        assert!((line.total - 50.0).abs() < 1e-9);
        assert_eq!(line.id, updated.id);
    }

    #[test]
    fn forged_total_in_a_deserialized_line_is_discarded() {
        let line: ServiceLine = serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "name": "Диагностика",
            "quantity": 1.0,
            "unit": "шт",
            "unit_price": 50.0,
            "discount_percent": 0.0,
            "vat_percent": 0.0,
            "total": 999999.0
        }))
        .unwrap();

        let binding = DocumentBinding::new(
            DocumentTemplate {
                id: "t".into(),
                name: "t".into(),
                description: String::new(),
                content: String::new(),
            },
            DealRecord::default(),
            vec![line],
        );
        assert!((binding.services[0].total - 50.0).abs() < 1e-9);
        assert!((binding.totals.total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_requested_formats_fall_back_to_defaults() {
        let request = GenerationRequest {
            template_id: Some("standard".into()),
            template: None,
            deal: DealRecord::default(),
            services: vec![],
            output_formats: vec![],
        };
        assert_eq!(
            request.effective_formats(&[DocumentFormat::Docx]),
            vec![DocumentFormat::Docx]
        );

        let explicit = GenerationRequest {
            output_formats: vec![DocumentFormat::Text],
            ..request
        };
        assert_eq!(
            explicit.effective_formats(&[DocumentFormat::Docx]),
            vec![DocumentFormat::Text]
        );
    }

    #[test]
    fn binding_recomputes_totals_from_lines() {
        let services = vec![
            ServiceLine::new("А", 2.0, "шт", 100.0, 10.0, 0.0),
            ServiceLine::new("Б", 1.0, "шт", 50.0, 0.0, 20.0),
        ];
        let binding = DocumentBinding::new(
            DocumentTemplate {
                id: "t".into(),
                name: "t".into(),
                description: String::new(),
                content: String::new(),
            },
            DealRecord::default(),
            services,
        );
        assert!((binding.totals.subtotal - 250.0).abs() < 1e-9);
        assert!((binding.totals.discount - 20.0).abs() < 1e-9);
        assert!((binding.totals.total - 240.0).abs() < 1e-9);
    }
}
