// workorder-generation-service/src/crm/models.rs
//
// Typed response shapes of the amoCRM v4 `leads` and `contacts`
// collections, as relayed by the gateway. Only the fields the mapper
// consumes are modeled.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomFieldValue {
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_code: Option<String>,
}

impl CustomFieldValue {
    /// Field values arrive as strings or numbers depending on the field
    /// type; callers always want text.
    pub fn as_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    pub field_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_code: Option<String>,
    pub values: Vec<CustomFieldValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRef {
    pub id: i64,
    #[serde(default)]
    pub is_main: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealEmbedded {
    #[serde(default)]
    pub contacts: Vec<ContactRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmDeal {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    pub status_id: i64,
    #[serde(default)]
    pub pipeline_id: i64,
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub custom_fields_values: Option<Vec<CustomField>>,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<DealEmbedded>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmContact {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub custom_fields_values: Option<Vec<CustomField>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DealsPage {
    #[serde(rename = "_embedded")]
    pub embedded: DealsEmbedded,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct DealsEmbedded {
    #[serde(default)]
    pub leads: Vec<CrmDeal>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContactsPage {
    #[serde(rename = "_embedded")]
    pub embedded: ContactsEmbedded,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ContactsEmbedded {
    #[serde(default)]
    pub contacts: Vec<CrmContact>,
}
