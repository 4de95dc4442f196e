// workorder-generation-service/src/crm/mod.rs

mod client;
mod mapper;
mod models;

pub use client::{CrmClient, CrmConfig, DealSource};
pub use mapper::map_deal;
pub use models::{ContactRef, CrmContact, CrmDeal, CustomField, CustomFieldValue};
