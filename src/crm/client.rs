// workorder-generation-service/src/crm/client.rs
//
// Read-only client for the amoCRM gateway. Configuration is an explicit
// value handed to the constructor; there is no process-wide client
// state, so independent fetches can run and be dropped concurrently.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::mapper;
use super::models::{ContactsPage, CrmContact, CrmDeal, DealsPage};
use crate::error::{DocumentError, Result};
use crate::models::DealRecord;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrmConfig {
    pub subdomain: String,
    pub access_token: String,
    /// Overrides the `https://<subdomain>.amocrm.ru` default, e.g. to
    /// point at a relay.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl CrmConfig {
    pub fn is_configured(&self) -> bool {
        !self.subdomain.is_empty() && !self.access_token.is_empty()
    }

    fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.amocrm.ru", self.subdomain),
        }
    }
}

/// Source of mapped deal records. Seam between the core and the CRM
/// collaborator.
#[async_trait]
pub trait DealSource: Send + Sync {
    async fn fetch_deals(&self, limit: usize) -> Result<Vec<DealRecord>>;
    async fn fetch_deal(&self, id: i64) -> Result<DealRecord>;
}

pub struct CrmClient {
    http: reqwest::Client,
    config: CrmConfig,
}

impl CrmClient {
    pub fn new(config: CrmConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(DocumentError::NotConfigured(
                "CRM subdomain and access token are required".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self { http, config })
    }

    async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R> {
        let url = format!(
            "{}/api/v4/{}",
            self.config.base_url(),
            path.trim_start_matches('/')
        );

        debug!(url = %url, "CRM request");

        let response = self
            .http
            .get(&url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.config.access_token),
            )
            .query(query)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NO_CONTENT => Err(DocumentError::Crm(
                "запись с указанным ID не найдена".to_string(),
            )),
            StatusCode::UNAUTHORIZED => Err(DocumentError::Crm(
                "неверный токен доступа или истек срок действия".to_string(),
            )),
            StatusCode::PAYMENT_REQUIRED => {
                Err(DocumentError::Crm("аккаунт CRM не оплачен".to_string()))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DocumentError::Crm(format!("{status}: {body}")))
            }
        }
    }

    pub async fn deals(&self, limit: usize) -> Result<Vec<CrmDeal>> {
        let page: DealsPage = self
            .get(
                "leads",
                &[
                    ("limit", limit.to_string()),
                    ("with", "contacts".to_string()),
                ],
            )
            .await?;
        Ok(page.embedded.leads)
    }

    pub async fn deal(&self, id: i64) -> Result<CrmDeal> {
        self.get(&format!("leads/{id}"), &[("with", "contacts".to_string())])
            .await
    }

    pub async fn contacts(&self, ids: &[i64]) -> Result<Vec<CrmContact>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let page: ContactsPage = self.get("contacts", &[("filter[id]", joined)]).await?;
        Ok(page.embedded.contacts)
    }

    fn main_contact<'a>(deal: &CrmDeal, contacts: &'a [CrmContact]) -> Option<&'a CrmContact> {
        let embedded = deal.embedded.as_ref()?;
        let main = embedded
            .contacts
            .iter()
            .find(|c| c.is_main)
            .or_else(|| embedded.contacts.first())?;
        contacts.iter().find(|c| c.id == main.id)
    }
}

#[async_trait]
impl DealSource for CrmClient {
    async fn fetch_deals(&self, limit: usize) -> Result<Vec<DealRecord>> {
        let deals = self.deals(limit).await?;
        if deals.is_empty() {
            return Ok(vec![]);
        }

        let mut contact_ids: Vec<i64> = deals
            .iter()
            .filter_map(|d| d.embedded.as_ref())
            .flat_map(|e| e.contacts.iter().map(|c| c.id))
            .collect();
        contact_ids.sort_unstable();
        contact_ids.dedup();

        let contacts = self.contacts(&contact_ids).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to fetch contacts, mapping deals without them");
            vec![]
        });

        Ok(deals
            .iter()
            .map(|deal| mapper::map_deal(deal, Self::main_contact(deal, &contacts)))
            .collect())
    }

    async fn fetch_deal(&self, id: i64) -> Result<DealRecord> {
        let deal = self.deal(id).await?;
        let contact_ids: Vec<i64> = deal
            .embedded
            .as_ref()
            .map(|e| e.contacts.iter().map(|c| c.id).collect())
            .unwrap_or_default();
        let contacts = self.contacts(&contact_ids).await.unwrap_or_default();
        Ok(mapper::map_deal(&deal, Self::main_contact(&deal, &contacts)))
    }
}
