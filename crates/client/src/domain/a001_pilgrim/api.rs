//! API client for the pilgrim endpoints
//!
//! Thin `reqwest` wrappers over the backend REST surface. The detail fetch is
//! the reseed input of the relation registry; the summary list feeds the
//! resolver and the relative picker.

use async_trait::async_trait;
use contracts::domain::a001_pilgrim::aggregate::PilgrimDetails;
use contracts::domain::a001_pilgrim::relation::AddRelationRequest;
use contracts::domain::a001_pilgrim::summary::PilgrimSummary;
use contracts::enums::RelationType;

use crate::shared::api_utils::api_url;

use super::registry::RelationStore;

/// GET /api/pilgrim
pub async fn fetch_pilgrims(base_url: &str) -> anyhow::Result<Vec<PilgrimSummary>> {
    let url = api_url(base_url, "/api/pilgrim");
    let response = reqwest::get(&url).await?;
    if !response.status().is_success() {
        anyhow::bail!("HTTP error: {}", response.status());
    }
    Ok(response.json().await?)
}

/// GET /api/pilgrim/:id
pub async fn fetch_pilgrim_details(base_url: &str, id: &str) -> anyhow::Result<PilgrimDetails> {
    let url = api_url(base_url, &format!("/api/pilgrim/{}", id));
    let response = reqwest::get(&url).await?;
    if !response.status().is_success() {
        anyhow::bail!("HTTP error: {}", response.status());
    }
    Ok(response.json().await?)
}

/// Remote relation store backed by the backend relation endpoints
pub struct HttpRelationStore {
    base_url: String,
    http: reqwest::Client,
}

impl HttpRelationStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RelationStore for HttpRelationStore {
    async fn add_relation(
        &self,
        primary_id: &str,
        related_id: &str,
        relation_type: RelationType,
    ) -> anyhow::Result<()> {
        let url = api_url(&self.base_url, &format!("/api/pilgrim/{}/relations", primary_id));
        log::debug!("add relation {} -> {} ({})", primary_id, related_id, relation_type);

        let body = AddRelationRequest {
            related_id: related_id.to_string(),
            relation_type,
        };
        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }
        Ok(())
    }

    async fn remove_relation(&self, primary_id: &str, related_id: &str) -> anyhow::Result<()> {
        let url = api_url(
            &self.base_url,
            &format!("/api/pilgrim/{}/relations/{}", primary_id, related_id),
        );
        log::debug!("remove relation {} -> {}", primary_id, related_id);

        let response = self.http.delete(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }
        Ok(())
    }
}
