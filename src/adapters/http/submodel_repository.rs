use super::{build_client, encode_id, join_url, send, ApiResponse};
use crate::domain::model::Submodel;
use crate::utils::error::Result;
use reqwest::Client;

/// Submodel repository (`/submodels`)
#[derive(Debug, Clone)]
pub struct SubmodelRepositoryClient {
    base_url: String,
    client: Client,
}

impl SubmodelRepositoryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(base_url, build_client(None)?))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn submodel_url(&self, submodel_id: &str) -> String {
        join_url(&self.base_url, &format!("/submodels/{}", encode_id(submodel_id)))
    }

    /// 建立 submodel；`force` 時遇到 409 改用 PUT 覆寫
    pub async fn create(&self, submodel: &Submodel, force: bool) -> Result<ApiResponse> {
        let url = join_url(&self.base_url, "/submodels");
        let response = send(self.client.post(&url).json(submodel), &url).await?;

        if response.status == 409 && force {
            tracing::info!("🔄 Submodel '{}' already exists, updating it", submodel.id);
            return self.update(submodel).await;
        }

        Ok(response)
    }

    pub async fn update(&self, submodel: &Submodel) -> Result<ApiResponse> {
        let url = self.submodel_url(&submodel.id);
        send(self.client.put(&url).json(submodel), &url).await
    }

    pub async fn get_all(&self) -> Result<ApiResponse> {
        let url = join_url(&self.base_url, "/submodels");
        send(self.client.get(&url), &url).await
    }

    pub async fn get_one(&self, submodel_id: &str) -> Result<ApiResponse> {
        let url = self.submodel_url(submodel_id);
        send(self.client.get(&url), &url).await
    }

    pub async fn delete(&self, submodel_id: &str) -> Result<ApiResponse> {
        let url = self.submodel_url(submodel_id);
        send(self.client.delete(&url), &url).await
    }
}
