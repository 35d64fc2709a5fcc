use super::{build_client, encode_id, join_url, send, ApiResponse};
use crate::utils::error::Result;
use reqwest::Client;
use serde::Serialize;

/// Shell / submodel descriptor registry
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    collection: &'static str,
    client: Client,
}

impl RegistryClient {
    pub fn shell_descriptors(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(base_url, "/shell-descriptors", build_client(None)?))
    }

    pub fn submodel_descriptors(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(base_url, "/submodel-descriptors", build_client(None)?))
    }

    pub fn with_client(base_url: impl Into<String>, collection: &'static str, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            collection,
            client,
        }
    }

    fn descriptor_url(&self, id: &str) -> String {
        join_url(&self.base_url, &format!("{}/{}", self.collection, encode_id(id)))
    }

    pub async fn get_descriptors(&self) -> Result<ApiResponse> {
        let url = join_url(&self.base_url, self.collection);
        send(self.client.get(&url), &url).await
    }

    pub async fn get_descriptor(&self, id: &str) -> Result<ApiResponse> {
        let url = self.descriptor_url(id);
        send(self.client.get(&url), &url).await
    }

    pub async fn create_descriptor<T: Serialize + ?Sized>(&self, descriptor: &T) -> Result<ApiResponse> {
        let url = join_url(&self.base_url, self.collection);
        send(self.client.post(&url).json(descriptor), &url).await
    }

    pub async fn delete_descriptor(&self, id: &str) -> Result<ApiResponse> {
        let url = self.descriptor_url(id);
        send(self.client.delete(&url), &url).await
    }
}
