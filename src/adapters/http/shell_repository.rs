use super::{build_client, encode_id, join_url, send, ApiResponse};
use crate::domain::model::Reference;
use crate::utils::error::Result;
use reqwest::Client;

/// Shell repository (`/shells`) 與其 submodel reference
#[derive(Debug, Clone)]
pub struct ShellRepositoryClient {
    base_url: String,
    client: Client,
}

impl ShellRepositoryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(base_url, build_client(None)?))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn shell_url(&self, shell_id: &str) -> String {
        join_url(&self.base_url, &format!("/shells/{}", encode_id(shell_id)))
    }

    pub async fn get_shells(&self) -> Result<ApiResponse> {
        let url = join_url(&self.base_url, "/shells");
        send(self.client.get(&url), &url).await
    }

    pub async fn get_shell(&self, shell_id: &str) -> Result<ApiResponse> {
        let url = self.shell_url(shell_id);
        send(self.client.get(&url), &url).await
    }

    pub async fn create_shell(&self, shell: &serde_json::Value) -> Result<ApiResponse> {
        let url = join_url(&self.base_url, "/shells");
        send(self.client.post(&url).json(shell), &url).await
    }

    pub async fn delete_shell(&self, shell_id: &str) -> Result<ApiResponse> {
        let url = self.shell_url(shell_id);
        send(self.client.delete(&url), &url).await
    }

    pub async fn get_submodel_references(&self, shell_id: &str) -> Result<ApiResponse> {
        let url = format!("{}/submodel-refs", self.shell_url(shell_id));
        send(self.client.get(&url), &url).await
    }

    /// 已存在相同 submodel id 的 reference 時直接回傳 200，不重複新增
    pub async fn add_submodel_reference(
        &self,
        shell_id: &str,
        reference: &Reference,
    ) -> Result<ApiResponse> {
        let shell = self.get_shell(shell_id).await?;

        if let Some(submodel_id) = reference.keys.first().map(|key| key.value.as_str()) {
            if shell_references_submodel(&shell.body, submodel_id) {
                tracing::debug!(
                    "Shell '{}' already references submodel '{}'",
                    shell_id,
                    submodel_id
                );
                return Ok(ApiResponse {
                    status: 200,
                    body: serde_json::to_value(reference)?,
                });
            }
        }

        let url = format!("{}/submodel-refs", self.shell_url(shell_id));
        send(self.client.post(&url).json(reference), &url).await
    }

    pub async fn delete_submodel_reference(
        &self,
        shell_id: &str,
        submodel_id: &str,
    ) -> Result<ApiResponse> {
        let url = format!(
            "{}/submodel-refs/{}",
            self.shell_url(shell_id),
            encode_id(submodel_id)
        );
        send(self.client.delete(&url), &url).await
    }
}

fn shell_references_submodel(shell: &serde_json::Value, submodel_id: &str) -> bool {
    let Some(submodels) = shell.get("submodels").and_then(|s| s.as_array()) else {
        return false;
    };

    submodels.iter().any(|reference| {
        serde_json::from_value::<Reference>(reference.clone())
            .map(|reference| reference.references(submodel_id))
            .unwrap_or(false)
    })
}
