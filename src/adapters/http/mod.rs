//! HTTP clients for the AAS repository and registry services.
//!
//! Identifiers in URL paths are base64url encoded without padding. Every
//! call returns the status code together with the parsed JSON body (`Null`
//! when the body is empty or not JSON); only transport failures are errors.

pub mod registry;
pub mod shell_repository;
pub mod submodel_repository;

use crate::utils::error::{AasError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

pub use registry::RegistryClient;
pub use shell_repository::ShellRepositoryClient;
pub use submodel_repository::SubmodelRepositoryClient;

pub fn encode_id(id: &str) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 只有 201 代表真的建立了新資源
    pub fn created(&self) -> bool {
        self.status == 201
    }

    pub fn into_result(self, url: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AasError::UnexpectedStatus {
                url: url.to_string(),
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }
}

pub fn build_client(timeout_seconds: Option<u64>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout));
    }
    Ok(builder.build()?)
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

pub(crate) async fn send(request: RequestBuilder, url: &str) -> Result<ApiResponse> {
    tracing::debug!("📡 {}", url);

    let response = request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            AasError::ConnectionError {
                url: url.to_string(),
                message: e.to_string(),
            }
        } else {
            AasError::ApiError(e)
        }
    })?;

    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    tracing::debug!("📡 {} -> {}", url, status);
    Ok(ApiResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_id_is_url_safe_without_padding() {
        assert_eq!(encode_id("sm_id"), "c21faWQ");
        assert_eq!(encode_id("https://example.com/ids/sm/1"), "aHR0cHM6Ly9leGFtcGxlLmNvbS9pZHMvc20vMQ");
        assert!(!encode_id("??>>").contains('/'));
        assert!(!encode_id("??>>").contains('+'));
    }

    #[test]
    fn test_join_url_trims_trailing_slash() {
        assert_eq!(join_url("http://localhost:8081/", "/submodels"), "http://localhost:8081/submodels");
        assert_eq!(join_url("http://localhost:8081", "/shells"), "http://localhost:8081/shells");
    }

    #[test]
    fn test_into_result() {
        let ok = ApiResponse { status: 204, body: serde_json::Value::Null };
        assert!(ok.into_result("http://x").is_ok());

        let conflict = ApiResponse { status: 409, body: json!({"message": "exists"}) };
        let err = conflict.into_result("http://x/submodels").unwrap_err();
        assert!(matches!(err, AasError::UnexpectedStatus { status: 409, .. }));
    }
}
