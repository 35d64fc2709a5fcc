use crate::domain::model::Conversion;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 發佈目標；沒有設定的服務會被略過
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryEndpoints {
    pub submodel_repository: Option<String>,
    pub shell_repository: Option<String>,
    pub submodel_registry: Option<String>,
    pub shell_id: Option<String>,
    pub force: bool,
    pub timeout_seconds: Option<u64>,
}

impl RepositoryEndpoints {
    pub fn is_empty(&self) -> bool {
        self.submodel_repository.is_none()
            && self.shell_repository.is_none()
            && self.submodel_registry.is_none()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn facts_path(&self) -> &str;
    fn submodel_id(&self) -> &str;
    fn id_short(&self) -> Option<&str>;
    fn parent(&self) -> Option<&str>;
    fn semantic_id(&self) -> Option<&str>;
    fn normalize_container_ids(&self) -> bool;
    fn output_path(&self) -> &str;
    fn output_filename(&self) -> String;
    fn repositories(&self) -> RepositoryEndpoints;
}

/// 發佈步驟的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishStep {
    pub target: String,
    pub status: u16,
    pub changed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub output_path: String,
    pub published: Vec<PublishStep>,
}

impl LoadReport {
    pub fn changed(&self) -> bool {
        self.published.iter().any(|step| step.changed)
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<serde_json::Value>;
    async fn transform(&self, facts: serde_json::Value) -> Result<Conversion>;
    async fn load(&self, conversion: Conversion) -> Result<LoadReport>;
}
