use crate::adapters::http::{build_client, RegistryClient, ShellRepositoryClient, SubmodelRepositoryClient};
use crate::core::assemble::SubmodelAssembler;
use crate::core::reference::{submodel_descriptor, submodel_reference};
use crate::core::{ConfigProvider, Conversion, LoadReport, Pipeline, PublishStep, Storage};
use crate::domain::ports::RepositoryEndpoints;
use crate::utils::error::{AasError, Result};

/// Facts JSON -> submodel JSON -> (選用) 發佈到 repository / registry
pub struct SubmodelPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SubmodelPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn publish(
        &self,
        conversion: &Conversion,
        endpoints: &RepositoryEndpoints,
    ) -> Result<Vec<PublishStep>> {
        let client = build_client(endpoints.timeout_seconds)?;
        let submodel = &conversion.submodel;
        let mut steps = Vec::new();

        // 1. submodel repository
        if let Some(repository_url) = &endpoints.submodel_repository {
            let repository = SubmodelRepositoryClient::with_client(repository_url, client.clone());
            let url = repository.submodel_url(&submodel.id);
            let response = repository
                .create(submodel, endpoints.force)
                .await?
                .into_result(&url)?;

            tracing::info!("📤 Submodel '{}' stored ({})", submodel.id, response.status);
            steps.push(PublishStep {
                target: url,
                status: response.status,
                changed: response.is_success(),
            });
        }

        // 2. shell 的 submodel reference
        if let (Some(shell_repository_url), Some(shell_id)) =
            (&endpoints.shell_repository, &endpoints.shell_id)
        {
            let shells = ShellRepositoryClient::with_client(shell_repository_url, client.clone());
            let reference = submodel_reference(&submodel.id);
            let target = format!("{}#{}", shell_repository_url, shell_id);
            let response = shells
                .add_submodel_reference(shell_id, &reference)
                .await?
                .into_result(&target)?;

            tracing::info!("🔗 Shell '{}' references submodel '{}' ({})", shell_id, submodel.id, response.status);
            steps.push(PublishStep {
                target,
                status: response.status,
                changed: response.created(),
            });
        } else if endpoints.shell_repository.is_some() {
            tracing::warn!("⚠️ Shell repository configured without a shell id, skipping reference");
        }

        // 3. submodel descriptor
        if let Some(registry_url) = &endpoints.submodel_registry {
            let repository_url = endpoints.submodel_repository.as_deref().ok_or_else(|| {
                AasError::MissingConfigError {
                    field: "submodel_repository".to_string(),
                }
            })?;
            let registry = RegistryClient::with_client(registry_url, "/submodel-descriptors", client);
            let descriptor = submodel_descriptor(&submodel.id, repository_url);
            let response = registry.create_descriptor(&descriptor).await?;

            // 409：descriptor 已經註冊過
            if response.status != 409 {
                response.clone().into_result(registry_url)?;
            }

            tracing::info!("📇 Submodel descriptor '{}' registered ({})", submodel.id, response.status);
            steps.push(PublishStep {
                target: registry_url.clone(),
                status: response.status,
                changed: response.created(),
            });
        }

        Ok(steps)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SubmodelPipeline<S, C> {
    async fn extract(&self) -> Result<serde_json::Value> {
        tracing::debug!("Reading facts from: {}", self.config.facts_path());
        let data = self.storage.read_file(self.config.facts_path()).await?;
        let facts: serde_json::Value = serde_json::from_slice(&data)?;
        Ok(facts)
    }

    async fn transform(&self, facts: serde_json::Value) -> Result<Conversion> {
        let conversion = SubmodelAssembler::new()
            .id_short(self.config.id_short())
            .parent(self.config.parent())
            .semantic_id(self.config.semantic_id())
            .normalize_container_ids(self.config.normalize_container_ids())
            .assemble(self.config.submodel_id(), &facts)?;

        for diagnostic in &conversion.diagnostics {
            tracing::debug!("Diagnostic at '{}': {:?}", diagnostic.path, diagnostic.kind);
        }

        Ok(conversion)
    }

    async fn load(&self, conversion: Conversion) -> Result<LoadReport> {
        let output_path = format!(
            "{}/{}",
            self.config.output_path().trim_end_matches('/'),
            self.config.output_filename()
        );

        let json_data = conversion.to_json_string_pretty()?;
        tracing::debug!("Writing submodel ({} bytes) to {}", json_data.len(), output_path);
        self.storage.write_file(&output_path, json_data.as_bytes()).await?;

        let endpoints = self.config.repositories();
        let published = if endpoints.is_empty() {
            Vec::new()
        } else {
            self.publish(&conversion, &endpoints).await?
        };

        Ok(LoadReport {
            output_path,
            published,
        })
    }
}
