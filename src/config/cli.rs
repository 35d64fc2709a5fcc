use crate::config::{default_output_filename, validate_endpoints};
use crate::core::ConfigProvider;
use crate::domain::ports::RepositoryEndpoints;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "aas-submodel")]
#[command(about = "Convert host facts into an AAS submodel and optionally publish it")]
pub struct CliConfig {
    /// Facts JSON file
    #[arg(long)]
    pub facts: String,

    /// Submodel id
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub id_short: Option<String>,

    /// Administration shell id used as parent reference
    #[arg(long)]
    pub parent: Option<String>,

    /// Concept description id used as semantic reference
    #[arg(long)]
    pub semantic: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long)]
    pub output_file: Option<String>,

    #[arg(long, help = "Normalize collection and list keys")]
    pub normalize_container_ids: bool,

    #[arg(long)]
    pub submodel_repository: Option<String>,

    #[arg(long)]
    pub shell_repository: Option<String>,

    #[arg(long)]
    pub submodel_registry: Option<String>,

    #[arg(long)]
    pub shell_id: Option<String>,

    /// 已存在時覆寫 submodel（預設開啟，`--force false` 關閉）
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub force: bool,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn facts_path(&self) -> &str {
        &self.facts
    }

    fn submodel_id(&self) -> &str {
        &self.id
    }

    fn id_short(&self) -> Option<&str> {
        self.id_short.as_deref()
    }

    fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    fn semantic_id(&self) -> Option<&str> {
        self.semantic.as_deref()
    }

    fn normalize_container_ids(&self) -> bool {
        self.normalize_container_ids
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_filename(&self) -> String {
        self.output_file
            .clone()
            .unwrap_or_else(|| default_output_filename(&self.id))
    }

    fn repositories(&self) -> RepositoryEndpoints {
        RepositoryEndpoints {
            submodel_repository: self.submodel_repository.clone(),
            shell_repository: self.shell_repository.clone(),
            submodel_registry: self.submodel_registry.clone(),
            shell_id: self.shell_id.clone(),
            force: self.force,
            timeout_seconds: self.timeout_seconds,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("id", &self.id)?;
        validate_path("facts", &self.facts)?;
        validate_path("output_path", &self.output_path)?;
        validate_endpoints("", &self.repositories())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_config() -> CliConfig {
        CliConfig {
            facts: "facts.json".to_string(),
            id: "urn:sm:host1".to_string(),
            id_short: None,
            parent: None,
            semantic: None,
            output_path: "./output".to_string(),
            output_file: None,
            normalize_container_ids: false,
            submodel_repository: None,
            shell_repository: None,
            submodel_registry: None,
            shell_id: None,
            force: false,
            timeout_seconds: None,
            verbose: false,
            json_logs: false,
        }
    }

    #[test]
    fn test_cli_config_validation() {
        let config = cli_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_filename(), "urn_sm_host1.json");
        assert!(config.repositories().is_empty());

        let mut missing_shell_id = cli_config();
        missing_shell_id.shell_repository = Some("http://localhost:8081".to_string());
        assert!(missing_shell_id.validate().is_err());

        let mut bad_url = cli_config();
        bad_url.submodel_repository = Some("localhost:8081".to_string());
        assert!(bad_url.validate().is_err());

        let mut empty_id = cli_config();
        empty_id.id = " ".to_string();
        assert!(empty_id.validate().is_err());
    }

    #[test]
    fn test_cli_config_parses_arguments() {
        let config = CliConfig::try_parse_from([
            "aas-submodel",
            "--facts",
            "facts.json",
            "--id",
            "urn:sm:host1",
            "--parent",
            "urn:aas:host1",
            "--submodel-repository",
            "http://localhost:8081",
        ])
        .unwrap();

        assert_eq!(config.parent(), Some("urn:aas:host1"));
        assert_eq!(config.output_path, "./output");
        assert!(config.repositories().force);
        assert!(!config.repositories().is_empty());
    }

    #[test]
    fn test_cli_force_can_be_disabled() {
        let config = CliConfig::try_parse_from([
            "aas-submodel",
            "--facts",
            "facts.json",
            "--id",
            "sm_id",
            "--force",
            "false",
        ])
        .unwrap();

        assert!(!config.repositories().force);
    }
}
