use crate::config::{default_output_filename, validate_endpoints};
use crate::core::ConfigProvider;
use crate::domain::ports::RepositoryEndpoints;
use crate::utils::error::{AasError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub submodel: SubmodelSection,
    pub facts: FactsSection,
    #[serde(default)]
    pub output: OutputSection,
    pub repositories: Option<RepositoriesSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmodelSection {
    pub id: String,
    pub id_short: Option<String>,
    pub parent: Option<String>,
    pub semantic_id: Option<String>,
    #[serde(default)]
    pub normalize_container_ids: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactsSection {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_path")]
    pub path: String,
    pub filename: Option<String>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            filename: None,
        }
    }
}

fn default_output_path() -> String {
    "./output".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoriesSection {
    pub submodel_repository: Option<String>,
    pub shell_repository: Option<String>,
    pub submodel_registry: Option<String>,
    pub shell_id: Option<String>,
    /// 已存在的 submodel 直接覆寫
    #[serde(default = "default_force")]
    pub force: bool,
    pub timeout_seconds: Option<u64>,
}

impl Default for RepositoriesSection {
    fn default() -> Self {
        Self {
            submodel_repository: None,
            shell_repository: None,
            submodel_registry: None,
            shell_id: None,
            force: default_force(),
            timeout_seconds: None,
        }
    }
}

fn default_force() -> bool {
    true
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AasError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AasError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AAS_REPOSITORY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("submodel.id", &self.submodel.id)?;
        validate_path("facts.path", &self.facts.path)?;
        validate_path("output.path", &self.output.path)?;

        if let Some(filename) = &self.output.filename {
            validate_non_empty_string("output.filename", filename)?;
        }

        validate_endpoints("repositories.", &self.repositories())
    }

    /// 是否需要發佈到任何服務
    pub fn publishes(&self) -> bool {
        !self.repositories().is_empty()
    }

    /// 命令列 --force 覆蓋
    pub fn set_force(&mut self, force: bool) {
        self.repositories.get_or_insert_with(Default::default).force = force;
    }
}

impl ConfigProvider for TomlConfig {
    fn facts_path(&self) -> &str {
        &self.facts.path
    }

    fn submodel_id(&self) -> &str {
        &self.submodel.id
    }

    fn id_short(&self) -> Option<&str> {
        self.submodel.id_short.as_deref()
    }

    fn parent(&self) -> Option<&str> {
        self.submodel.parent.as_deref()
    }

    fn semantic_id(&self) -> Option<&str> {
        self.submodel.semantic_id.as_deref()
    }

    fn normalize_container_ids(&self) -> bool {
        self.submodel.normalize_container_ids
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_filename(&self) -> String {
        self.output
            .filename
            .clone()
            .unwrap_or_else(|| default_output_filename(&self.submodel.id))
    }

    fn repositories(&self) -> RepositoryEndpoints {
        let section = self.repositories.clone().unwrap_or_default();
        RepositoryEndpoints {
            submodel_repository: section.submodel_repository,
            shell_repository: section.shell_repository,
            submodel_registry: section.submodel_registry,
            shell_id: section.shell_id,
            force: section.force,
            timeout_seconds: section.timeout_seconds,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[submodel]
id = "urn:sm:host1"
parent = "urn:aas:host1"

[facts]
path = "facts/host1.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.submodel_id(), "urn:sm:host1");
        assert_eq!(config.parent(), Some("urn:aas:host1"));
        assert_eq!(config.id_short(), None);
        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.output_filename(), "urn_sm_host1.json");
        assert!(!config.normalize_container_ids());
        assert!(!config.publishes());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_repositories_section() {
        let toml_content = r#"
[submodel]
id = "sm_id"
normalize_container_ids = true

[facts]
path = "facts.json"

[output]
path = "./out"
filename = "host.json"

[repositories]
submodel_repository = "http://localhost:8081"
shell_repository = "http://localhost:8081"
submodel_registry = "http://localhost:8083"
shell_id = "shell_id"
timeout_seconds = 10
"#;

        let mut config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.normalize_container_ids());
        assert_eq!(config.output_filename(), "host.json");

        let endpoints = config.repositories();
        assert_eq!(endpoints.shell_id.as_deref(), Some("shell_id"));
        assert_eq!(endpoints.timeout_seconds, Some(10));
        assert!(endpoints.force);

        config.set_force(false);
        assert!(!config.repositories().force);
    }

    #[test]
    fn test_force_defaults_to_true_and_can_be_disabled() {
        let toml_content = r#"
[submodel]
id = "sm_id"

[facts]
path = "facts.json"

[repositories]
submodel_repository = "http://localhost:8081"
force = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(!config.repositories().force);

        let mut without_section =
            TomlConfig::from_toml_str("[submodel]\nid = \"sm_id\"\n\n[facts]\npath = \"facts.json\"\n")
                .unwrap();
        assert!(without_section.repositories().force);
        without_section.set_force(false);
        assert!(!without_section.repositories().force);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AAS_TEST_SUBMODEL_REPOSITORY", "http://repo.test:8081");

        let toml_content = r#"
[submodel]
id = "sm_id"

[facts]
path = "facts.json"

[repositories]
submodel_repository = "${AAS_TEST_SUBMODEL_REPOSITORY}"
shell_id = "${AAS_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let endpoints = config.repositories();
        assert_eq!(
            endpoints.submodel_repository.as_deref(),
            Some("http://repo.test:8081")
        );
        assert_eq!(
            endpoints.shell_id.as_deref(),
            Some("${AAS_TEST_UNSET_VARIABLE}")
        );

        std::env::remove_var("AAS_TEST_SUBMODEL_REPOSITORY");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[submodel]
id = "sm_id"

[facts]
path = "facts.json"

[repositories]
shell_repository = "http://localhost:8081"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            AasError::MissingConfigError { ref field } if field == "repositories.shell_id"
        ));

        let invalid_url = r#"
[submodel]
id = "sm_id"

[facts]
path = "facts.json"

[repositories]
submodel_repository = "not-a-url"
"#;
        let config = TomlConfig::from_toml_str(invalid_url).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let result = TomlConfig::from_toml_str("[facts]\npath = \"facts.json\"\n");
        assert!(matches!(
            result,
            Err(AasError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[submodel]
id = "file-test"

[facts]
path = "facts.json"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.submodel.id, "file-test");
        assert!(TomlConfig::from_file("does/not/exist.toml").is_err());
    }
}
