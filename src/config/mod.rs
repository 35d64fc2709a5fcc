#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::domain::ports::RepositoryEndpoints;
use crate::utils::error::Result;
use crate::utils::validation::{validate_optional_url, validate_range, validate_required_field};

/// 由 submodel id 產生可安全當檔名的輸出檔名
pub fn default_output_filename(submodel_id: &str) -> String {
    let stem: String = submodel_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "submodel.json".to_string()
    } else {
        format!("{}.json", stem)
    }
}

/// 共用的發佈設定檢查
pub(crate) fn validate_endpoints(prefix: &str, endpoints: &RepositoryEndpoints) -> Result<()> {
    validate_optional_url(
        &format!("{}submodel_repository", prefix),
        endpoints.submodel_repository.as_deref(),
    )?;
    validate_optional_url(
        &format!("{}shell_repository", prefix),
        endpoints.shell_repository.as_deref(),
    )?;
    validate_optional_url(
        &format!("{}submodel_registry", prefix),
        endpoints.submodel_registry.as_deref(),
    )?;

    if endpoints.shell_repository.is_some() {
        validate_required_field(&format!("{}shell_id", prefix), &endpoints.shell_id)?;
    }
    if endpoints.submodel_registry.is_some() {
        validate_required_field(
            &format!("{}submodel_repository", prefix),
            &endpoints.submodel_repository,
        )?;
    }
    if let Some(timeout) = endpoints.timeout_seconds {
        validate_range(&format!("{}timeout_seconds", prefix), timeout, 1, 300)?;
    }

    Ok(())
}
