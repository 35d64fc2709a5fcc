pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::storage::LocalStorage;
pub use crate::core::assemble::{assemble, convert, SubmodelAssembler};
pub use crate::core::{engine::SubmodelEngine, pipeline::SubmodelPipeline};
pub use utils::error::{AasError, Result};
