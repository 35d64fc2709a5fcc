pub mod assemble;
pub mod classify;
pub mod engine;
pub mod normalize;
pub mod pipeline;
pub mod reference;
pub mod tree;

pub use crate::domain::model::Conversion;
pub use crate::domain::ports::{ConfigProvider, LoadReport, Pipeline, PublishStep, Storage};
pub use crate::utils::error::Result;
