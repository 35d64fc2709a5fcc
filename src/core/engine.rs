use crate::core::Pipeline;
use crate::domain::model::Diagnostic;
use crate::domain::ports::LoadReport;
use crate::utils::error::Result;

/// 一次執行的摘要
#[derive(Debug, Clone)]
pub struct RunReport {
    pub submodel_id: String,
    pub element_count: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub load: LoadReport,
}

pub struct SubmodelEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SubmodelEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("🚀 Starting submodel conversion");

        // Extract
        let facts = self.pipeline.extract().await?;
        tracing::info!("📥 Facts loaded ({} top-level keys)", facts.as_object().map_or(0, |o| o.len()));

        // Transform
        let conversion = self.pipeline.transform(facts).await?;
        let submodel_id = conversion.submodel.id.clone();
        let element_count = conversion.submodel.submodel_elements.len();
        let diagnostics = conversion.diagnostics.clone();
        tracing::info!(
            "🔧 Converted into {} submodel elements ({} diagnostics)",
            element_count,
            diagnostics.len()
        );

        // Load
        let load = self.pipeline.load(conversion).await?;
        tracing::info!("📁 Submodel saved to: {}", load.output_path);

        Ok(RunReport {
            submodel_id,
            element_count,
            diagnostics,
            load,
        })
    }
}
