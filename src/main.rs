use aas_submodel::core::engine::RunReport;
use aas_submodel::utils::{logger, validation::Validate};
use aas_submodel::{CliConfig, LocalStorage, SubmodelEngine, SubmodelPipeline};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting aas-submodel CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 路徑都以目前目錄為基準
    let storage = LocalStorage::new(".".to_string());
    let pipeline = SubmodelPipeline::new(storage, config);
    let engine = SubmodelEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => print_report(&report),
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    println!("✅ Submodel '{}' converted successfully!", report.submodel_id);
    println!("📁 Output saved to: {}", report.load.output_path);
    println!("🧩 Top-level elements: {}", report.element_count);

    if !report.diagnostics.is_empty() {
        println!("⚠️ {} keys were dropped, skipped or rewritten", report.diagnostics.len());
    }

    for step in &report.load.published {
        let marker = if step.changed { "📤" } else { "➖" };
        println!("{} {} ({})", marker, step.target, step.status);
    }
}
