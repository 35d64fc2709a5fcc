use aas_submodel::core::ConfigProvider;
use aas_submodel::utils::{logger, validation::Validate};
use aas_submodel::{LocalStorage, SubmodelAssembler, SubmodelEngine, SubmodelPipeline, TomlConfig};
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "aas-publish")]
#[command(about = "Convert facts into an AAS submodel and publish it using a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "aas-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override repositories.force from config
    #[arg(long)]
    force: Option<bool>,

    /// Dry run - convert and print the submodel without writing or publishing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based submodel publisher");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(force) = args.force {
        config.set_force(force);
        tracing::info!("🔧 Force overridden to: {}", force);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written or published");
        return perform_dry_run(&config);
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = SubmodelPipeline::new(storage, config);
    let engine = SubmodelEngine::new(pipeline);

    let report = engine
        .run()
        .await
        .context("submodel conversion or publishing failed")?;

    println!("✅ Submodel '{}' processed successfully!", report.submodel_id);
    println!("📁 Output saved to: {}", report.load.output_path);
    for step in &report.load.published {
        let marker = if step.changed { "📤" } else { "➖" };
        println!("{} {} ({})", marker, step.target, step.status);
    }
    if !report.load.changed() && !report.load.published.is_empty() {
        println!("ℹ️ Remote services were already up to date");
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let endpoints = config.repositories();

    println!("📋 Configuration Summary:");
    println!("  Submodel: {}", config.submodel_id());
    println!("  Facts: {}", config.facts_path());
    println!("  Output: {}/{}", config.output_path(), config.output_filename());

    if let Some(parent) = config.parent() {
        println!("  Parent shell: {}", parent);
    }
    if let Some(repository) = &endpoints.submodel_repository {
        println!("  Submodel repository: {}", repository);
    }
    if let Some(repository) = &endpoints.shell_repository {
        println!(
            "  Shell repository: {} (shell: {})",
            repository,
            endpoints.shell_id.as_deref().unwrap_or("-")
        );
    }
    if let Some(registry) = &endpoints.submodel_registry {
        println!("  Submodel registry: {}", registry);
    }
    println!("  Force: {}", endpoints.force);

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let facts = std::fs::read(config.facts_path())
        .with_context(|| format!("cannot read facts file '{}'", config.facts_path()))?;
    let facts: serde_json::Value =
        serde_json::from_slice(&facts).context("facts file is not valid JSON")?;

    let conversion = SubmodelAssembler::new()
        .id_short(config.id_short())
        .parent(config.parent())
        .semantic_id(config.semantic_id())
        .normalize_container_ids(config.normalize_container_ids())
        .assemble(config.submodel_id(), &facts)?;

    println!("{}", conversion.to_json_string_pretty()?);
    for diagnostic in &conversion.diagnostics {
        println!("⚠️ {}: {:?}", diagnostic.path, diagnostic.kind);
    }
    println!();
    println!("✅ Dry run complete. Run without --dry-run to write and publish.");

    Ok(())
}
