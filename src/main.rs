use clap::Parser;
use plant_load_import::config::{LogFormat, ReportFormat};
use plant_load_import::core::measure;
use plant_load_import::core::{ConfigProvider, Pipeline, ProfileSeries, RunReport};
use plant_load_import::utils::{logger, validation::Validate};
use plant_load_import::{
    CliConfig, ImportEngine, InMemoryRegistry, LocalStorage, PlantLoadPipeline, TomlConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.describe {
        describe_measure();
        return Ok(());
    }

    // 載入 TOML 配置（若有）
    let toml = match &args.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(mut config) => {
                args.apply_overrides(&mut config);
                Some(config)
            }
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let log_format = toml
        .as_ref()
        .map(|c| c.log_format())
        .or(args.log_format)
        .unwrap_or_default();
    let log_level = toml.as_ref().and_then(|c| c.log_level());
    match log_format {
        LogFormat::Compact => logger::init_cli_logger(log_level, args.verbose),
        LogFormat::Json => logger::init_json_logger(log_level, args.verbose),
    }

    tracing::info!("Starting {}", measure::MEASURE_NAME);

    let success = match toml {
        Some(config) => {
            tracing::info!(
                "📁 Using configuration from: {}",
                args.config.as_deref().unwrap_or_default()
            );
            execute(config, args.report, args.dry_run).await?
        }
        None => {
            let report = args.report;
            let dry_run = args.dry_run;
            execute(args, report, dry_run).await?
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

async fn execute<C: ConfigProvider + Validate>(
    config: C,
    report_format: ReportFormat,
    dry_run: bool,
) -> anyhow::Result<bool> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        return Ok(false);
    }

    let storage = LocalStorage::new(config.base_dir().to_string());
    let registry = Arc::new(InMemoryRegistry::new());
    let pipeline = PlantLoadPipeline::new(storage, config, registry);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - schedules will not be registered");
        return perform_dry_run(&pipeline).await;
    }

    let engine = ImportEngine::new(pipeline);
    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Import completed successfully!");
            print_report(&report, report_format)?;
            Ok(true)
        }
        Err(e) => {
            tracing::error!(
                "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            Ok(false)
        }
    }
}

async fn perform_dry_run<P: Pipeline>(pipeline: &P) -> anyhow::Result<bool> {
    let outcome: plant_load_import::Result<Vec<ProfileSeries>> = async {
        pipeline.validate()?;
        let rows = pipeline.extract().await?;
        pipeline.transform(rows).await
    }
    .await;

    match outcome {
        Ok(series) => {
            println!("🔍 Dry Run Analysis:");
            for profile in &series {
                let values = profile.series.values();
                let (min, max) = values
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(*v), hi.max(*v))
                    });
                println!(
                    "  {} <- {} [{}]: {} points from {}, min {:.3}, max {:.3}",
                    profile.column.schedule_name(),
                    profile.column.source_column(),
                    profile.series.unit(),
                    values.len(),
                    profile.series.start(),
                    min,
                    max
                );
            }
            Ok(true)
        }
        Err(e) => {
            tracing::error!("❌ Dry run failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            Ok(false)
        }
    }
}

fn print_report(report: &RunReport, format: ReportFormat) -> anyhow::Result<()> {
    match format {
        ReportFormat::Json => println!("{}", report.to_json()?),
        ReportFormat::Text => {
            println!("📋 Import Summary:");
            println!("  File: {}", report.file);
            println!("  Rows: {}", report.rows);
            for name in &report.created {
                println!("  ✅ {}", name);
            }
            for name in &report.skipped {
                println!("  ⚠️ {} (skipped)", name);
            }
            println!(
                "  Model started with {} Schedule:FixedInterval and ended with {}",
                report.schedules_before, report.schedules_after
            );
        }
    }
    Ok(())
}

fn describe_measure() {
    println!("{}", measure::MEASURE_NAME);
    println!();
    println!("{}", measure::description());
    println!();
    println!("{}", measure::modeler_description());
    println!();
    println!("Arguments:");
    for argument in measure::arguments() {
        println!(
            "  {} ({}{}): {}",
            argument.name,
            argument.display_name,
            if argument.required { ", required" } else { "" },
            argument.description
        );
    }
}
