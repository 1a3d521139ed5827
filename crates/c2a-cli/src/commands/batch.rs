use crate::cli::BatchArgs;
use crate::config::PartialBatchConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use charmm2amoeba::{engine::progress::ProgressReporter, workflows};
use std::time::Instant;
use tracing::{info, warn};

pub async fn run(args: BatchArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialBatchConfig::load_optional(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_cli(&args)?;
    let config = settings.conversion;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Converting structures from {} into {}...",
        config.input_dir.display(),
        config.output_dir.display()
    );
    let started = Instant::now();
    let report = tokio::task::block_in_place(|| workflows::batch::run(&config, &reporter))?;
    info!("Batch finished in {} ms.", started.elapsed().as_millis());

    if let Some(report_path) = &settings.report_path {
        info!("Writing conversion report to {:?}", report_path);
        report
            .write_csv(report_path)
            .map_err(|e| CliError::FileWriting {
                path: report_path.clone(),
                source: e.into(),
            })?;
    }

    if report.is_empty() {
        warn!("No structures were converted.");
        println!(
            "Warning: no '.{}' files found in {}.",
            config.extensions.coordinate,
            config.input_dir.display()
        );
        return Ok(());
    }

    let converted = report.succeeded().count();
    println!(
        "✓ Converted {} of {} structure(s) ({} atoms) into {}",
        converted,
        report.len(),
        report.total_atoms(),
        config.output_dir.display()
    );
    for outcome in report.failed() {
        if let Err(e) = &outcome.result {
            println!("  ✗ {}: {}", outcome.pair.name, e);
        }
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::BatchFailed {
            failed: report.len() - converted,
            total: report.len(),
        })
    }
}
