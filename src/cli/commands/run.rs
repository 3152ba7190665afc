use anyhow::{ anyhow, Result };
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::cli::commands::suite_source;
use crate::cli::{ report, ui, OutputFormat };
use crate::config::HarnessConfig;
use crate::harness::{ load_suite, Aggregator, VerificationDriver };
use crate::implementations::mcrl2::Mcrl2Checker;
use crate::models::model::Template;
use crate::traits::model_checker::ModelChecker;

/// Test run command; returns whether every case matched
pub async fn execute(
    config: &HarnessConfig,
    file: Option<&Path>,
    format: OutputFormat,
    show_progress: bool
) -> Result<bool> {
    let template = Template::load(&config.template).map_err(|e| anyhow!("Cannot load template: {}", e))?;
    info!("Using template {}", template.path.display());

    let suite = load_suite(&suite_source(config, file), Arc::new(template))?;

    let checker: Arc<dyn ModelChecker> = Arc::new(Mcrl2Checker::new(config.tools.clone()));
    let aggregator = Aggregator::new(VerificationDriver::new(checker, config.jobs()));

    let progress = if format == OutputFormat::Text && show_progress && suite.case_count() > 0 {
        Some(ui::create_progress_bar(suite.case_count() as u64, "checking traces"))
    } else {
        None
    };

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let report = aggregator.run_until(&suite, shutdown, |result| {
        if let Some(pb) = &progress {
            pb.inc(1);
            if !result.is_match() {
                pb.set_message(format!("{} failing", result.id.location()));
            }
        }
    }).await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match format {
        OutputFormat::Text => report::print_text(&report),
        OutputFormat::Json => println!("{}", report::to_json(&report)?),
    }

    Ok(report.is_success())
}
