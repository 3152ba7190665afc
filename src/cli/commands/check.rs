use anyhow::Result;

use crate::cli::ui;
use crate::config::HarnessConfig;
use crate::implementations::mcrl2::Mcrl2Checker;
use crate::traits::model_checker::ToolBackend;

/// Tool availability command
pub async fn execute(config: &HarnessConfig) -> Result<bool> {
    ui::print_header("Checking mCRL2 tools");

    match config.tools.effective_bin_dir() {
        Some(dir) => ui::print_info(&format!("Tool directory: {}", dir.display())),
        None => ui::print_info("Tools are looked up on PATH"),
    }

    let checker = Mcrl2Checker::new(config.tools.clone());
    let mut all_available = true;
    for status in checker.check_tools().await {
        if status.available {
            ui::print_success(&format!("{} ({})", status.command, status.detail));
        } else {
            all_available = false;
            ui::print_error(&format!("{}: {}", status.command, status.detail));
        }
    }

    if config.template.is_file() {
        ui::print_success(&format!("Template {}", config.template.display()));
    } else {
        all_available = false;
        ui::print_warning(&format!("Template {} not found", config.template.display()));
    }

    Ok(all_available)
}
