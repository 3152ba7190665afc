use anyhow::Result;
use colored::*;

use crate::cli::ui;
use crate::models::report::RunReport;
use crate::models::verification::{ CaseStatus, Outcome, TestResult };
use crate::models::{ CaseKind, ExpectedVerdict };

/// Print a run report as human readable text
pub fn print_text(report: &RunReport) {
    for file in &report.files {
        if file.cases == 0 {
            println!("No tests in `{}`", file.path.display());
            continue;
        }
        println!("Running {} test(s) in `{}`", file.cases, file.path.display());
        for result in report.results_for(&file.path) {
            print_result_line(result);
        }
    }

    if !report.setup_errors.is_empty() {
        ui::print_header("Setup errors");
        for setup_error in &report.setup_errors {
            ui::print_error(&setup_error.message);
        }
    }

    if report.aborted {
        ui::print_warning("Run aborted; the counts below only cover completed cases.");
    }

    let summary = &report.summary;
    println!();
    ui::print_result("Total tests", &summary.total.to_string());
    ui::print_result("Failed tests", &summary.failed().to_string());
    if summary.tool_failures > 0 {
        ui::print_result("  of which tool failures", &summary.tool_failures.to_string());
    }
    if summary.setup_errors > 0 {
        ui::print_result("Setup errors", &summary.setup_errors.to_string());
    }

    if report.is_success() {
        ui::print_success("All tests passed");
    } else {
        ui::print_error("Some tests did not pass");
    }
}

fn print_result_line(result: &TestResult) {
    println!(
        "{}  line {:<4} {} {}",
        ui::status_label(result.status),
        result.id.line,
        result.expected,
        result.trace.describe().bold()
    );

    match result.status {
        CaseStatus::Match => {}
        CaseStatus::Mismatch => {
            if let Some(e) = result.to_error() {
                ui::print_wrapped(&e.to_string(), "              ");
            }
            // A missed PASS on a collection: say which members were violated.
            if result.id.kind == CaseKind::Collection && result.expected == ExpectedVerdict::Pass {
                for member in result.violated_members() {
                    ui::print_wrapped(
                        &format!("did not succeed for the property `{}`", member.property),
                        "                - "
                    );
                }
            }
        }
        CaseStatus::ToolFailure => {
            if let Outcome::ToolFailure { failure } = &result.outcome {
                ui::print_wrapped(&failure.to_string(), "              ");
            }
        }
    }
}

/// Serialize a run report as pretty JSON
pub fn to_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
