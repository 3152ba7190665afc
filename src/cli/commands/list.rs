use anyhow::Result;
use colored::*;
use std::path::Path;
use std::sync::Arc;

use crate::cli::commands::suite_source;
use crate::cli::{ ui, OutputFormat };
use crate::config::HarnessConfig;
use crate::harness::{ load_suite, Definition };
use crate::models::model::Template;

/// List the cases of a suite without running the checker
pub fn execute(config: &HarnessConfig, file: Option<&Path>, format: OutputFormat) -> Result<bool> {
    // Listing never instantiates models, so the template is not read.
    let template = Arc::new(Template::from_text(&config.template, ""));
    let suite = load_suite(&suite_source(config, file), template)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&suite.files())?);
        return Ok(suite.setup_errors.is_empty());
    }

    for definition in &suite.definitions {
        println!("{}", definition.path().display().to_string().bold());
        let directives = match definition {
            Definition::Property(property) => &property.directives,
            Definition::Collection(collection) => {
                let names = collection.members
                    .iter()
                    .map(|m| m.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" ∧ ");
                println!("  conjunction of {}", names);
                &collection.case.directives
            }
        };
        if directives.is_empty() {
            println!("  (no tests)");
        }
        for directive in directives {
            println!("  line {:<4} {} {}", directive.line, directive.expected, directive.trace.describe());
        }
    }

    for setup_error in &suite.setup_errors {
        ui::print_error(&setup_error.message);
    }
    ui::print_result("Cases", &suite.case_count().to_string());

    Ok(suite.setup_errors.is_empty())
}
