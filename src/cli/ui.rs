use colored::*;
use console::Term;
use indicatif::{ ProgressBar, ProgressStyle };
use textwrap::{ wrap, Options };

use crate::models::verification::CaseStatus;

fn terminal_width() -> usize {
    match Term::stdout().size_checked() {
        Some((_, width)) => width as usize,
        None => 100,
    }
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text wrapped to the terminal width with a hanging indent
pub fn print_wrapped(text: &str, indent: &str) {
    let width = terminal_width().saturating_sub(2).max(40);
    let options = Options::new(width).initial_indent(indent).subsequent_indent(indent);
    for line in text.lines() {
        for wrapped_line in wrap(line, &options) {
            println!("{}", wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Case status with color
pub fn status_label(status: CaseStatus) -> ColoredString {
    let label = format!("{:>12}", status.to_string());
    match status {
        CaseStatus::Match => label.green(),
        CaseStatus::Mismatch => label.red().bold(),
        CaseStatus::ToolFailure => label.yellow().bold(),
    }
}

/// Create a new progress bar
pub fn create_progress_bar(length: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}
