//! UI helpers for the installer CLI.
//!
//! Provides consistent formatting for console output during installation.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{InstallContext, InstallerSettings};

/// Print the installer banner.
pub fn print_banner() {
    println!("{}", "═".repeat(60).bright_black());
    println!(
        "{}",
        "Media Library Source Worker - Installation".cyan().bold()
    );
    println!("{}", "═".repeat(60).bright_black());
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", "═".repeat(60).bright_black());
    println!("{}", title.cyan().bold());
    println!("{}", "═".repeat(60).bright_black());
}

/// Print a heading for an interactive prompt group.
pub fn print_heading(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Print a step indicator with message.
pub fn print_step(message: &str) {
    println!();
    println!("{} {}", "▶".cyan(), message.bold());
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a key-value pair.
pub fn print_kv(key: &str, value: &str) {
    println!("  {} {}", format!("{key}:").bright_black(), value.green());
}

/// Print a list item.
pub fn print_list_item(item: &str) {
    println!("  {} {item}", "•".bright_black());
}

/// Start a spinner for a captured command that may take a while.
#[must_use]
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Print the end-of-run summary and the hand-off hint.
pub fn print_summary(ctx: &InstallContext, settings: &InstallerSettings) {
    println!();
    println!("{}", "═".repeat(60).bright_black());
    print_success("Installation completed successfully!");
    println!("{}", "═".repeat(60).bright_black());
    print_kv("Repository location", &ctx.repo_path.display().to_string());
    print_kv("Configuration mode", ctx.mode.label());
    print_kv("Library path", &ctx.library_path);
    print_kv("Movie collection", &ctx.movie_collection_path);
    print_kv("TV collection", &ctx.tv_collection_path);
    println!();
    println!();
    println!(
        "Please log in at {} and click \"Refresh Index\" to scan your library.",
        settings.portal_url.cyan()
    );
}
