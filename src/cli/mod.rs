//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use std::io::Write;

use userfetch::cache::CacheStats;

/// Print the widget header to stderr.
pub fn print_header() {
    use colored::Colorize;
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle);
    let _ = writeln!(handle, "  {}", userfetch::constants::HEADER.bold());
    let _ = writeln!(
        handle,
        "  {}",
        "Press Enter to get a random user, q to quit.".dimmed()
    );
    let _ = writeln!(handle);
    let _ = handle.flush();
}

/// Print the end-of-session cache summary to stderr.
pub fn print_cache_summary(stats: CacheStats, ids: &[u32]) {
    use colored::Colorize;
    let ids: Vec<String> = ids.iter().map(u32::to_string).collect();
    if ids.is_empty() {
        eprintln!("  {}", stats.summary().dimmed());
    } else {
        eprintln!(
            "  {} {}",
            stats.summary().dimmed(),
            format!("(ids: {})", ids.join(", ")).dimmed()
        );
    }
}
