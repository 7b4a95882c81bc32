// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::error::{Severity, WeightFileError};
use crate::io::DecodedFile;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report the header and group summary of a decoded file
    pub fn report_inspect(file: &str, decoded: &DecodedFile) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        let header = &decoded.header;
        let fields = [
            ("Name", &header.name),
            ("Author", &header.author),
            ("License", &header.license),
            ("Version", &header.version),
            ("Description", &header.description),
        ];
        for (label, value) in fields {
            println!(
                "  {} {}",
                format!("{}:", label).bright_black(),
                value.as_deref().unwrap_or("-")
            );
        }

        println!(
            "\n{} {} groups, {} entries",
            "Weights:".bold(),
            decoded.weights.len().to_string().cyan(),
            decoded.weights.entry_count().to_string().cyan()
        );
        for (name, group) in &decoded.weights {
            let count = if group.is_empty() {
                "empty".yellow()
            } else {
                group.len().to_string().green()
            };
            println!("  {:<32} {}", name, count);
        }

        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a finished export or import
    pub fn report_transfer(action: &str, file: &str, groups: usize, entries: usize, duration: Duration) {
        println!(
            "{} {} {} ({} groups, {} entries) in {}",
            "✅".green(),
            action.green(),
            file.cyan(),
            groups,
            entries,
            Self::format_duration(duration).yellow()
        );
    }

    /// Report a weight file error under its category title. `message` is
    /// the full error text including any context it was wrapped in.
    pub fn report_weight_error(err: &WeightFileError, message: &str) {
        let text = Self::titled(err, message);
        match err.severity() {
            Severity::Error => Self::report_error(&text),
            Severity::Warning => Self::report_warning(&text),
        }
    }

    fn titled(err: &WeightFileError, message: &str) -> String {
        format!("{}: {}", err.title(), message)
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        eprintln!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
