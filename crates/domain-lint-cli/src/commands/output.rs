//! Shared output formatting for lint results.

use anyhow::Result;
use domain_lint_core::{LintResult, Severity, ViolationDiagnostic};
use miette::GraphicalReportHandler;
use std::fmt::Write as _;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is where violation paths are relative to; `pretty` output reads
/// sources from there.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Pretty => render_pretty(result, root, &GraphicalReportHandler::new()),
    };
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

fn render_text(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    let mut out = String::new();

    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        let _ = writeln!(out, "  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            let _ = writeln!(out, "  = help: {}", suggestion.message);
        }
        out.push('\n');
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    let _ = write!(
        out,
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
    out
}

fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_pretty(result: &LintResult, root: &Path, handler: &GraphicalReportHandler) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let source = std::fs::read_to_string(root.join(&violation.location.file))
            .unwrap_or_else(|e| {
                tracing::warn!("Cannot read {}: {}", violation.location.file.display(), e);
                String::new()
            });
        let diagnostic = ViolationDiagnostic::new(violation, source);
        if handler.render_report(&mut out, &diagnostic).is_err() {
            let _ = writeln!(out, "{violation}");
        }
    }
    out
}
