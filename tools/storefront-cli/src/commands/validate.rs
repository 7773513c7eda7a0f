//! Catalog audit command.

use anyhow::{bail, Result};
use storefront_catalog::prelude::*;

use super::ValidateArgs;
use crate::context::Context;
use crate::source::ProductSource;

/// Run the validate command.
pub async fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let source = ProductSource::resolve(&args.source, ctx)?;

    let spinner = ctx.output.spinner(&format!("Fetching {}", source.describe()));
    let fetched = source.fetch().await;
    spinner.finish_and_clear();
    let payload = fetched?;

    let report = audit_catalog(&payload);

    if ctx.output.is_json() {
        ctx.output.json(&report);
    } else {
        print_report(&report, args.max_issues, ctx);
    }

    if args.strict && !report.is_clean() {
        bail!(
            "{} issue(s) in {} of {} row(s)",
            report.issues.len(),
            report.flagged_records(),
            report.records
        );
    }

    Ok(())
}

fn print_report(report: &AuditReport, max_issues: usize, ctx: &Context) {
    ctx.output.header("Catalog audit");
    ctx.output.kv("Rows", &report.records.to_string());
    ctx.output.kv("Flagged rows", &report.flagged_records().to_string());
    ctx.output.kv("Issues", &report.issues.len().to_string());

    if report.is_clean() {
        ctx.output.success("No issues found");
        return;
    }

    ctx.output.info("");
    for issue in report.issues.iter().take(max_issues) {
        ctx.output.warn(&issue.to_string());
    }
    if report.issues.len() > max_issues {
        ctx.output.info(&format!(
            "... and {} more (use --max-issues to show them)",
            report.issues.len() - max_issues
        ));
    }
}
