//! `cargo xtask validate`: schema and invariant checks over the project corpus.

use crate::catalog::{self, ProjectSchema, ValidationSummary};
use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::XtaskCommand;
use chrono::{SecondsFormat, Utc};
use std::path::{Path, PathBuf};

/// `cargo xtask validate`
pub struct ValidateCommand;

/// Parsed `validate` options.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidateOptions {
    /// Write the JSON report.
    pub write_report: bool,
    /// Report location; the standard artifact path when absent.
    pub report_path: Option<PathBuf>,
    /// Print usage and exit.
    pub show_help: bool,
}

impl XtaskCommand for ValidateCommand {
    type Options = ValidateOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        parse_validate_options(args)
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        if options.show_help {
            print_validate_usage();
            return Ok(());
        }
        let report = options.write_report.then(|| {
            options.report_path.map_or_else(
                || ctx.artifacts().validation_report(),
                |path| ctx.artifacts().resolve_path(&path),
            )
        });
        validate_projects(ctx, report.as_deref())
    }
}

fn parse_validate_options(args: &[String]) -> XtaskResult<ValidateOptions> {
    let mut options = ValidateOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--report" => {
                let value = args.get(i + 1).filter(|v| !v.starts_with('-'));
                options.write_report = true;
                options.report_path = value.map(PathBuf::from);
                i += if value.is_some() { 2 } else { 1 };
            }
            "help" | "--help" | "-h" => {
                options.show_help = true;
                i += 1;
            }
            other => {
                return Err(XtaskError::validation(format!(
                    "unknown argument for `validate`: {other}"
                ))
                .with_hint("run `cargo xtask validate --help`"))
            }
        }
    }
    Ok(options)
}

fn print_validate_usage() {
    eprintln!(
        "Usage: cargo xtask validate [--report [path]]\n\
         \n\
         Validate every project record against the schema and catalog rules.\n\
         \n\
         Options:\n\
           --report [path]   Also write a JSON summary (default: .artifacts/catalog-validation.json)\n"
    );
}

/// Validate the configured corpus, printing one line per problem and a summary.
///
/// Fails with a validation error when any record has a problem. Unreadable or malformed inputs
/// abort before anything is printed.
pub fn validate_projects(ctx: &CommandContext, report: Option<&Path>) -> XtaskResult<()> {
    let root = ctx.root();
    let config = ctx.config();
    let projects_dir = config.projects_dir(root);
    catalog::require_dir(&projects_dir).map_err(|err| err.with_operation("validate"))?;

    let mut dirs = vec![projects_dir];
    dirs.extend(config.extra_validation_dirs(root));

    let schema = ProjectSchema::load(&config.schema_path(root))?;
    let files = catalog::read_corpus(root, &dirs)?;
    let summary = catalog::validate_corpus(&schema, &files);

    if let Some(path) = report {
        let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let body = serde_json::to_string_pretty(&catalog::validation_report(
            &files,
            &summary,
            generated_at,
        ))
        .map_err(|err| XtaskError::io(format!("failed to serialize validation report: {err}")))?;
        ctx.artifacts().write_text(path, &format!("{body}\n"))?;
        println!("validation report: {}", catalog::rel_posix(root, path));
    }

    if files.is_empty() {
        println!("No project files found.");
        return Ok(());
    }

    let lines = SummaryLines::from_summary(&summary);
    for line in &lines.passed {
        println!("{line}");
    }
    for line in &lines.failed {
        eprintln!("{line}");
    }
    if summary.is_clean() {
        println!("\nAll {} project file(s) are valid.", summary.files.len());
        return Ok(());
    }

    let failing = summary.files.iter().filter(|f| !f.is_valid()).count();
    eprintln!(
        "\nFAILED: {} issue(s) in {failing} file(s)",
        summary.problem_count()
    );
    Err(XtaskError::validation("project validation failed")
        .with_operation("validate")
        .with_hint("fix the records listed above"))
}

/// Per-file output: success lines for stdout, problem lines for stderr.
#[derive(Debug, Default, PartialEq, Eq)]
struct SummaryLines {
    passed: Vec<String>,
    failed: Vec<String>,
}

impl SummaryLines {
    fn from_summary(summary: &ValidationSummary) -> Self {
        let mut lines = Self::default();
        for file in &summary.files {
            if file.is_valid() {
                lines.passed.push(format!("ok   {}", file.rel_path));
                continue;
            }
            lines.failed.extend(
                file.problems
                    .iter()
                    .map(|p| format!("[{}] {} - {}", p.check, p.path, p.message)),
            );
        }
        lines
    }
}
