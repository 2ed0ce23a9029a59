//! Top-level command families.

pub mod all;
pub mod data;
pub mod readme;
pub mod seo;
pub mod validate;

use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use std::path::Path;

/// Options shared by the generator commands (`data`, `readme`, `seo`).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GenerateOptions {
    /// Compare rendered output with the files on disk instead of writing.
    pub check: bool,
    /// Print usage and exit.
    pub show_help: bool,
}

pub(crate) fn parse_generate_options(command: &str, args: &[String]) -> XtaskResult<GenerateOptions> {
    let mut options = GenerateOptions::default();
    for arg in args {
        match arg.as_str() {
            "--check" => options.check = true,
            "help" | "--help" | "-h" => options.show_help = true,
            other => {
                return Err(XtaskError::validation(format!(
                    "unknown argument for `{command}`: {other}"
                ))
                .with_hint(format!("run `cargo xtask {command} --help`")))
            }
        }
    }
    Ok(options)
}

pub(crate) fn print_generate_usage(command: &str, summary: &str) {
    eprintln!(
        "Usage: cargo xtask {command} [--check]\n\
         \n\
         {summary}\n\
         \n\
         Options:\n\
           --check    Fail if the generated output differs from the file on disk; write nothing\n"
    );
}

/// Write a generated artifact, or under `--check` fail when the file on disk has drifted.
pub(crate) fn write_or_check(
    ctx: &CommandContext,
    command: &str,
    path: &Path,
    contents: &str,
    check: bool,
) -> XtaskResult<()> {
    write_or_check_all(ctx, command, &[(path, contents)], check)
}

/// Write a set of generated artifacts together, or under `--check` compare every one of them
/// and fail naming all drifted files.
pub(crate) fn write_or_check_all(
    ctx: &CommandContext,
    command: &str,
    outputs: &[(&Path, &str)],
    check: bool,
) -> XtaskResult<()> {
    if !check {
        return ctx.artifacts().write_all_text(outputs);
    }

    let mut drifted = Vec::new();
    for (path, contents) in outputs {
        let rel = crate::catalog::rel_posix(ctx.root(), path);
        if ctx.artifacts().is_up_to_date(path, contents)? {
            println!("{rel} is up to date.");
        } else {
            drifted.push(rel);
        }
    }
    if drifted.is_empty() {
        return Ok(());
    }
    let mut err = XtaskError::validation(format!("{} is out of date", drifted.join(", ")))
        .with_operation(format!("{command} --check"))
        .with_hint(format!("run `cargo xtask {command}` and commit the result"));
    if let [(path, _)] = outputs {
        err = err.with_path(path);
    }
    Err(err)
}
