//! Catalog maintenance commands for the Naija AI Index (`cargo xtask`).
//!
//! The crate is organized as a small CLI layer over a shared automation runtime. Command modules
//! own workflow-specific policy, [`catalog`] owns the pure validation and rendering rules, and
//! [`runtime`] owns configuration, artifact writes, workflow recording, and environment lookup.

pub mod catalog;
pub mod catalog_config;
pub mod cli;
pub mod commands;
pub mod runtime;

use crate::cli::TopLevelCommand;
use crate::commands::all::AllCommand;
use crate::commands::data::DataCommand;
use crate::commands::readme::ReadmeCommand;
use crate::commands::seo::SeoCommand;
use crate::commands::validate::ValidateCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;

/// Shared command contract for top-level xtask command families.
///
/// Each command owns its own typed option parsing while sharing the same runtime services through
/// [`CommandContext`]. [`XtaskCommand::parse`] is a pure translation from raw CLI arguments into
/// typed options; side effects belong in [`XtaskCommand::run`].
pub trait XtaskCommand {
    /// Typed options produced by CLI parsing for the command family.
    type Options;

    /// Parse command-line arguments into typed options.
    ///
    /// Implementations return [`XtaskError::validation`](crate::runtime::error::XtaskError::validation)
    /// for invalid argument shapes.
    fn parse(args: &[String]) -> XtaskResult<Self::Options>;

    /// Execute the command using the shared runtime context.
    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()>;
}

/// Executes the `xtask` binary using the current process arguments.
///
/// Parses the top-level command first so `help` and argument errors never touch the workspace,
/// then builds a [`CommandContext`] and delegates to the owning command.
pub fn execute_from_env() -> XtaskResult<()> {
    let parsed = cli::parse(std::env::args().skip(1).collect())?;
    if parsed == TopLevelCommand::Help {
        cli::print_usage();
        return Ok(());
    }

    let ctx = CommandContext::new()?;
    execute(&ctx, parsed)
}

/// Run an already-parsed top-level command against `ctx`.
pub fn execute(ctx: &CommandContext, command: TopLevelCommand) -> XtaskResult<()> {
    match command {
        TopLevelCommand::Validate(args) => ValidateCommand::run(ctx, ValidateCommand::parse(&args)?),
        TopLevelCommand::Data(args) => DataCommand::run(ctx, DataCommand::parse(&args)?),
        TopLevelCommand::Readme(args) => ReadmeCommand::run(ctx, ReadmeCommand::parse(&args)?),
        TopLevelCommand::Seo(args) => SeoCommand::run(ctx, SeoCommand::parse(&args)?),
        TopLevelCommand::All(args) => AllCommand::run(ctx, AllCommand::parse(&args)?),
        TopLevelCommand::Help => {
            cli::print_usage();
            Ok(())
        }
    }
}

/// Converts an xtask result into a stable process exit code.
///
/// All command failures map to exit code `1` after printing the formatted error to stderr.
pub fn exit_code(result: XtaskResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(1)
        }
    }
}
