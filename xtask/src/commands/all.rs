//! `cargo xtask all`: the full catalog pipeline as one recorded workflow.

use super::data::compile_dataset;
use super::readme::update_readme;
use super::seo::generate_seo_files;
use super::validate::validate_projects;
use super::{parse_generate_options, GenerateOptions};
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;
use crate::XtaskCommand;

/// `cargo xtask all`
pub struct AllCommand;

impl XtaskCommand for AllCommand {
    type Options = GenerateOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        parse_generate_options("all", args)
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        if options.show_help {
            print_all_usage();
            return Ok(());
        }
        run_pipeline(ctx, options.check)
    }
}

fn print_all_usage() {
    eprintln!(
        "Usage: cargo xtask all [--check]\n\
         \n\
         Run validate, data, readme, and seo in order, stopping at the first failure.\n\
         Each run is recorded under .artifacts/automation/runs/.\n\
         \n\
         Options:\n\
           --check    Verify generated files instead of writing them\n"
    );
}

/// Validate, then regenerate (or verify) every derived artifact.
///
/// Stages run in dependency order; the SEO stage reads the dataset the data stage produced.
pub fn run_pipeline(ctx: &CommandContext, check: bool) -> XtaskResult<()> {
    let workflow = if check { "catalog-check" } else { "catalog" };
    ctx.workflow().with_workflow_run(workflow, |run| {
        run.stage("Validate project records", || validate_projects(ctx, None))?;
        run.stage("Compile project dataset", || compile_dataset(ctx, check))?;
        run.stage("Update README project tables", || update_readme(ctx, check))?;
        run.stage("Generate sitemap and robots.txt", || {
            generate_seo_files(ctx, check)
        })
    })
}
