//! `cargo xtask data`: compile project records into the front-end dataset.

use super::{parse_generate_options, print_generate_usage, write_or_check, GenerateOptions};
use crate::catalog::{self, render_dataset};
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;
use crate::XtaskCommand;

/// `cargo xtask data`
pub struct DataCommand;

impl XtaskCommand for DataCommand {
    type Options = GenerateOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        parse_generate_options("data", args)
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        if options.show_help {
            print_generate_usage(
                "data",
                "Compile data/projects/*.yaml into the JSON dataset consumed by the web app.",
            );
            return Ok(());
        }
        compile_dataset(ctx, options.check)
    }
}

/// Compile the corpus into the dataset file, or verify it under `check`.
///
/// Every record is parsed before anything is written.
pub fn compile_dataset(ctx: &CommandContext, check: bool) -> XtaskResult<()> {
    let root = ctx.root();
    let config = ctx.config();
    let records = catalog::load_projects(root, &config.projects_dir(root))
        .map_err(|err| err.with_operation("data"))?;
    let rendered = render_dataset(&records)?;
    let output = config.dataset_path(root);

    write_or_check(ctx, "data", &output, &rendered, check)?;
    if !check {
        println!(
            "Generated {} with {} projects.",
            catalog::rel_posix(root, &output),
            records.len()
        );
    }
    Ok(())
}
