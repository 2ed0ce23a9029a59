//! `cargo xtask readme`: regenerate the project tables inside README.md.

use super::{parse_generate_options, print_generate_usage, write_or_check, GenerateOptions};
use crate::catalog::{self, render_projects_section, splice_projects_section};
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;
use crate::XtaskCommand;

/// `cargo xtask readme`
pub struct ReadmeCommand;

impl XtaskCommand for ReadmeCommand {
    type Options = GenerateOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        parse_generate_options("readme", args)
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        if options.show_help {
            print_generate_usage(
                "readme",
                "Rewrite the project tables between the BEGIN/END PROJECTS markers in README.md.",
            );
            return Ok(());
        }
        update_readme(ctx, options.check)
    }
}

/// Splice freshly rendered tables into the README, or verify them under `check`.
pub fn update_readme(ctx: &CommandContext, check: bool) -> XtaskResult<()> {
    let root = ctx.root();
    let config = ctx.config();
    let records = catalog::load_projects(root, &config.projects_dir(root))
        .map_err(|err| err.with_operation("readme"))?;

    let readme_path = config.readme_path(root);
    let current = catalog::read_text(&readme_path)?;
    let updated = splice_projects_section(&current, &render_projects_section(&records))
        .map_err(|err| err.with_operation("readme").with_path(&readme_path))?;

    write_or_check(ctx, "readme", &readme_path, &updated, check)?;
    if !check {
        println!(
            "Updated {} with {} projects.",
            catalog::rel_posix(root, &readme_path),
            records.len()
        );
    }
    Ok(())
}
