//! Top-level CLI parsing and help output.

use crate::runtime::error::{XtaskError, XtaskResult};

/// Top-level `xtask` commands. Each variant carries its remaining raw arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopLevelCommand {
    Validate(Vec<String>),
    Data(Vec<String>),
    Readme(Vec<String>),
    Seo(Vec<String>),
    All(Vec<String>),
    Help,
}

/// Parse raw command-line arguments into a top-level command selection.
pub fn parse(args: Vec<String>) -> XtaskResult<TopLevelCommand> {
    let Some(cmd) = args.first().cloned() else {
        return Ok(TopLevelCommand::Help);
    };

    let rest = args[1..].to_vec();
    match cmd.as_str() {
        "validate" => Ok(TopLevelCommand::Validate(rest)),
        "data" | "generate-data" => Ok(TopLevelCommand::Data(rest)),
        "readme" | "generate-readme" => Ok(TopLevelCommand::Readme(rest)),
        "seo" | "generate-seo" => Ok(TopLevelCommand::Seo(rest)),
        "all" => Ok(TopLevelCommand::All(rest)),
        "help" | "--help" | "-h" => Ok(TopLevelCommand::Help),
        other => Err(XtaskError::validation(format!(
            "unknown xtask command: {other}"
        ))
        .with_hint("run `cargo xtask help`")),
    }
}

/// Print the canonical top-level usage text.
pub fn print_usage() {
    eprintln!(
        "Usage: cargo xtask <command> [args]\n\
         \n\
         Commands:\n\
           validate [--report [path]]   Check project records against the schema and catalog rules\n\
           data [--check]               Compile records into the web app's projects.json\n\
           readme [--check]             Regenerate the project tables in README.md\n\
           seo [--check]                Write sitemap.xml and robots.txt (SITE_URL / VITE_SITE_URL)\n\
           all [--check]                Run validate, data, readme, and seo as one recorded workflow\n"
    );
}
