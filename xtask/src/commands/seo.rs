//! `cargo xtask seo`: sitemap.xml and robots.txt for the public site.

use super::{parse_generate_options, print_generate_usage, write_or_check_all, GenerateOptions};
use crate::catalog::{
    self, build_sitemap_entries, normalize_site_url, render_robots, render_sitemap, DatasetEntry,
};
use crate::catalog_config::CATALOG_CONFIG_PATH;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::XtaskCommand;

/// `cargo xtask seo`
pub struct SeoCommand;

impl XtaskCommand for SeoCommand {
    type Options = GenerateOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        parse_generate_options("seo", args)
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        if options.show_help {
            print_generate_usage(
                "seo",
                "Write sitemap.xml and robots.txt from the compiled dataset.\n\
                 The site URL comes from SITE_URL, then VITE_SITE_URL, then tools/catalog/catalog.toml.",
            );
            return Ok(());
        }
        generate_seo_files(ctx, options.check)
    }
}

/// Resolve the canonical site URL: environment override first, then configuration.
///
/// An override that does not parse as an absolute URL is ignored with a warning.
pub fn resolve_site_url(ctx: &CommandContext) -> XtaskResult<String> {
    if let Some(raw) = ctx.env().site_url_override() {
        match normalize_site_url(&raw) {
            Ok(url) => return Ok(url),
            Err(err) => ctx
                .workflow()
                .warn(&format!("ignoring site URL override: {err}")),
        }
    }
    normalize_site_url(&ctx.config().site.default_url)
        .map_err(|err| err.with_operation("seo").with_path(&ctx.root().join(CATALOG_CONFIG_PATH)))
}

/// Render both files from the dataset, then write them together, or verify both under `check`.
pub fn generate_seo_files(ctx: &CommandContext, check: bool) -> XtaskResult<()> {
    let root = ctx.root();
    let config = ctx.config();
    let dataset_path = config.dataset_path(root);
    let text = catalog::read_text(&dataset_path).map_err(|err| {
        err.with_operation("seo")
            .with_hint("run `cargo xtask data` to compile the dataset first")
    })?;
    let projects: Vec<DatasetEntry> = serde_json::from_str(&text).map_err(|err| {
        XtaskError::parse(format!(
            "failed to parse {}: {err}",
            catalog::rel_posix(root, &dataset_path)
        ))
        .with_operation("seo")
        .with_path(&dataset_path)
    })?;

    let site_url = resolve_site_url(ctx)?;
    let sitemap = render_sitemap(&build_sitemap_entries(&site_url, &projects));
    let robots = render_robots(&site_url);

    let public_dir = config.public_dir(root);
    let sitemap_path = public_dir.join("sitemap.xml");
    let robots_path = public_dir.join("robots.txt");
    write_or_check_all(
        ctx,
        "seo",
        &[
            (sitemap_path.as_path(), sitemap.as_str()),
            (robots_path.as_path(), robots.as_str()),
        ],
        check,
    )?;
    if !check {
        println!(
            "Generated {} and {} for {site_url} ({} projects).",
            catalog::rel_posix(root, &sitemap_path),
            catalog::rel_posix(root, &robots_path),
            projects.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{unique_temp_root, write_file};
    use crate::catalog_config::CatalogConfig;
    use crate::runtime::env::EnvHelper;
    use crate::runtime::error::XtaskErrorCategory;
    use std::fs;
    use std::path::PathBuf;

    fn context(root: PathBuf, vars: &[(&str, &str)]) -> CommandContext {
        let mut config = CatalogConfig::default();
        config.site.default_url = "https://default.ng/".into();
        CommandContext::with_config(root, config).with_env(EnvHelper::fixed(vars.iter().copied()))
    }

    #[test]
    fn site_url_override_wins_over_configured_default() {
        let root = unique_temp_root("seo-url");
        let ctx = context(
            root.clone(),
            &[("SITE_URL", "https://site.ng/"), ("VITE_SITE_URL", "https://vite.ng")],
        );
        assert_eq!(resolve_site_url(&ctx).expect("url"), "https://site.ng");

        let ctx = context(root.clone(), &[("VITE_SITE_URL", "https://vite.ng")]);
        assert_eq!(resolve_site_url(&ctx).expect("url"), "https://vite.ng");

        let ctx = context(root, &[]);
        assert_eq!(resolve_site_url(&ctx).expect("url"), "https://default.ng");
    }

    #[test]
    fn unparsable_override_falls_back_to_default() {
        let ctx = context(unique_temp_root("seo-bad-url"), &[("SITE_URL", "not a url")]);
        assert_eq!(resolve_site_url(&ctx).expect("url"), "https://default.ng");
    }

    #[test]
    fn check_reports_every_drifted_file_and_writes_nothing() {
        let root = unique_temp_root("seo-check");
        write_file(
            &root,
            "apps/web/src/generated/projects.json",
            "[{\"slug\": \"alpha\", \"last_updated\": \"2024-01-02\"}]\n",
        );
        let ctx = context(root.clone(), &[]);
        let public = ctx.config().public_dir(&root);

        let err = generate_seo_files(&ctx, true).expect_err("both files missing");
        assert_eq!(err.category, XtaskErrorCategory::Validation);
        assert!(err.message.contains("sitemap.xml"));
        assert!(err.message.contains("robots.txt"));
        assert!(!public.join("sitemap.xml").exists());
        assert!(!public.join("robots.txt").exists());

        generate_seo_files(&ctx, false).expect("write");
        assert!(fs::read_to_string(public.join("sitemap.xml"))
            .expect("sitemap")
            .contains("<loc>https://default.ng/projects/alpha</loc>"));
        assert_eq!(
            fs::read_to_string(public.join("robots.txt")).expect("robots"),
            render_robots("https://default.ng")
        );
        generate_seo_files(&ctx, true).expect("up to date");

        let _ = fs::remove_dir_all(root);
    }
}
