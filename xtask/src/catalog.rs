//! Project corpus loading, validation rules, and generated artifact rendering.
//!
//! Every function here is a pure transformation over already-read inputs, except the corpus
//! readers at the top of this module. Command modules own printing, writing, and exit status.

mod dataset;
mod invariants;
mod readme;
mod report;
mod schema;
mod sitemap;

pub use dataset::render_dataset;
pub use readme::{
    render_projects_section, splice_projects_section, title_case_category, README_BEGIN_MARKER,
    README_END_MARKER,
};
pub use report::{validation_report, FailingFile, ValidationReport};
pub use schema::ProjectSchema;
pub use sitemap::{
    build_sitemap_entries, escape_xml, is_valid_date, normalize_path, normalize_site_url,
    render_robots, render_sitemap, DatasetEntry, SitemapEntry,
};

use crate::runtime::error::{XtaskError, XtaskResult};
use project_catalog::{slug_from_path, ProjectFields, ProjectRecord, PROJECT_FILE_EXTENSION};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// One validation finding attached to a corpus file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    /// Rule family that produced the finding, such as `schema` or `duplicate`.
    pub check: String,
    /// Workspace-relative POSIX path of the offending file.
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl Problem {
    /// Build a problem for `path`.
    pub fn new(check: &str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check: check.to_string(),
            path: path.into(),
            message: message.into(),
        }
    }
}

/// One parsed YAML record with its location, kept untyped for schema validation.
#[derive(Clone, Debug)]
pub struct CorpusFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Workspace-relative POSIX path used in diagnostics and ordering.
    pub rel_path: String,
    /// Slug carried by the file name.
    pub slug: String,
    /// Parsed YAML document.
    pub document: Value,
}

/// Validation outcome of one corpus file.
#[derive(Clone, Debug)]
pub struct FileReport {
    /// Workspace-relative POSIX path.
    pub rel_path: String,
    /// Findings in rule order; empty for a valid file.
    pub problems: Vec<Problem>,
}

impl FileReport {
    /// Whether the file passed every check.
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Validation outcome of a whole corpus, in corpus order.
#[derive(Clone, Debug, Default)]
pub struct ValidationSummary {
    /// Per-file outcomes.
    pub files: Vec<FileReport>,
}

impl ValidationSummary {
    /// Every problem in corpus order.
    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.files.iter().flat_map(|file| file.problems.iter())
    }

    /// Total number of problems.
    pub fn problem_count(&self) -> usize {
        self.files.iter().map(|file| file.problems.len()).sum()
    }

    /// Whether the whole corpus is valid.
    pub fn is_clean(&self) -> bool {
        self.files.iter().all(FileReport::is_valid)
    }
}

/// Validate a corpus: structural checks against `schema`, then cross-record invariants.
///
/// Files are reported in the order given. A file that fails the schema skips the invariant
/// checks and does not take part in duplicate detection.
pub fn validate_corpus(schema: &ProjectSchema, files: &[CorpusFile]) -> ValidationSummary {
    let schema_problems: Vec<Vec<Problem>> = files.iter().map(|file| schema.check(file)).collect();
    let structurally_valid: Vec<&CorpusFile> = files
        .iter()
        .zip(&schema_problems)
        .filter(|(_, problems)| problems.is_empty())
        .map(|(file, _)| file)
        .collect();
    let index = invariants::CorpusIndex::build(&structurally_valid);

    let reports = files
        .iter()
        .zip(schema_problems)
        .map(|(file, problems)| {
            let problems = if problems.is_empty() {
                invariants::check_record(file, &index)
            } else {
                problems
            };
            FileReport {
                rel_path: file.rel_path.clone(),
                problems,
            }
        })
        .collect();

    ValidationSummary { files: reports }
}

/// Collect every project file under `dirs`, sorted lexicographically by relative path.
///
/// Directories that do not exist contribute nothing; callers decide whether that is fatal.
pub fn collect_project_files(root: &Path, dirs: &[PathBuf]) -> XtaskResult<Vec<PathBuf>> {
    let suffix = format!(".{PROJECT_FILE_EXTENSION}");
    let mut files = Vec::new();
    for dir in dirs {
        if dir.is_dir() {
            collect_files_with_suffix(dir, &suffix, &mut files)?;
        }
    }
    files.sort_by_cached_key(|path| rel_posix(root, path));
    files.dedup();
    Ok(files)
}

/// Read and parse every project file under `dirs` as untyped YAML.
///
/// A malformed file aborts the whole read.
pub fn read_corpus(root: &Path, dirs: &[PathBuf]) -> XtaskResult<Vec<CorpusFile>> {
    collect_project_files(root, dirs)?
        .into_iter()
        .map(|path| {
            let rel_path = rel_posix(root, &path);
            let text = read_text(&path)?;
            let document = serde_yaml::from_str::<Value>(&text).map_err(|err| {
                XtaskError::parse(format!("failed to parse {rel_path}: {err}"))
                    .with_operation("read project corpus")
                    .with_path(&path)
            })?;
            let slug = slug_from_path(&path).unwrap_or_default();
            Ok(CorpusFile {
                path,
                rel_path,
                slug,
                document,
            })
        })
        .collect()
}

/// Read every project file under `dir` into typed compiled records, in corpus order.
///
/// The directory must exist. Any parse failure aborts the whole read, so callers never see a
/// partial corpus.
pub fn load_projects(root: &Path, dir: &Path) -> XtaskResult<Vec<ProjectRecord>> {
    require_dir(dir)?;
    collect_project_files(root, &[dir.to_path_buf()])?
        .into_iter()
        .map(|path| {
            let rel_path = rel_posix(root, &path);
            let text = read_text(&path)?;
            let fields = serde_yaml::from_str::<ProjectFields>(&text).map_err(|err| {
                XtaskError::parse(format!("failed to parse {rel_path}: {err}"))
                    .with_operation("load projects")
                    .with_path(&path)
                    .with_hint("run `cargo xtask validate` for per-field diagnostics")
            })?;
            let slug = slug_from_path(&path).unwrap_or_default();
            Ok(ProjectRecord::new(slug, fields))
        })
        .collect()
}

/// Fail with an environment error when an input directory is missing.
pub fn require_dir(dir: &Path) -> XtaskResult<()> {
    if dir.is_dir() {
        return Ok(());
    }
    Err(
        XtaskError::environment(format!("input directory {} does not exist", dir.display()))
            .with_path(dir)
            .with_hint("run from the repository root or fix `tools/catalog/catalog.toml`"),
    )
}

/// Read a UTF-8 text file, mapping failures to an IO error naming the file.
pub fn read_text(path: &Path) -> XtaskResult<String> {
    fs::read_to_string(path).map_err(|err| {
        XtaskError::io(format!("failed to read {}: {err}", path.display())).with_path(path)
    })
}

/// Count values by key, preserving nothing but the counts.
pub(crate) fn tally<'a>(keys: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

fn collect_files_with_suffix(dir: &Path, suffix: &str, out: &mut Vec<PathBuf>) -> XtaskResult<()> {
    let entries = fs::read_dir(dir)
        .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
        .map_err(|err| {
            XtaskError::io(format!("failed to read {}: {err}", dir.display())).with_path(dir)
        })?;

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_files_with_suffix(&path, suffix, out)?;
        } else if path.is_file() && path.to_string_lossy().ends_with(suffix) {
            out.push(path);
        }
    }

    Ok(())
}

/// Render `path` relative to `root` with `/` separators.
pub fn rel_posix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::CurDir => Some(".".to_string()),
            Component::ParentDir => Some("..".to_string()),
            Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    pub(crate) const PROJECT_SCHEMA: &str = include_str!("../../schemas/project.schema.json");

    pub(crate) fn unique_temp_root(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "xtask-{label}-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    pub(crate) fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
        fs::write(&path, contents).expect("write file");
        path
    }

    /// A schema-valid record body for `name`, with optional extra YAML lines appended.
    pub(crate) fn record_yaml(name: &str, extra: &str) -> String {
        format!(
            "name: {name}\n\
             tagline: Useful AI for everyone\n\
             description: A longer description of the project.\n\
             categories:\n  - agents\n\
             origin:\n  nigerian: true\n\
             status: active\n\
             last_updated: \"2024-01-01\"\n\
             {extra}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::runtime::error::XtaskErrorCategory;

    #[test]
    fn collect_orders_by_relative_path_string_across_directories() {
        let root = unique_temp_root("collect");
        write_file(&root, "data/samples/a.yaml", "");
        write_file(&root, "data/projects/zeta.yaml", "");
        write_file(&root, "data/projects/a/nested.yaml", "");
        write_file(&root, "data/projects/a-b.yaml", "");
        write_file(&root, "data/projects/notes.md", "");

        let files = collect_project_files(
            &root,
            &[
                root.join("data/samples"),
                root.join("data/projects"),
                root.join("data/missing"),
            ],
        )
        .expect("collect");
        let rels: Vec<String> = files.iter().map(|p| rel_posix(&root, p)).collect();
        assert_eq!(
            rels,
            [
                "data/projects/a-b.yaml",
                "data/projects/a/nested.yaml",
                "data/projects/zeta.yaml",
                "data/samples/a.yaml",
            ]
        );

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn read_corpus_fails_fast_on_malformed_yaml() {
        let root = unique_temp_root("corpus");
        write_file(&root, "data/projects/good.yaml", &record_yaml("Good", ""));
        write_file(&root, "data/projects/bad.yaml", "name: [unclosed\n");

        let err = read_corpus(&root, &[root.join("data/projects")]).expect_err("malformed");
        assert_eq!(err.category, XtaskErrorCategory::Parse);
        assert!(err.message.contains("data/projects/bad.yaml"));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn load_projects_requires_existing_directory() {
        let root = unique_temp_root("load");
        let err = load_projects(&root, &root.join("data/projects")).expect_err("missing dir");
        assert_eq!(err.category, XtaskErrorCategory::Environment);
    }

    #[test]
    fn load_projects_keeps_unlisted_values_and_extra_keys() {
        let root = unique_temp_root("load-loose");
        let body = record_yaml("Bot", "funding: seed\n")
            .replace("  - agents", "  - robotics")
            .replace("status: active", "status: incubating");
        write_file(&root, "data/projects/bot.yaml", &body);

        let records = load_projects(&root, &root.join("data/projects")).expect("load");
        assert_eq!(records.len(), 1);
        let fields = &records[0].fields;
        assert_eq!(fields.categories[0].as_str(), "robotics");
        assert_eq!(fields.status.label(), "incubating");
        assert_eq!(fields.extra.get("funding"), Some(&serde_json::json!("seed")));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn validate_corpus_reports_every_file_without_short_circuit() {
        let schema = ProjectSchema::from_json_str(PROJECT_SCHEMA).expect("schema");
        let root = unique_temp_root("validate");
        write_file(&root, "data/projects/alpha.yaml", &record_yaml("Alpha", ""));
        write_file(
            &root,
            "data/projects/broken.yaml",
            "name: Broken\ncategories: []\n",
        );
        write_file(
            &root,
            "data/projects/gamma.yaml",
            &record_yaml("Gamma", "repo: https://github.com/x/gamma\n"),
        );
        write_file(
            &root,
            "data/projects/omega.yaml",
            &record_yaml("Omega", "website: https://omega.ng\n"),
        );

        let files = read_corpus(&root, &[root.join("data/projects")]).expect("read");
        let summary = validate_corpus(&schema, &files);
        let outcome: Vec<(&str, bool)> = summary
            .files
            .iter()
            .map(|f| (f.rel_path.as_str(), f.is_valid()))
            .collect();
        assert_eq!(
            outcome,
            [
                ("data/projects/alpha.yaml", false),
                ("data/projects/broken.yaml", false),
                ("data/projects/gamma.yaml", true),
                ("data/projects/omega.yaml", true),
            ]
        );
        assert!(summary.files[1].problems.iter().all(|p| p.check == "schema"));
        assert_eq!(summary.files[0].problems[0].check, "links");
        assert!(!summary.is_clean());
        assert_eq!(summary.problem_count(), summary.problems().count());

        let _ = fs::remove_dir_all(root);
    }
}
