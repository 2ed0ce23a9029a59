use super::{CorpusFile, Problem};
use project_catalog::{slugify_name, Category, DESCRIPTION_MAX_CHARS, TAGLINE_MAX_CHARS};
use serde_json::Value;
use std::collections::HashMap;

const LINK_FIELDS: [&str; 3] = ["website", "demo", "repo"];

/// Corpus-wide lookups for the duplicate checks.
pub(super) struct CorpusIndex {
    names: HashMap<String, Vec<String>>,
    repos: HashMap<String, Vec<String>>,
}

impl CorpusIndex {
    /// Index the lowercased names and exact repository URLs of `files`.
    pub(super) fn build(files: &[&CorpusFile]) -> Self {
        let mut names: HashMap<String, Vec<String>> = HashMap::new();
        let mut repos: HashMap<String, Vec<String>> = HashMap::new();
        for file in files {
            if let Some(name) = str_field(&file.document, "name") {
                names
                    .entry(name.to_lowercase())
                    .or_default()
                    .push(file.rel_path.clone());
            }
            if let Some(repo) = str_field(&file.document, "repo").filter(|r| !r.is_empty()) {
                repos
                    .entry(repo.to_string())
                    .or_default()
                    .push(file.rel_path.clone());
            }
        }
        Self { names, repos }
    }

    fn others<'a>(group: Option<&'a Vec<String>>, rel_path: &str) -> Vec<&'a str> {
        group
            .map(|paths| {
                paths
                    .iter()
                    .map(String::as_str)
                    .filter(|other| *other != rel_path)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Cross-record and content rules for one structurally valid record, in a fixed order.
pub(super) fn check_record(file: &CorpusFile, index: &CorpusIndex) -> Vec<Problem> {
    let doc = &file.document;
    let rel = file.rel_path.as_str();
    let mut problems = Vec::new();
    let name = str_field(doc, "name").unwrap_or_default();

    let expected = slugify_name(name);
    if file.slug != expected {
        problems.push(Problem::new(
            "slug",
            rel,
            format!(
                "file name slug `{}` does not match name; expected `{expected}.yaml`",
                file.slug
            ),
        ));
    }

    let same_name = CorpusIndex::others(index.names.get(&name.to_lowercase()), rel);
    if !same_name.is_empty() {
        problems.push(Problem::new(
            "duplicate",
            rel,
            format!(
                "duplicate project name `{name}` (also in {})",
                same_name.join(", ")
            ),
        ));
    }

    if let Some(repo) = str_field(doc, "repo").filter(|r| !r.is_empty()) {
        let same_repo = CorpusIndex::others(index.repos.get(repo), rel);
        if !same_repo.is_empty() {
            problems.push(Problem::new(
                "duplicate",
                rel,
                format!(
                    "duplicate repository `{repo}` (also in {})",
                    same_repo.join(", ")
                ),
            ));
        }
    }

    let nigerian = doc
        .get("origin")
        .and_then(|origin| origin.get("nigerian"))
        .and_then(Value::as_bool);
    if nigerian != Some(true) {
        problems.push(Problem::new(
            "origin",
            rel,
            "origin.nigerian must be true for listed projects",
        ));
    }

    let has_link = LINK_FIELDS
        .iter()
        .any(|field| str_field(doc, field).is_some_and(|v| !v.is_empty()));
    if !has_link {
        problems.push(Problem::new(
            "links",
            rel,
            "at least one of website, demo, or repo is required",
        ));
    }

    let categories = doc.get("categories").and_then(Value::as_array);
    for category in categories.into_iter().flatten() {
        let raw = category.as_str().unwrap_or_default();
        if raw.parse::<Category>().is_err() {
            let allowed: Vec<&str> = Category::identifiers().collect();
            problems.push(Problem::new(
                "category",
                rel,
                format!(
                    "unknown category `{raw}`; allowed: {}",
                    allowed.join(", ")
                ),
            ));
        }
    }

    for (field, max) in [
        ("tagline", TAGLINE_MAX_CHARS),
        ("description", DESCRIPTION_MAX_CHARS),
    ] {
        let len = str_field(doc, field).map_or(0, |v| v.chars().count());
        if len > max {
            problems.push(Problem::new(
                "length",
                rel,
                format!("{field} is {len} characters; maximum is {max}"),
            ));
        }
    }

    problems
}

fn str_field<'a>(doc: &'a Value, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(Value::as_str)
}
