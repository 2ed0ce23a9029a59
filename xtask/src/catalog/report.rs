use super::{tally, CorpusFile, ValidationSummary};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Machine-readable validation summary written by `validate --report`.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// RFC 3339 generation time.
    pub generated_at: String,
    /// Number of files scanned.
    pub file_count: usize,
    /// Number of files that passed every check.
    pub valid_count: usize,
    /// Files per primary category; `uncategorized` when absent.
    pub by_category: BTreeMap<String, usize>,
    /// Files per status; `unknown` when absent.
    pub by_status: BTreeMap<String, usize>,
    /// Problems per check family.
    pub issues_by_check: BTreeMap<String, usize>,
    /// Failing files with their messages, in corpus order.
    pub failing_files: Vec<FailingFile>,
}

/// One failing file in a [`ValidationReport`].
#[derive(Debug, Serialize)]
pub struct FailingFile {
    /// Workspace-relative POSIX path.
    pub path: String,
    /// `[check] message` lines.
    pub problems: Vec<String>,
}

/// Summarize a validated corpus.
pub fn validation_report(
    files: &[CorpusFile],
    summary: &ValidationSummary,
    generated_at: String,
) -> ValidationReport {
    let primary = |doc: &Value| {
        doc.get("categories")
            .and_then(Value::as_array)
            .and_then(|list| list.first())
            .and_then(Value::as_str)
            .unwrap_or("uncategorized")
            .to_string()
    };
    let status = |doc: &Value| {
        doc.get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    };
    let categories: Vec<String> = files.iter().map(|f| primary(&f.document)).collect();
    let statuses: Vec<String> = files.iter().map(|f| status(&f.document)).collect();

    ValidationReport {
        generated_at,
        file_count: files.len(),
        valid_count: summary.files.iter().filter(|f| f.is_valid()).count(),
        by_category: sorted(tally(categories.iter().map(String::as_str))),
        by_status: sorted(tally(statuses.iter().map(String::as_str))),
        issues_by_check: sorted(tally(summary.problems().map(|p| p.check.as_str()))),
        failing_files: summary
            .files
            .iter()
            .filter(|f| !f.is_valid())
            .map(|f| FailingFile {
                path: f.rel_path.clone(),
                problems: f
                    .problems
                    .iter()
                    .map(|p| format!("[{}] {}", p.check, p.message))
                    .collect(),
            })
            .collect(),
    }
}

fn sorted<'a>(counts: impl IntoIterator<Item = (&'a str, usize)>) -> BTreeMap<String, usize> {
    counts
        .into_iter()
        .map(|(key, count)| (key.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::{FileReport, Problem};
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn file(rel: &str, yaml: &str) -> CorpusFile {
        CorpusFile {
            path: PathBuf::from(rel),
            rel_path: rel.into(),
            slug: String::new(),
            document: serde_yaml::from_str(yaml).expect("yaml"),
        }
    }

    #[test]
    fn report_counts_categories_statuses_and_checks() {
        let files = [
            file("a.yaml", "categories: [agents, media]\nstatus: active\n"),
            file("b.yaml", "categories: [agents]\nstatus: paused\n"),
            file("c.yaml", "name: only\n"),
        ];
        let summary = ValidationSummary {
            files: vec![
                FileReport {
                    rel_path: "a.yaml".into(),
                    problems: Vec::new(),
                },
                FileReport {
                    rel_path: "b.yaml".into(),
                    problems: vec![Problem::new("links", "b.yaml", "no links")],
                },
                FileReport {
                    rel_path: "c.yaml".into(),
                    problems: vec![
                        Problem::new("schema", "c.yaml", "/ missing tagline"),
                        Problem::new("schema", "c.yaml", "/ missing status"),
                    ],
                },
            ],
        };

        let report = validation_report(&files, &summary, "2024-01-01T00:00:00.000Z".into());
        assert_eq!(report.file_count, 3);
        assert_eq!(report.valid_count, 1);
        assert_eq!(report.by_category.get("agents"), Some(&2));
        assert_eq!(report.by_category.get("uncategorized"), Some(&1));
        assert_eq!(report.by_status.get("unknown"), Some(&1));
        assert_eq!(report.issues_by_check.get("schema"), Some(&2));
        assert_eq!(report.failing_files.len(), 2);
        assert_eq!(report.failing_files[0].problems, ["[links] no links"]);

        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["generated_at"], "2024-01-01T00:00:00.000Z");
    }
}
