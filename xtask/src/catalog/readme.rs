use crate::runtime::error::{XtaskError, XtaskResult};
use project_catalog::ProjectRecord;
use std::collections::BTreeMap;

/// Opening marker of the generated projects region.
pub const README_BEGIN_MARKER: &str = "<!-- BEGIN PROJECTS -->";
/// Closing marker of the generated projects region.
pub const README_END_MARKER: &str = "<!-- END PROJECTS -->";

const TABLE_HEADER: &str = "| Project | Tagline | Status | Links |\n|---------|---------|--------|-------|\n";

/// Turn a category identifier into a heading: `llm-apps` becomes `Llm Apps`.
pub fn title_case_category(category: &str) -> String {
    category
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render one table per primary category, sorted by category identifier.
///
/// Rows keep corpus order within a group. Records without a category are skipped.
pub fn render_projects_section(records: &[ProjectRecord]) -> String {
    let mut groups: BTreeMap<&str, Vec<&ProjectRecord>> = BTreeMap::new();
    for record in records {
        if let Some(category) = record.fields.primary_category() {
            groups.entry(category.as_str()).or_default().push(record);
        }
    }

    let mut out = String::new();
    for (category, members) in groups {
        out.push_str(&format!("\n### {}\n\n", title_case_category(category)));
        out.push_str(TABLE_HEADER);
        for record in members {
            out.push_str(&table_row(record));
        }
    }
    out
}

fn table_row(record: &ProjectRecord) -> String {
    let fields = &record.fields;
    let links = fields
        .links()
        .into_iter()
        .map(|(label, url)| format!("[{label}]({url})"))
        .collect::<Vec<_>>()
        .join(" · ");
    format!(
        "| **{}** | {} | {} | {} |\n",
        escape_cell(&fields.name),
        escape_cell(&fields.tagline),
        escape_cell(fields.status.label()),
        links
    )
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Replace the text strictly between the two markers with `section`, keeping the markers and
/// everything outside them byte-for-byte.
pub fn splice_projects_section(document: &str, section: &str) -> XtaskResult<String> {
    let begin = document.find(README_BEGIN_MARKER);
    let end = document.find(README_END_MARKER);
    let (begin, end) = match (begin, end) {
        (Some(begin), Some(end)) if end >= begin + README_BEGIN_MARKER.len() => (begin, end),
        (Some(_), Some(_)) => {
            return Err(XtaskError::validation(format!(
                "{README_END_MARKER} appears before {README_BEGIN_MARKER}"
            )))
        }
        _ => {
            return Err(XtaskError::validation(format!(
                "README is missing {README_BEGIN_MARKER} / {README_END_MARKER} markers"
            ))
            .with_hint("add both markers around the generated project tables"))
        }
    };

    let head = &document[..begin + README_BEGIN_MARKER.len()];
    let tail = &document[end..];
    Ok(format!("{head}\n{section}\n{tail}"))
}
