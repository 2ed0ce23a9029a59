use crate::runtime::error::{XtaskError, XtaskResult};
use project_catalog::ProjectRecord;

/// Render compiled records as the front-end dataset: a pretty-printed JSON array with a
/// trailing newline.
pub fn render_dataset(records: &[ProjectRecord]) -> XtaskResult<String> {
    let body = serde_json::to_string_pretty(records)
        .map_err(|err| XtaskError::io(format!("failed to serialize dataset: {err}")))?;
    Ok(format!("{body}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use project_catalog::ProjectFields;

    fn record(slug: &str, yaml: &str) -> ProjectRecord {
        let fields: ProjectFields = serde_yaml::from_str(yaml).expect("fields");
        ProjectRecord::new(slug, fields)
    }

    #[test]
    fn empty_corpus_renders_empty_array() {
        assert_eq!(render_dataset(&[]).expect("render"), "[]\n");
    }

    #[test]
    fn records_keep_order_and_gain_slug() {
        let records = [
            record(
                "b-one",
                "name: B One\ntagline: t\ndescription: d\ncategories: [media]\n\
                 origin: {nigerian: true}\nstatus: active\nrepo: https://github.com/b/one\n",
            ),
            record(
                "a-two",
                "name: A Two\ntagline: t\ndescription: d\ncategories: [health, media]\n\
                 origin: {nigerian: true}\nstatus: archived\nwebsite: https://a.ng\n",
            ),
        ];
        let text = render_dataset(&records).expect("render");
        assert!(text.ends_with("]\n"));
        assert!(text.contains("\n  {\n    \"name\": \"B One\""));

        let parsed: Vec<serde_json::Value> = serde_json::from_str(&text).expect("parse back");
        let slugs: Vec<&str> = parsed.iter().map(|r| r["slug"].as_str().expect("slug")).collect();
        assert_eq!(slugs, ["b-one", "a-two"]);
        assert_eq!(parsed[1]["categories"][0], "health");
        assert!(parsed[0].get("website").is_none());
    }
}
