//! Shared project record contracts for the Naija AI Index catalog.
//!
//! This crate is intentionally tooling-agnostic. It defines the typed shape of one authored project
//! file, the compiled record consumed by the web front-end, the fixed category enumeration, and the
//! slug rules that tie file names to display names. Validation policy, I/O, and rendering live in
//! the `xtask` automation crate.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Canonical public URL of the directory site when no override is configured.
pub const DEFAULT_SITE_URL: &str = "https://naija-ai-index.github.io";

/// Maximum tagline length, in characters.
pub const TAGLINE_MAX_CHARS: usize = 120;

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 600;

/// File extension of authored project records.
pub const PROJECT_FILE_EXTENSION: &str = "yaml";

/// Category a project is filed under.
///
/// The fourteen named variants are the published enumeration. Any other identifier deserializes
/// into [`Category::Other`] so compiling the corpus never rejects a well-formed record; the
/// validator reports such values instead.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Applications built on large language models.
    LlmApps,
    /// Autonomous or semi-autonomous agents.
    Agents,
    /// Tooling for developers.
    DeveloperTools,
    /// Infrastructure and platforms.
    Infra,
    /// Datasets and corpora.
    Datasets,
    /// Research output.
    Research,
    /// Health and medicine.
    Health,
    /// Financial technology.
    Fintech,
    /// Education and learning.
    Education,
    /// Agriculture.
    Agriculture,
    /// Climate and environment.
    Climate,
    /// Government technology.
    Govtech,
    /// Security.
    Security,
    /// Media and content.
    Media,
    /// An identifier outside the enumeration, kept verbatim.
    Other(String),
}

impl Category {
    /// Every enumerated category in declaration order.
    pub const ALL: [Category; 14] = [
        Category::LlmApps,
        Category::Agents,
        Category::DeveloperTools,
        Category::Infra,
        Category::Datasets,
        Category::Research,
        Category::Health,
        Category::Fintech,
        Category::Education,
        Category::Agriculture,
        Category::Climate,
        Category::Govtech,
        Category::Security,
        Category::Media,
    ];

    /// Returns the identifier used in YAML records and URLs.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Other(raw) => raw,
            known => known.enumerated_id(),
        }
    }

    /// Map an identifier to its category, falling back to [`Category::Other`].
    pub fn from_identifier(raw: &str) -> Self {
        raw.parse()
            .unwrap_or_else(|UnknownCategory(raw)| Category::Other(raw))
    }

    /// Whether this is one of the enumerated categories.
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }

    /// Returns every enumerated identifier in declaration order.
    pub fn identifiers() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(|category| category.enumerated_id())
    }

    /// Identifier of an enumerated variant; empty for [`Category::Other`].
    fn enumerated_id(&self) -> &'static str {
        match self {
            Category::LlmApps => "llm-apps",
            Category::Agents => "agents",
            Category::DeveloperTools => "developer-tools",
            Category::Infra => "infra",
            Category::Datasets => "datasets",
            Category::Research => "research",
            Category::Health => "health",
            Category::Fintech => "fintech",
            Category::Education => "education",
            Category::Agriculture => "agriculture",
            Category::Climate => "climate",
            Category::Govtech => "govtech",
            Category::Security => "security",
            Category::Media => "media",
            Category::Other(_) => "",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category identifier is not part of the enumeration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Strict parse: only enumerated identifiers succeed.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == raw)
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::from_identifier(&raw))
    }
}

/// Lifecycle status of a listed project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    /// Under active development.
    Active,
    /// Temporarily on hold.
    Paused,
    /// No longer maintained.
    Archived,
    /// A status outside the enumeration, kept verbatim.
    Other(String),
}

impl ProjectStatus {
    /// Returns the identifier used in YAML records.
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Archived => "archived",
            ProjectStatus::Other(raw) => raw,
        }
    }

    /// Returns the label shown to readers; unknown statuses show their raw value.
    pub fn label(&self) -> &str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Paused => "Paused",
            ProjectStatus::Archived => "Archived",
            ProjectStatus::Other(raw) => raw,
        }
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "active" => ProjectStatus::Active,
            "paused" => ProjectStatus::Paused,
            "archived" => ProjectStatus::Archived,
            _ => ProjectStatus::Other(raw),
        })
    }
}

/// Where a project comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOrigin {
    /// Whether the project is Nigerian. Listed projects must set this to `true`.
    pub nigerian: bool,
    /// Optional city or country the team is based in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_in: Option<String>,
}

/// Profile links for a team member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLinks {
    /// GitHub profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    /// Twitter/X profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// LinkedIn profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Personal website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// One member of a project team, in authored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Display name.
    pub name: String,
    /// Optional role description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Optional profile links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<TeamLinks>,
}

/// Railway deployment links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RailwayDeployment {
    /// One-click template URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,
    /// Public project URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
}

/// Optional deployment metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDeployment {
    /// Railway deployment links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub railway: Option<RailwayDeployment>,
}

/// Fields of one authored project file, exactly as contributors write them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFields {
    /// Display name.
    pub name: String,
    /// One-line summary.
    pub tagline: String,
    /// Longer description.
    pub description: String,
    /// Marketing or product website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Live demo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    /// Source repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Documentation site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    /// Logo URL or site-relative path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Categories; the first entry is the primary category.
    pub categories: Vec<Category>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Team members in authored order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<TeamMember>>,
    /// Origin declaration.
    pub origin: ProjectOrigin,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Year the project started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_started: Option<u32>,
    /// Date of the last record update, as authored (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Deployment metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<ProjectDeployment>,
    /// Authored keys not declared above, carried through compilation unchanged.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProjectFields {
    /// Returns the primary category (the first listed one).
    pub fn primary_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    /// Returns `(label, url)` pairs for the outbound links that are present, in display order.
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("Website", self.website.as_deref()),
            ("Demo", self.demo.as_deref()),
            ("Repo", self.repo.as_deref()),
            ("Docs", self.docs.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.filter(|url| !url.is_empty()).map(|url| (label, url)))
        .collect()
    }
}

/// Compiled project record: authored fields plus the slug derived from the file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Authored fields.
    #[serde(flatten)]
    pub fields: ProjectFields,
    /// URL slug taken from the record file name.
    pub slug: String,
}

impl ProjectRecord {
    /// Builds a compiled record from its slug and authored fields.
    pub fn new(slug: impl Into<String>, fields: ProjectFields) -> Self {
        Self {
            fields,
            slug: slug.into(),
        }
    }
}

/// Derives the canonical slug for a display name.
///
/// The name is lowercased, every run of characters outside `[a-z0-9]` collapses to one `-`, and
/// a leading or trailing `-` is removed.
pub fn slugify_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Returns the slug carried by a record file name: its name without the `.yaml` extension.
pub fn slug_from_path(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let stem = file_name
        .strip_suffix(PROJECT_FILE_EXTENSION)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(file_name);
    Some(stem.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
name: Lagos Voice
tagline: Speech recognition for Nigerian languages
description: Open models for Yoruba, Igbo and Hausa speech.
repo: https://github.com/example/lagos-voice
categories: [research, datasets]
origin:
  nigerian: true
  based_in: Lagos
status: active
team:
  - name: Ada
    role: Lead
    links:
      github: https://github.com/ada
last_updated: 2024-03-09
"#;

    #[test]
    fn slugify_collapses_runs_and_strips_edges() {
        assert_eq!(slugify_name("My Project"), "my-project");
        assert_eq!(slugify_name("  --Naija__GPT!! v2 "), "naija-gpt-v2");
        assert_eq!(slugify_name("AI4Naija"), "ai4naija");
        assert_eq!(slugify_name("Ọ̀rọ̀ AI"), "r-ai");
        assert_eq!(slugify_name("!!!"), "");
    }

    #[test]
    fn slug_from_path_strips_yaml_extension_only() {
        assert_eq!(
            slug_from_path(Path::new("data/projects/lagos-voice.yaml")).as_deref(),
            Some("lagos-voice")
        );
        assert_eq!(
            slug_from_path(Path::new("data/projects/odd.name.yaml")).as_deref(),
            Some("odd.name")
        );
    }

    #[test]
    fn category_round_trips_through_identifier() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category.clone()));
        }
        assert_eq!(
            "robotics".parse::<Category>(),
            Err(UnknownCategory("robotics".into()))
        );
        assert_eq!(Category::identifiers().count(), 14);
    }

    #[test]
    fn authored_yaml_deserializes_into_fields() {
        let fields: ProjectFields = serde_yaml::from_str(SAMPLE).expect("parse sample");
        assert_eq!(fields.primary_category(), Some(&Category::Research));
        assert_eq!(fields.status, ProjectStatus::Active);
        assert_eq!(fields.origin.based_in.as_deref(), Some("Lagos"));
        assert_eq!(fields.last_updated.as_deref(), Some("2024-03-09"));
        assert_eq!(
            fields.links(),
            vec![("Repo", "https://github.com/example/lagos-voice")]
        );
    }

    #[test]
    fn compiled_record_serializes_flat_with_trailing_slug() {
        let fields: ProjectFields = serde_yaml::from_str(SAMPLE).expect("parse sample");
        let record = ProjectRecord::new("lagos-voice", fields);
        let value = serde_json::to_value(&record).expect("serialize");

        assert_eq!(value["slug"], "lagos-voice");
        assert_eq!(value["name"], "Lagos Voice");
        assert_eq!(value["categories"][1], "datasets");
        assert!(value.get("website").is_none());

        let text = serde_json::to_string(&record).expect("serialize");
        assert!(text.ends_with("\"slug\":\"lagos-voice\"}"));

        let back: ProjectRecord = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn unlisted_category_and_status_are_kept_verbatim() {
        let yaml = SAMPLE
            .replace("[research, datasets]", "[robotics, research]")
            .replace("status: active", "status: incubating");
        let fields: ProjectFields = serde_yaml::from_str(&yaml).expect("parse");

        assert_eq!(
            fields.primary_category(),
            Some(&Category::Other("robotics".into()))
        );
        assert!(!fields.categories[0].is_known());
        assert!(fields.categories[1].is_known());
        assert_eq!(fields.status, ProjectStatus::Other("incubating".into()));
        assert_eq!(fields.status.label(), "incubating");

        let value = serde_json::to_value(&fields).expect("serialize");
        assert_eq!(value["categories"][0], "robotics");
        assert_eq!(value["status"], "incubating");
    }

    #[test]
    fn undeclared_keys_survive_compilation() {
        let yaml = format!("{SAMPLE}funding: seed\nmetrics:\n  stars: 42\n");
        let fields: ProjectFields = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(fields.extra.len(), 2);

        let record = ProjectRecord::new("lagos-voice", fields);
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["funding"], "seed");
        assert_eq!(value["metrics"]["stars"], 42);
        assert_eq!(value["slug"], "lagos-voice");
    }
}
