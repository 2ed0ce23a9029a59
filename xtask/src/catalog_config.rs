//! Versioned catalog configuration: corpus, schema, and output locations.

use crate::runtime::config::ConfigLoader;
use crate::runtime::error::XtaskResult;
use project_catalog::DEFAULT_SITE_URL;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Workspace-relative location of the catalog config file.
pub const CATALOG_CONFIG_PATH: &str = "tools/catalog/catalog.toml";

/// Paths and defaults shared by every catalog command.
///
/// Every field falls back to its default individually, so a config file may override only the
/// keys it cares about.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding the published project records.
    pub projects_dir: String,
    /// Additional directories the validator scans when they exist (sample records).
    pub extra_validation_dirs: Vec<String>,
    /// JSON Schema document describing one project record.
    pub schema: String,
    /// Compiled dataset consumed by the front-end.
    pub dataset: String,
    /// Directory receiving `sitemap.xml` and `robots.txt`.
    pub public_dir: String,
    /// Markdown document holding the generated project tables.
    pub readme: String,
    /// Site URL settings.
    pub site: SiteConfig,
}

/// Site URL settings.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Canonical site URL used when no environment override is set.
    pub default_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            projects_dir: "data/projects".into(),
            extra_validation_dirs: vec!["data/samples".into()],
            schema: "schemas/project.schema.json".into(),
            dataset: "apps/web/src/generated/projects.json".into(),
            public_dir: "apps/web/public".into(),
            readme: "README.md".into(),
            site: SiteConfig::default(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_url: DEFAULT_SITE_URL.into(),
        }
    }
}

impl CatalogConfig {
    /// Absolute path of the published projects directory.
    pub fn projects_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.projects_dir)
    }

    /// Absolute paths of the optional extra validation directories.
    pub fn extra_validation_dirs(&self, root: &Path) -> Vec<PathBuf> {
        self.extra_validation_dirs
            .iter()
            .map(|dir| root.join(dir))
            .collect()
    }

    /// Absolute path of the project schema.
    pub fn schema_path(&self, root: &Path) -> PathBuf {
        root.join(&self.schema)
    }

    /// Absolute path of the compiled dataset.
    pub fn dataset_path(&self, root: &Path) -> PathBuf {
        root.join(&self.dataset)
    }

    /// Absolute path of the public asset directory.
    pub fn public_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.public_dir)
    }

    /// Absolute path of the README document.
    pub fn readme_path(&self, root: &Path) -> PathBuf {
        root.join(&self.readme)
    }
}

/// Load `tools/catalog/catalog.toml`, or the built-in defaults when the file is absent.
pub fn load_catalog_config(root: &Path) -> XtaskResult<CatalogConfig> {
    ConfigLoader::<CatalogConfig>::new(root, CATALOG_CONFIG_PATH)
        .load_or_default()
        .map_err(|err| err.with_operation("load catalog config"))
}
