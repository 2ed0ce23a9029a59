//! Shared command context passed into command families.

use crate::catalog_config::{load_catalog_config, CatalogConfig};
use crate::runtime::artifacts::ArtifactManager;
use crate::runtime::env::EnvHelper;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::runtime::workflow::WorkflowRecorder;
use std::path::{Path, PathBuf};

/// Shared execution context for xtask command families.
///
/// The catalog configuration is loaded exactly once, when the context is built, and is
/// read-only afterwards.
#[derive(Clone, Debug)]
pub struct CommandContext {
    root: PathBuf,
    config: CatalogConfig,
    artifacts: ArtifactManager,
    env: EnvHelper,
    workflow: WorkflowRecorder,
}

impl CommandContext {
    /// Create a new command context rooted at the current workspace.
    pub fn new() -> XtaskResult<Self> {
        Self::at(workspace_root()?)
    }

    /// Create a command context rooted at an explicit directory.
    pub fn at(root: impl Into<PathBuf>) -> XtaskResult<Self> {
        let root = root.into();
        let config = load_catalog_config(&root)?;
        Ok(Self::with_config(root, config))
    }

    /// Create a command context from an already-resolved configuration.
    pub fn with_config(root: PathBuf, config: CatalogConfig) -> Self {
        let artifacts = ArtifactManager::new(root.clone());
        let workflow = WorkflowRecorder::new(artifacts.clone());
        Self {
            root,
            config,
            artifacts,
            env: EnvHelper::default(),
            workflow,
        }
    }

    /// Replace the environment helper, e.g. with [`EnvHelper::fixed`] variables.
    pub fn with_env(mut self, env: EnvHelper) -> Self {
        self.env = env;
        self
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Catalog configuration loaded at startup.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Shared artifact manager.
    pub fn artifacts(&self) -> &ArtifactManager {
        &self.artifacts
    }

    /// Shared environment helper.
    pub fn env(&self) -> &EnvHelper {
        &self.env
    }

    /// Shared workflow recorder.
    pub fn workflow(&self) -> &WorkflowRecorder {
        &self.workflow
    }
}

fn workspace_root() -> XtaskResult<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| XtaskError::environment("xtask lives under workspace root"))
}
