//! Artifact path management and output writes for xtask workflows.

use crate::runtime::error::{XtaskError, XtaskResult};
use std::fs;
use std::path::{Path, PathBuf};

const AUTOMATION_RUNS_DIR: &str = ".artifacts/automation/runs";
const VALIDATION_REPORT: &str = ".artifacts/catalog-validation.json";

/// Central artifact path policy for xtask.
///
/// Keeps workspace-relative output locations consistent across command families. Commands should
/// write generated files through [`write_text`](Self::write_text) instead of ad hoc `fs::write`.
#[derive(Clone, Debug)]
pub struct ArtifactManager {
    root: PathBuf,
}

impl ArtifactManager {
    /// Create an artifact manager rooted at the workspace.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Return the workspace root path used for resolution.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a workspace-relative artifact path.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Resolve a possibly-relative workspace path.
    ///
    /// Absolute paths are preserved, while relative paths are anchored to the workspace root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Return the standard automation run root used by [`WorkflowRecorder`](crate::runtime::workflow::WorkflowRecorder).
    pub fn automation_runs_dir(&self) -> PathBuf {
        self.path(AUTOMATION_RUNS_DIR)
    }

    /// Return the standard validation report location.
    pub fn validation_report(&self) -> PathBuf {
        self.path(VALIDATION_REPORT)
    }

    /// Ensure a directory exists.
    ///
    /// This helper is idempotent and succeeds when the directory already exists.
    pub fn ensure_dir(&self, path: &Path) -> XtaskResult<()> {
        fs::create_dir_all(path).map_err(|err| {
            XtaskError::io(format!("failed to create {}: {err}", path.display())).with_path(path)
        })
    }

    /// Write a text artifact, creating missing parent directories first.
    pub fn write_text(&self, path: &Path, contents: &str) -> XtaskResult<()> {
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }
        fs::write(path, contents).map_err(|err| {
            XtaskError::io(format!("failed to write {}: {err}", path.display())).with_path(path)
        })
    }

    /// Write several text artifacts so that either all of them land or none do.
    ///
    /// Every file is first staged as a `.tmp` sibling; targets are replaced only once all stages
    /// succeeded. A failed stage removes the ones already written.
    pub fn write_all_text(&self, files: &[(&Path, &str)]) -> XtaskResult<()> {
        let mut staged = Vec::with_capacity(files.len());
        for (path, contents) in files {
            let tmp = staging_path(path);
            if let Err(err) = self.write_text(&tmp, contents) {
                for (tmp, _) in &staged {
                    let _ = fs::remove_file(tmp);
                }
                return Err(err.with_path(path));
            }
            staged.push((tmp, *path));
        }
        for (tmp, path) in &staged {
            fs::rename(tmp, path).map_err(|err| {
                XtaskError::io(format!("failed to replace {}: {err}", path.display()))
                    .with_path(path)
            })?;
        }
        Ok(())
    }

    /// Compare a rendered artifact against the file on disk.
    ///
    /// A missing file counts as drift. Read failures other than not-found are errors.
    pub fn is_up_to_date(&self, path: &Path, expected: &str) -> XtaskResult<bool> {
        match fs::read_to_string(path) {
            Ok(current) => Ok(current == expected),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(
                XtaskError::io(format!("failed to read {}: {err}", path.display())).with_path(path),
            ),
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
