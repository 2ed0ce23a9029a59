//! TOML configuration files.

use crate::runtime::error::{XtaskError, XtaskResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Reads one workspace-relative TOML file into `T`.
///
/// Only syntax and shape are checked here; callers own any semantic rules.
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned + Default> ConfigLoader<T> {
    /// Loader for `root/relative_path`.
    pub fn new(root: &Path, relative_path: &str) -> Self {
        Self {
            path: root.join(relative_path),
            _marker: PhantomData,
        }
    }

    /// Parse the file, or return `T::default()` when it does not exist.
    ///
    /// Unreadable or invalid files are config errors naming the file.
    pub fn load_or_default(&self) -> XtaskResult<T> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(err) => return Err(self.error("read", err)),
        };
        toml::from_str(&body).map_err(|err| self.error("parse", err))
    }

    fn error(&self, action: &str, err: impl std::fmt::Display) -> XtaskError {
        XtaskError::config(format!("failed to {action} {}: {err}", self.path.display()))
            .with_path(&self.path)
    }
}
