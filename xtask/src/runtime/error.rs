//! Error type shared by every catalog command.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Failure class, which decides how a caller reacts.
///
/// Per-record findings are not errors. The validator collects them as problems and reports a
/// single [`XtaskErrorCategory::Validation`] failure at the end.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum XtaskErrorCategory {
    /// Unreadable catalog config or schema document.
    Config,
    /// An input directory is missing.
    Environment,
    /// Bad arguments, failed validation, or drifted output under `--check`.
    Validation,
    /// Malformed YAML or JSON.
    Parse,
    /// Filesystem failure.
    Io,
}

/// Command failure: a category, a message, and context picked up on the way out.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XtaskError {
    /// Failure class.
    pub category: XtaskErrorCategory,
    /// What went wrong.
    pub message: String,
    operation: Option<String>,
    target: Option<String>,
    hint: Option<String>,
}

/// Result alias used throughout the xtask crate.
pub type XtaskResult<T> = Result<T, XtaskError>;

impl XtaskError {
    /// Error of `category` with no context attached.
    pub fn new(category: XtaskErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            operation: None,
            target: None,
            hint: None,
        }
    }

    /// Shorthand for [`XtaskErrorCategory::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Config, message)
    }

    /// Shorthand for [`XtaskErrorCategory::Environment`].
    pub fn environment(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Environment, message)
    }

    /// Shorthand for [`XtaskErrorCategory::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Validation, message)
    }

    /// Shorthand for [`XtaskErrorCategory::Parse`].
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Parse, message)
    }

    /// Shorthand for [`XtaskErrorCategory::Io`].
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Io, message)
    }

    /// Name the step that failed, e.g. `seo` or `load projects`.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Name the file or directory involved.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Suggest the command or edit that fixes the failure.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for XtaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        let context = [
            ("operation", &self.operation),
            ("target", &self.target),
            ("hint", &self.hint),
        ];
        for (label, value) in context {
            if let Some(value) = value {
                write!(f, " [{label}: {value}]")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for XtaskError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_renders_in_fixed_order_regardless_of_attach_order() {
        let err = XtaskError::parse("failed to parse data/projects/x.yaml")
            .with_hint("run `cargo xtask validate`")
            .with_path(Path::new("data/projects/x.yaml"))
            .with_operation("load projects");
        assert_eq!(
            err.to_string(),
            "failed to parse data/projects/x.yaml [operation: load projects] \
             [target: data/projects/x.yaml] [hint: run `cargo xtask validate`]"
        );
    }

    #[test]
    fn bare_error_prints_only_its_message() {
        let err = XtaskError::io("disk full");
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(err.category, XtaskErrorCategory::Io);
    }
}
