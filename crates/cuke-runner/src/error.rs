//! Error types for discovery, parsing and the runner lifecycle.
//!
//! Parse failures are kept distinct from I/O failures so hosts can render the
//! fixed `Error parsing feature file <path>` message while still reaching the
//! underlying grammar error through [`std::error::Error::source`].

use std::path::PathBuf;

use camino::Utf8PathBuf;
use thiserror::Error;

/// A feature file that the Gherkin grammar rejected.
///
/// The display form is fixed; the grammar diagnostic is the error source.
///
/// # Examples
///
/// ```
/// use cuke_runner::ParseError;
///
/// let err = gherkin::Feature::parse("not gherkin\n", gherkin::GherkinEnv::default())
///     .map_err(|source| ParseError::new("features/broken.feature", source))
///     .err();
/// let Some(err) = err else { panic!("expected a parse failure") };
/// assert_eq!(err.to_string(), "Error parsing feature file features/broken.feature");
/// ```
#[derive(Debug, Error)]
#[error("Error parsing feature file {path}")]
pub struct ParseError {
    path: Utf8PathBuf,
    #[source]
    source: gherkin::ParseError,
}

impl ParseError {
    /// Wrap a grammar error for the resource at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, source: gherkin::ParseError) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    /// Slash-separated resource path relative to the resource base.
    #[must_use]
    pub fn path(&self) -> &camino::Utf8Path {
        &self.path
    }
}

/// Errors raised while locating and parsing feature resources.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A feature file failed to parse; the whole load is abandoned.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A discovered feature file could not be read.
    #[error("failed to read feature file {path}: {source}")]
    Read {
        /// Resource path relative to the base directory.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Walking a resource root or opening the base directory failed.
    #[error("failed to scan {path}: {source}")]
    Io {
        /// Filesystem path that could not be scanned.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A resource root or discovered file lies outside the base directory.
    #[error("resource {0} escapes the resource base")]
    OutsideBase(Utf8PathBuf),

    /// A discovered path is not valid UTF-8 and cannot be addressed.
    #[error("feature path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}

/// Errors raised while constructing a [`crate::Runner`].
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Discovery or parsing failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A report plugin specification was not understood.
    #[error("invalid plugin '{spec}': {reason}")]
    Plugin {
        /// The raw specification.
        spec: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A report output could not be created or written.
    #[error("failed to write report {}: {source}", .path.display())]
    Report {
        /// Report destination.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A report could not be serialised.
    #[error("failed to serialise report: {0}")]
    Serialise(#[from] serde_json::Error),
}

impl RunnerError {
    /// Return the parse failure when construction stopped on malformed
    /// Gherkin.
    #[must_use]
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Load(LoadError::Parse(err)) => Some(err),
            _ => None,
        }
    }
}

/// Misuse of the runner lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// A filter has already been applied to this runner.
    #[error("runner has already been filtered")]
    AlreadyFiltered,
}

#[cfg(test)]
mod tests {
    use super::{LifecycleError, LoadError, RunnerError};

    #[test]
    fn read_error_names_the_resource() {
        let err = LoadError::Read {
            path: "features/a.feature".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read feature file features/a.feature: denied"
        );
    }

    #[test]
    fn outside_base_error_names_the_resource() {
        let err = LoadError::OutsideBase("../other".into());
        assert_eq!(err.to_string(), "resource ../other escapes the resource base");
    }

    #[test]
    fn plugin_error_displays_reason() {
        let err = RunnerError::Plugin {
            spec: "html:out".to_string(),
            reason: "unknown plugin 'html'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid plugin 'html:out': unknown plugin 'html'"
        );
        assert!(err.as_parse_error().is_none());
    }

    #[test]
    fn lifecycle_error_message() {
        assert_eq!(
            LifecycleError::AlreadyFiltered.to_string(),
            "runner has already been filtered"
        );
    }
}
