//! Feature discovery and parsing.
//!
//! The loader walks each [`ResourceRoot`] below an explicit base directory,
//! reads every `.feature` file through a capability handle on that directory
//! and parses it with the `gherkin` crate. The first malformed file aborts
//! the load; nothing parsed up to that point is returned.

mod discovery;
mod parse;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use log::{debug, info, warn};

use crate::error::LoadError;
use crate::paths::ResourceRoot;
use crate::tags::Tags;

use self::discovery::{collect_feature_files, resource_path};

/// A successfully parsed feature file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedFeature {
    /// Feature title as written after `Feature:`.
    pub name: String,
    /// Slash-separated resource path relative to the base directory.
    pub path: Utf8PathBuf,
    /// Tags declared on the feature.
    pub tags: Tags,
    /// Scenarios in declaration order.
    pub scenarios: Vec<ParsedScenario>,
}

/// A scenario (or scenario outline) declared in a feature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedScenario {
    /// Scenario title.
    pub name: String,
    /// Keyword used in the source, e.g. `Scenario` or `Scenario Outline`.
    pub keyword: String,
    /// One-based line of the scenario in its feature file.
    pub line: usize,
    /// Name of the enclosing `Rule:`, if any.
    pub rule: Option<String>,
    /// Tags declared on the scenario and its enclosing rule.
    pub tags: Tags,
}

/// Locates and parses feature files below a base directory.
#[derive(Clone, Debug)]
pub struct FeatureLoader {
    base: PathBuf,
}

impl FeatureLoader {
    /// Create a loader rooted at `base`, the directory classpath addresses
    /// are resolved against.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The base directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Discover and parse every feature below `roots`, in discovery order.
    ///
    /// Roots are visited in the given order and the files beneath each root
    /// in lexicographic path order. A file reached through more than one
    /// root is loaded once, at its first position. Roots that match nothing
    /// contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] for the first malformed feature file, or
    /// an I/O variant when scanning or reading fails. No features are
    /// returned in either case.
    pub fn load(&self, roots: &[ResourceRoot]) -> Result<Vec<ParsedFeature>, LoadError> {
        let resources = self.discover(roots)?;
        if resources.is_empty() {
            info!("no feature files found below {}", self.base.display());
            return Ok(Vec::new());
        }

        let dir = Dir::open_ambient_dir(self.utf8_base()?, ambient_authority()).map_err(
            |source| LoadError::Io {
                path: self.base.clone(),
                source,
            },
        )?;

        let mut features = Vec::with_capacity(resources.len());
        for path in resources {
            let text = read_resource(&dir, &path)?;
            features.push(parse::parse_feature(path, text)?);
        }
        info!(
            "loaded {} feature file(s) from {}",
            features.len(),
            self.base.display()
        );
        Ok(features)
    }

    fn discover(&self, roots: &[ResourceRoot]) -> Result<Vec<Utf8PathBuf>, LoadError> {
        let mut seen = HashSet::new();
        let mut resources = Vec::new();
        for root in roots {
            if root.escapes_base() {
                return Err(LoadError::OutsideBase(root.as_path().to_path_buf()));
            }
            let mut target = self.base.join(root.as_path());
            if target.as_os_str().is_empty() {
                target = PathBuf::from(".");
            }
            let files = collect_feature_files(&target)?;
            debug!("{root} matched {} feature file(s)", files.len());
            for file in files {
                let path = resource_path(&self.base, &file)?;
                if seen.insert(path.clone()) {
                    resources.push(path);
                } else {
                    warn!("{path} is reachable from several roots; loading it once");
                }
            }
        }
        Ok(resources)
    }

    fn utf8_base(&self) -> Result<&Utf8Path, LoadError> {
        let base = if self.base.as_os_str().is_empty() {
            Path::new(".")
        } else {
            self.base.as_path()
        };
        Utf8Path::from_path(base).ok_or_else(|| LoadError::NonUtf8Path(self.base.clone()))
    }
}

fn read_resource(dir: &Dir, path: &Utf8Path) -> Result<String, LoadError> {
    dir.read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
