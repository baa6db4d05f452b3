//! Resource-root resolution.
//!
//! Explicit feature addresses always win; only an entry point without any
//! falls back to the directory derived from its package. Resolution is pure:
//! whether a root exists is the loader's concern.

use std::fmt;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use log::debug;

use crate::entry::EntryPoint;

const CLASSPATH_PREFIX: &str = "classpath:";

/// A classpath-style address relative to the resource base directory.
///
/// The empty root denotes the base directory itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceRoot(Utf8PathBuf);

impl ResourceRoot {
    /// Parse an address, stripping an optional `classpath:` prefix and any
    /// leading or trailing `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuke_runner::ResourceRoot;
    ///
    /// let root = ResourceRoot::parse("classpath:cucumber/runtime/junit");
    /// assert_eq!(root.as_path().as_str(), "cucumber/runtime/junit");
    /// assert_eq!(ResourceRoot::parse("/features/").as_path().as_str(), "features");
    /// ```
    #[must_use]
    pub fn parse(address: &str) -> Self {
        let trimmed = address.trim();
        let path = trimmed.strip_prefix(CLASSPATH_PREFIX).unwrap_or(trimmed);
        Self(Utf8PathBuf::from(path.trim_matches('/')))
    }

    /// Derive the implicit root for a package name.
    ///
    /// Both dotted (`a.b.c`) and Rust module (`a::b::c`) spellings map to
    /// `a/b/c`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuke_runner::ResourceRoot;
    ///
    /// assert_eq!(
    ///     ResourceRoot::from_package("cucumber.runtime.junit").as_path().as_str(),
    ///     "cucumber/runtime/junit"
    /// );
    /// assert_eq!(ResourceRoot::from_package("acceptance::login").as_path().as_str(), "acceptance/login");
    /// ```
    #[must_use]
    pub fn from_package(package: &str) -> Self {
        let path = package
            .split("::")
            .flat_map(|segment| segment.split('.'))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self(Utf8PathBuf::from(path))
    }

    /// The root package, i.e. the base directory itself.
    #[must_use]
    pub fn base() -> Self {
        Self(Utf8PathBuf::new())
    }

    /// Relative path of this root.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }

    /// Return `true` when the root climbs above the base directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuke_runner::ResourceRoot;
    ///
    /// assert!(ResourceRoot::parse("classpath:../other").escapes_base());
    /// assert!(!ResourceRoot::parse("classpath:features/./login").escapes_base());
    /// ```
    #[must_use]
    pub fn escapes_base(&self) -> bool {
        self.0.components().any(|component| {
            !matches!(component, Utf8Component::Normal(_) | Utf8Component::CurDir)
        })
    }

    /// Return `true` for the root package.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.0.as_str().is_empty()
    }
}

impl fmt::Display for ResourceRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CLASSPATH_PREFIX}{}", self.0)
    }
}

/// Resolve the ordered resource roots for an entry point.
///
/// # Examples
///
/// ```
/// use cuke_runner::{paths, EntryPoint, ResourceRoot};
///
/// let implicit = EntryPoint::new("Runner").with_package("cucumber.runtime.junit");
/// assert_eq!(paths::resolve(&implicit), [ResourceRoot::parse("cucumber/runtime/junit")]);
///
/// let explicit = implicit.clone().with_features(["classpath:gibber/ish"]);
/// assert_eq!(paths::resolve(&explicit), [ResourceRoot::parse("gibber/ish")]);
/// ```
#[must_use]
pub fn resolve(entry: &EntryPoint) -> Vec<ResourceRoot> {
    let roots = if entry.features().is_empty() {
        vec![
            entry
                .package()
                .map_or_else(ResourceRoot::base, ResourceRoot::from_package),
        ]
    } else {
        entry
            .features()
            .iter()
            .map(|address| ResourceRoot::parse(address))
            .collect()
    };
    debug!(
        "resolved {} resource root(s) for {}: {}",
        roots.len(),
        entry.name(),
        roots
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    roots
}
