//! Entry-point configuration.
//!
//! An [`EntryPoint`] is the declarative description a host hands to the
//! runner: which package it lives in, which feature addresses it names, which
//! categories it belongs to, and which report plugins it wants.

use std::path::PathBuf;

use crate::error::RunnerError;
use crate::tags::Tags;

/// Declarative runner configuration.
///
/// # Examples
///
/// ```
/// use cuke_runner::EntryPoint;
///
/// let entry = EntryPoint::new("CategoryFeature")
///     .with_package("cucumber.runtime.junit")
///     .with_category("UsedCategory");
/// assert_eq!(entry.name(), "CategoryFeature");
/// assert!(entry.features().is_empty());
/// assert!(entry.categories().contains("@UsedCategory"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryPoint {
    name: String,
    package: Option<String>,
    features: Vec<String>,
    plugins: Vec<String>,
    categories: Tags,
}

impl EntryPoint {
    /// Create an entry point with the given display name and no options.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an entry point from a Rust module path such as
    /// `module_path!()`, using the final segment as the display name.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuke_runner::EntryPoint;
    ///
    /// let entry = EntryPoint::from_module_path("acceptance::login::LoginRunner");
    /// assert_eq!(entry.name(), "LoginRunner");
    /// assert_eq!(entry.package(), Some("acceptance::login"));
    /// ```
    #[must_use]
    pub fn from_module_path(path: &str) -> Self {
        match path.rsplit_once("::") {
            Some((package, name)) => Self::new(name).with_package(package),
            None => Self::new(path),
        }
    }

    /// Set the package the implicit feature root is derived from.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Declare explicit feature addresses, replacing implicit discovery.
    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    /// Register a report plugin such as `json:target/report.json`.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugins.push(plugin.into());
        self
    }

    /// Attach a category applied to every discovered scenario.
    #[must_use]
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.categories.extend([category]);
        self
    }

    /// Display name of the entry point.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package used for implicit discovery, if any.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Explicit feature addresses in declaration order.
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Raw plugin specifications in declaration order.
    #[must_use]
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// Categories attached to the entry point.
    #[must_use]
    pub fn categories(&self) -> &Tags {
        &self.categories
    }
}

/// A parsed report plugin specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PluginSpec {
    /// Cucumber-style JSON written to the given path.
    Json(PathBuf),
}

impl PluginSpec {
    /// Parse a `name:argument` plugin specification.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Plugin`] for unknown plugin names or a missing
    /// output path.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuke_runner::entry::PluginSpec;
    /// use std::path::PathBuf;
    ///
    /// let spec = PluginSpec::parse("json:target/cucumber.json")?;
    /// assert_eq!(spec, PluginSpec::Json(PathBuf::from("target/cucumber.json")));
    /// assert!(PluginSpec::parse("pretty").is_err());
    /// # Ok::<(), cuke_runner::RunnerError>(())
    /// ```
    pub fn parse(spec: &str) -> Result<Self, RunnerError> {
        let (name, argument) = spec.split_once(':').unwrap_or((spec, ""));
        match name.trim() {
            "json" if !argument.trim().is_empty() => {
                Ok(Self::Json(PathBuf::from(argument.trim())))
            }
            "json" => Err(RunnerError::Plugin {
                spec: spec.to_string(),
                reason: "missing output path".to_string(),
            }),
            other => Err(RunnerError::Plugin {
                spec: spec.to_string(),
                reason: format!("unknown plugin '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryPoint, PluginSpec};
    use crate::error::RunnerError;
    use rstest::rstest;

    #[test]
    fn module_path_without_separator_has_no_package() {
        let entry = EntryPoint::from_module_path("Runner");
        assert_eq!(entry.name(), "Runner");
        assert_eq!(entry.package(), None);
    }

    #[test]
    fn features_accumulate_in_order() {
        let entry = EntryPoint::new("E")
            .with_features(["classpath:a"])
            .with_features(["b", "classpath:c"]);
        assert_eq!(entry.features(), ["classpath:a", "b", "classpath:c"]);
    }

    #[test]
    fn categories_are_normalised() {
        let entry = EntryPoint::new("E")
            .with_category("UsedCategory")
            .with_category("@UsedCategory");
        assert_eq!(entry.categories().as_slice(), ["@UsedCategory"]);
    }

    #[rstest]
    #[case("json:", "missing output path")]
    #[case("json", "missing output path")]
    #[case("html:out", "unknown plugin 'html'")]
    fn rejects_unusable_plugins(#[case] spec: &str, #[case] reason: &str) {
        match PluginSpec::parse(spec) {
            Err(RunnerError::Plugin { reason: actual, .. }) => assert_eq!(actual, reason),
            other => panic!("expected plugin error for `{spec}`, got {other:?}"),
        }
    }
}
