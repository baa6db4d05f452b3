//! The host-facing test tree.
//!
//! Features become [`FeatureNode`]s holding one [`ScenarioNode`] per
//! scenario. Hosts that only care about the shared "name plus children"
//! shape walk the tree through the borrowed [`TestNode`] view.

use camino::{Utf8Path, Utf8PathBuf};

use crate::loader::{ParsedFeature, ParsedScenario};
use crate::tags::Tags;

const FEATURE_PREFIX: &str = "Feature: ";

/// A leaf describing one runnable scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioNode {
    name: String,
    keyword: String,
    line: usize,
    tags: Tags,
}

impl ScenarioNode {
    fn from_parsed(scenario: &ParsedScenario, inherited: &Tags) -> Self {
        Self {
            name: scenario.name.clone(),
            keyword: scenario.keyword.clone(),
            line: scenario.line,
            tags: scenario.tags.merged(inherited),
        }
    }

    /// Scenario title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keyword used in the source, e.g. `Scenario Outline`.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// One-based line in the feature file.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Effective tags: the scenario's own, then its feature's, then the
    /// entry point's categories.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// A feature and its scenarios.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureNode {
    name: String,
    path: Utf8PathBuf,
    tags: Tags,
    children: Vec<ScenarioNode>,
}

impl FeatureNode {
    fn from_parsed(feature: &ParsedFeature, categories: &Tags) -> Self {
        let inherited = feature.tags.merged(categories);
        Self {
            name: format!("{FEATURE_PREFIX}{}", feature.name),
            path: feature.path.clone(),
            children: feature
                .scenarios
                .iter()
                .map(|scenario| ScenarioNode::from_parsed(scenario, &inherited))
                .collect(),
            tags: inherited,
        }
    }

    /// Display name, `Feature: <title>`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Feature title without the `Feature: ` prefix.
    #[must_use]
    pub fn title(&self) -> &str {
        self.name.strip_prefix(FEATURE_PREFIX).unwrap_or(&self.name)
    }

    /// Resource path of the feature file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Tags inherited by every scenario: the feature's own and the entry
    /// point's categories.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Scenarios in declaration order.
    #[must_use]
    pub fn children(&self) -> &[ScenarioNode] {
        &self.children
    }

    pub(crate) fn retain_children(&mut self, keep: impl FnMut(&ScenarioNode) -> bool) {
        self.children.retain(keep);
    }
}

/// Borrowed view over either kind of node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestNode<'a> {
    /// A feature with scenario children.
    Feature(&'a FeatureNode),
    /// A scenario leaf.
    Scenario(&'a ScenarioNode),
}

impl<'a> TestNode<'a> {
    /// Display name of the node.
    #[must_use]
    pub fn name(self) -> &'a str {
        match self {
            Self::Feature(feature) => feature.name(),
            Self::Scenario(scenario) => scenario.name(),
        }
    }

    /// Child nodes; scenarios have none.
    #[must_use]
    pub fn children(self) -> Vec<Self> {
        match self {
            Self::Feature(feature) => feature.children().iter().map(Self::Scenario).collect(),
            Self::Scenario(_) => Vec::new(),
        }
    }

    /// Return `true` for leaves.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Scenario(_))
    }
}

/// Build one feature node per parsed feature, preserving order.
///
/// `categories` are appended to every scenario's effective tags.
///
/// # Examples
///
/// ```
/// use cuke_runner::{tree, Tags};
///
/// let nodes = tree::build(&[], &Tags::new());
/// assert!(nodes.is_empty());
/// ```
#[must_use]
pub fn build(features: &[ParsedFeature], categories: &Tags) -> Vec<FeatureNode> {
    features
        .iter()
        .map(|feature| FeatureNode::from_parsed(feature, categories))
        .collect()
}
