//! Category filtering of the test tree.
//!
//! A [`NodePredicate`] decides whether a scenario's effective tags keep it in
//! the tree. Pruning is depth-first: scenarios are tested individually, and a
//! feature survives only while at least one of its scenarios does.

mod expr;

use log::info;

pub use self::expr::{TagExprError, TagExpression};

use crate::tags::Tags;
use crate::tree::FeatureNode;

/// Decides whether a node carrying `tags` survives filtering.
pub trait NodePredicate {
    /// Return `true` when a node with these effective tags should be kept.
    fn matches(&self, tags: &Tags) -> bool;

    /// Human-readable form used in log output.
    fn describe(&self) -> String;
}

/// Include/exclude predicate over categories.
///
/// An empty include set admits every node; otherwise a node must carry at
/// least one included tag. Any excluded tag then vetoes the node.
///
/// # Examples
///
/// ```
/// use cuke_runner::{CategoryPredicate, NodePredicate, Tags};
///
/// let predicate = CategoryPredicate::new().include(["smoke"]).exclude(["@wip"]);
/// assert!(predicate.matches(&Tags::from_iter(["@smoke"])));
/// assert!(!predicate.matches(&Tags::from_iter(["@smoke", "@wip"])));
/// assert!(!predicate.matches(&Tags::from_iter(["@slow"])));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryPredicate {
    include: Tags,
    exclude: Tags,
}

impl CategoryPredicate {
    /// A predicate that admits everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a predicate including a single category.
    #[must_use]
    pub fn include_category(category: &str) -> Self {
        Self::new().include([category])
    }

    /// Shorthand for a predicate excluding a single category.
    #[must_use]
    pub fn exclude_category(category: &str) -> Self {
        Self::new().exclude([category])
    }

    /// Add categories to the include set.
    #[must_use]
    pub fn include<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include.extend(categories);
        self
    }

    /// Add categories to the exclude set.
    #[must_use]
    pub fn exclude<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude.extend(categories);
        self
    }

    /// The include set.
    #[must_use]
    pub fn included(&self) -> &Tags {
        &self.include
    }

    /// The exclude set.
    #[must_use]
    pub fn excluded(&self) -> &Tags {
        &self.exclude
    }
}

impl NodePredicate for CategoryPredicate {
    fn matches(&self, tags: &Tags) -> bool {
        let included = self.include.is_empty() || tags.intersects(&self.include);
        included && !tags.intersects(&self.exclude)
    }

    fn describe(&self) -> String {
        match (self.include.is_empty(), self.exclude.is_empty()) {
            (true, true) => "all categories".to_string(),
            (false, true) => format!("include [{}]", self.include),
            (true, false) => format!("exclude [{}]", self.exclude),
            (false, false) => format!("include [{}] exclude [{}]", self.include, self.exclude),
        }
    }
}

impl NodePredicate for TagExpression {
    fn matches(&self, tags: &Tags) -> bool {
        self.evaluate(tags.iter())
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Prune `tree` to the scenarios accepted by `predicate`.
///
/// Order is preserved and features left without scenarios are dropped. An
/// empty result is returned as-is; deciding whether that is fatal belongs to
/// the caller.
///
/// # Examples
///
/// ```
/// use cuke_runner::{filter, CategoryPredicate};
///
/// let pruned = filter::apply(Vec::new(), &CategoryPredicate::include_category("C"));
/// assert!(pruned.is_empty());
/// ```
#[must_use]
pub fn apply(tree: Vec<FeatureNode>, predicate: &dyn NodePredicate) -> Vec<FeatureNode> {
    let before = tree.len();
    let pruned: Vec<FeatureNode> = tree
        .into_iter()
        .filter_map(|mut feature| {
            feature.retain_children(|scenario| predicate.matches(scenario.tags()));
            (!feature.children().is_empty()).then_some(feature)
        })
        .collect();
    info!(
        "filter {} kept {} of {before} feature(s)",
        predicate.describe(),
        pruned.len()
    );
    pruned
}
