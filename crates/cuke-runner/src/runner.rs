//! The runner facade tying resolution, loading, tree building and filtering
//! together.

use std::path::PathBuf;

use log::info;

use crate::entry::{EntryPoint, PluginSpec};
use crate::error::{LifecycleError, RunnerError};
use crate::filter::{self, NodePredicate};
use crate::loader::{FeatureLoader, ParsedFeature};
use crate::paths;
use crate::reporting::JsonReporter;
use crate::tree::{self, FeatureNode, TestNode};

/// Lifecycle stage of a [`Runner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerState {
    /// The tree has been built and not yet filtered.
    Built,
    /// A filter has been applied; the tree is final.
    Filtered,
}

/// A built test tree for one entry point.
#[derive(Debug)]
pub struct Runner {
    name: String,
    features: Vec<ParsedFeature>,
    tree: Vec<FeatureNode>,
    state: RunnerState,
    reporters: Vec<JsonReporter>,
}

impl Runner {
    /// Resolve, load and build the tree for `entry` below `base`.
    ///
    /// Report plugins are validated up front but their outputs are only
    /// created once the tree exists. Each opened report immediately holds the
    /// built tree; if any output cannot be opened, the ones already created
    /// are removed again.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Load`] when discovery or parsing fails, and
    /// [`RunnerError::Plugin`] or [`RunnerError::Report`] for unusable
    /// report plugins.
    pub fn new(entry: &EntryPoint, base: impl Into<PathBuf>) -> Result<Self, RunnerError> {
        let plugins = entry
            .plugins()
            .iter()
            .map(|spec| PluginSpec::parse(spec))
            .collect::<Result<Vec<_>, _>>()?;

        let roots = paths::resolve(entry);
        let features = FeatureLoader::new(base).load(&roots)?;
        let tree = tree::build(&features, entry.categories());
        info!(
            "{} built {} feature node(s) with {} scenario(s)",
            entry.name(),
            tree.len(),
            tree.iter().map(|f| f.children().len()).sum::<usize>()
        );

        let reporters = open_reporters(plugins, &tree)?;

        Ok(Self {
            name: entry.name().to_string(),
            features,
            tree,
            state: RunnerState::Built,
            reporters,
        })
    }

    /// Prune the tree with `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::AlreadyFiltered`] on a second call; the
    /// tree is left untouched.
    pub fn filter(&mut self, predicate: &dyn NodePredicate) -> Result<(), LifecycleError> {
        if self.state == RunnerState::Filtered {
            return Err(LifecycleError::AlreadyFiltered);
        }
        let tree = std::mem::take(&mut self.tree);
        self.tree = filter::apply(tree, predicate);
        self.state = RunnerState::Filtered;
        Ok(())
    }

    /// Current feature nodes in discovery order.
    #[must_use]
    pub fn children(&self) -> &[FeatureNode] {
        &self.tree
    }

    /// Display name of the entry point.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lifecycle stage.
    #[must_use]
    pub const fn state(&self) -> RunnerState {
        self.state
    }

    /// Every parsed feature, unaffected by filtering.
    #[must_use]
    pub fn features(&self) -> &[ParsedFeature] {
        &self.features
    }

    /// Borrowed node views over [`Self::children`].
    #[must_use]
    pub fn nodes(&self) -> Vec<TestNode<'_>> {
        self.tree.iter().map(TestNode::Feature).collect()
    }

    /// Write the current tree to every opened report.
    ///
    /// # Errors
    ///
    /// Returns the first serialisation or I/O failure.
    pub fn write_reports(&mut self) -> Result<(), RunnerError> {
        for reporter in &mut self.reporters {
            reporter.write(&self.tree)?;
        }
        Ok(())
    }
}

fn open_reporters(
    plugins: Vec<PluginSpec>,
    tree: &[FeatureNode],
) -> Result<Vec<JsonReporter>, RunnerError> {
    let mut opened: Vec<JsonReporter> = Vec::with_capacity(plugins.len());
    for plugin in plugins {
        let result = match plugin {
            PluginSpec::Json(path) => JsonReporter::create(path),
        }
        .and_then(|mut reporter| match reporter.write(tree) {
            Ok(()) => Ok(reporter),
            Err(err) => {
                reporter.discard();
                Err(err)
            }
        });
        match result {
            Ok(reporter) => opened.push(reporter),
            Err(err) => {
                opened.into_iter().for_each(JsonReporter::discard);
                return Err(err);
            }
        }
    }
    Ok(opened)
}
