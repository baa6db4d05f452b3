//! Host-facing filter entrypoint.

use cuke_runner::{LifecycleError, NodePredicate, Runner};
use log::warn;
use thiserror::Error;

use crate::config;

/// What to do when filtering leaves no scenarios.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyFilterPolicy {
    /// An empty tree is a valid outcome.
    #[default]
    Allow,
    /// An empty tree is reported as [`FilterError::Exhausted`].
    Reject,
}

impl EmptyFilterPolicy {
    /// Policy selected by [`config::fail_on_empty_filter`].
    #[must_use]
    pub fn from_config() -> Self {
        if config::fail_on_empty_filter() {
            Self::Reject
        } else {
            Self::Allow
        }
    }
}

/// Errors raised by [`filter_children`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The filter removed every scenario and the policy rejects that.
    #[error("no tests remain after filtering with {predicate}")]
    Exhausted {
        /// Description of the predicate that emptied the tree.
        predicate: String,
    },
    /// The runner refused the filter.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Filter `runner` and return how many features survive.
///
/// # Errors
///
/// Returns [`FilterError::Lifecycle`] when `runner` was already filtered, and
/// [`FilterError::Exhausted`] when nothing survives under
/// [`EmptyFilterPolicy::Reject`]. The runner keeps its emptied tree in the
/// latter case.
pub fn filter_children(
    runner: &mut Runner,
    predicate: &dyn NodePredicate,
    policy: EmptyFilterPolicy,
) -> Result<usize, FilterError> {
    runner.filter(predicate)?;
    let remaining = runner.children().len();
    if remaining == 0 {
        warn!("{}: {} left no tests", runner.name(), predicate.describe());
        if policy == EmptyFilterPolicy::Reject {
            return Err(FilterError::Exhausted {
                predicate: predicate.describe(),
            });
        }
    }
    Ok(remaining)
}
