//! Host-side contracts for `cuke-runner`.
//!
//! This crate turns a built [`cuke_runner::Runner`] into per-scenario
//! [`ScenarioMetadata`] a host registers as tests, and owns the host's
//! decision about whether filtering everything away is an error.

pub mod config;
pub mod filter;
mod metadata;

pub use filter::{EmptyFilterPolicy, FilterError, filter_children};
pub use metadata::ScenarioMetadata;

use cuke_runner::Runner;

/// Enumerate the scenarios of `runner` in tree order.
///
/// # Examples
///
/// ```no_run
/// use cuke_runner::{EntryPoint, Runner};
/// use cuke_runner_harness::plan;
///
/// let runner = Runner::new(&EntryPoint::new("Suite").with_package("features"), "tests")?;
/// for scenario in plan(&runner) {
///     assert!(!scenario.feature_path().is_empty());
/// }
/// # Ok::<(), cuke_runner::RunnerError>(())
/// ```
#[must_use]
pub fn plan(runner: &Runner) -> Vec<ScenarioMetadata> {
    runner
        .children()
        .iter()
        .flat_map(|feature| {
            feature
                .children()
                .iter()
                .map(move |scenario| ScenarioMetadata::from_nodes(feature, scenario))
        })
        .collect()
}
