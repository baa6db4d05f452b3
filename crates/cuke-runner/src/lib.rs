//! Feature discovery and test-tree construction for Gherkin-driven runners.
//!
//! A [`Runner`] takes an [`EntryPoint`] describing where features live,
//! resolves the resource roots, parses every `.feature` file beneath them and
//! exposes the result as an ordered tree of [`FeatureNode`]s that a host test
//! framework can report against. The tree can be narrowed once with a
//! [`CategoryPredicate`] or a [`TagExpression`].
//!
//! # Examples
//!
//! ```no_run
//! use cuke_runner::{CategoryPredicate, EntryPoint, Runner};
//!
//! let entry = EntryPoint::new("LoginFeatures")
//!     .with_features(["classpath:features/login"]);
//! let mut runner = Runner::new(&entry, "tests/resources")?;
//! runner.filter(&CategoryPredicate::new().include(["smoke"]))?;
//! for feature in runner.children() {
//!     println!("{}", feature.name());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entry;
pub mod error;
pub mod filter;
pub mod loader;
pub mod paths;
pub mod reporting;
pub mod runner;
pub mod tags;
pub mod tree;

pub use entry::EntryPoint;
pub use error::{LifecycleError, LoadError, ParseError, RunnerError};
pub use filter::{CategoryPredicate, NodePredicate, TagExprError, TagExpression};
pub use loader::{FeatureLoader, ParsedFeature, ParsedScenario};
pub use paths::ResourceRoot;
pub use runner::{Runner, RunnerState};
pub use tags::Tags;
pub use tree::{FeatureNode, ScenarioNode, TestNode};
