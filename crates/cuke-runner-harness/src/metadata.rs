//! Per-scenario metadata handed from the tree to a host harness.

use cuke_runner::{FeatureNode, ScenarioNode};

/// Identifies one scenario for a host harness.
///
/// # Examples
///
/// ```
/// use cuke_runner_harness::ScenarioMetadata;
///
/// let metadata = ScenarioMetadata::new(
///     "features/login.feature",
///     "Feature: Login",
///     "Successful login",
///     12,
///     vec!["@smoke".to_string()],
/// );
/// assert_eq!(metadata.feature_path(), "features/login.feature");
/// assert_eq!(metadata.scenario_name(), "Successful login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioMetadata {
    feature_path: String,
    feature_name: String,
    scenario_name: String,
    scenario_line: usize,
    tags: Vec<String>,
}

impl ScenarioMetadata {
    /// Create metadata for one scenario.
    #[must_use]
    pub fn new(
        feature_path: impl Into<String>,
        feature_name: impl Into<String>,
        scenario_name: impl Into<String>,
        scenario_line: usize,
        tags: Vec<String>,
    ) -> Self {
        Self {
            feature_path: feature_path.into(),
            feature_name: feature_name.into(),
            scenario_name: scenario_name.into(),
            scenario_line,
            tags,
        }
    }

    /// Describe `scenario`, a child of `feature`.
    #[must_use]
    pub fn from_nodes(feature: &FeatureNode, scenario: &ScenarioNode) -> Self {
        Self::new(
            feature.path().as_str(),
            feature.name(),
            scenario.name(),
            scenario.line(),
            scenario.tags().iter().map(str::to_string).collect(),
        )
    }

    /// Resource path of the feature file.
    #[must_use]
    pub fn feature_path(&self) -> &str {
        &self.feature_path
    }

    /// Display name of the enclosing feature node.
    #[must_use]
    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }

    /// Scenario title.
    #[must_use]
    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    /// One-based line in the feature file.
    #[must_use]
    pub const fn scenario_line(&self) -> usize {
        self.scenario_line
    }

    /// Effective scenario tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::ScenarioMetadata;
    use cuke_runner::{ParsedFeature, ParsedScenario, Tags, tree};

    #[test]
    fn metadata_describes_a_tree_leaf() {
        let parsed = ParsedFeature {
            name: "Auth".to_string(),
            path: "features/auth.feature".into(),
            tags: Tags::from_iter(["@auth"]),
            scenarios: vec![ParsedScenario {
                name: "Login succeeds".to_string(),
                keyword: "Scenario".to_string(),
                line: 17,
                rule: None,
                tags: Tags::from_iter(["@smoke"]),
            }],
        };
        let nodes = tree::build(&[parsed], &Tags::from_iter(["Nightly"]));
        let Some(feature) = nodes.first() else {
            panic!("expected a feature node");
        };
        let Some(scenario) = feature.children().first() else {
            panic!("expected a scenario node");
        };
        let metadata = ScenarioMetadata::from_nodes(feature, scenario);
        assert_eq!(
            metadata,
            ScenarioMetadata::new(
                "features/auth.feature",
                "Feature: Auth",
                "Login succeeds",
                17,
                vec![
                    "@smoke".to_string(),
                    "@auth".to_string(),
                    "@Nightly".to_string()
                ],
            )
        );
    }
}
