//! Cucumber-style JSON discovery report.
//!
//! The shape mirrors the feature/element layout consumed by common Cucumber
//! report tooling, minus step results: discovery happens before anything
//! runs.

use std::io::Write;

use serde::Serialize;

use crate::tags::Tags;
use crate::tree::{FeatureNode, ScenarioNode};

#[derive(Serialize)]
struct JsonFeature<'a> {
    uri: &'a str,
    keyword: &'static str,
    name: &'a str,
    tags: Vec<JsonTag<'a>>,
    elements: Vec<JsonElement<'a>>,
}

#[derive(Serialize)]
struct JsonElement<'a> {
    keyword: &'a str,
    name: &'a str,
    line: usize,
    tags: Vec<JsonTag<'a>>,
}

#[derive(Serialize)]
struct JsonTag<'a> {
    name: &'a str,
}

fn json_tags(tags: &Tags) -> Vec<JsonTag<'_>> {
    tags.iter().map(|name| JsonTag { name }).collect()
}

impl<'a> From<&'a ScenarioNode> for JsonElement<'a> {
    fn from(scenario: &'a ScenarioNode) -> Self {
        Self {
            keyword: scenario.keyword(),
            name: scenario.name(),
            line: scenario.line(),
            tags: json_tags(scenario.tags()),
        }
    }
}

impl<'a> From<&'a FeatureNode> for JsonFeature<'a> {
    fn from(feature: &'a FeatureNode) -> Self {
        Self {
            uri: feature.path().as_str(),
            keyword: "Feature",
            name: feature.title(),
            tags: json_tags(feature.tags()),
            elements: feature.children().iter().map(JsonElement::from).collect(),
        }
    }
}

/// Serialize `features` into `writer`.
///
/// # Examples
/// ```rust
/// use cuke_runner::reporting::json;
///
/// let mut buffer = Vec::new();
/// json::write(&mut buffer, &[])?;
/// assert_eq!(buffer, b"[]");
/// # Ok::<(), serde_json::Error>(())
/// ```
///
/// # Errors
/// Returns an error when serialization or the underlying write fails.
pub fn write<W: Write>(writer: &mut W, features: &[FeatureNode]) -> serde_json::Result<()> {
    let report: Vec<JsonFeature<'_>> = features.iter().map(JsonFeature::from).collect();
    serde_json::to_writer(writer, &report)
}

/// Produce the report as a string.
///
/// # Errors
/// Returns an error when serialization fails.
pub fn to_string(features: &[FeatureNode]) -> serde_json::Result<String> {
    let report: Vec<JsonFeature<'_>> = features.iter().map(JsonFeature::from).collect();
    serde_json::to_string(&report)
}

#[cfg(test)]
mod tests {
    use super::to_string;
    use crate::loader::{ParsedFeature, ParsedScenario};
    use crate::tags::Tags;
    use crate::tree::build;
    use serde_json::{Value, json};

    #[test]
    fn renders_features_and_elements() {
        let parsed = ParsedFeature {
            name: "FA".to_string(),
            path: "cucumber/runtime/junit/fa.feature".into(),
            tags: Tags::from_iter(["@fa"]),
            scenarios: vec![ParsedScenario {
                name: "first".to_string(),
                keyword: "Scenario Outline".to_string(),
                line: 3,
                rule: None,
                tags: Tags::new(),
            }],
        };
        let nodes = build(&[parsed], &Tags::from_iter(["UsedCategory"]));
        let text = to_string(&nodes).unwrap_or_else(|e| panic!("serialise: {e}"));
        let value: Value = serde_json::from_str(&text).unwrap_or_else(|e| panic!("reparse: {e}"));
        assert_eq!(
            value,
            json!([{
                "uri": "cucumber/runtime/junit/fa.feature",
                "keyword": "Feature",
                "name": "FA",
                "tags": [{"name": "@fa"}, {"name": "@UsedCategory"}],
                "elements": [{
                    "keyword": "Scenario Outline",
                    "name": "first",
                    "line": 3,
                    "tags": [{"name": "@fa"}, {"name": "@UsedCategory"}],
                }],
            }])
        );
    }
}
