//! Conversion of Gherkin syntax trees into parsed features.

use camino::Utf8PathBuf;
use gherkin::GherkinEnv;

use super::{ParsedFeature, ParsedScenario};
use crate::error::ParseError;
use crate::tags::Tags;

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

fn scenario_from(scenario: &gherkin::Scenario, rule: Option<&gherkin::Rule>) -> ParsedScenario {
    let mut tags = Tags::from_iter(&scenario.tags);
    if let Some(rule) = rule {
        tags.extend(&rule.tags);
    }
    ParsedScenario {
        name: scenario.name.clone(),
        keyword: scenario.keyword.trim().to_string(),
        line: scenario.position.line,
        rule: rule.map(|r| r.name.clone()),
        tags,
    }
}

/// Parse feature `text` addressed by `path`.
///
/// Scenarios declared directly under the feature come first, followed by
/// those nested in `Rule:` blocks, each group in declaration order.
pub(super) fn parse_feature(path: Utf8PathBuf, mut text: String) -> Result<ParsedFeature, ParseError> {
    normalise_trailing_newline(&mut text);
    let feature = match gherkin::Feature::parse(&text, GherkinEnv::default()) {
        Ok(feature) => feature,
        Err(source) => return Err(ParseError::new(path, source)),
    };

    let mut scenarios: Vec<ParsedScenario> = feature
        .scenarios
        .iter()
        .map(|scenario| scenario_from(scenario, None))
        .collect();
    for rule in &feature.rules {
        scenarios.extend(
            rule.scenarios
                .iter()
                .map(|scenario| scenario_from(scenario, Some(rule))),
        );
    }

    Ok(ParsedFeature {
        name: feature.name.clone(),
        path,
        tags: Tags::from_iter(&feature.tags),
        scenarios,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_feature;
    use crate::error::ParseError;
    use crate::loader::ParsedFeature;

    fn parse(text: &str) -> Result<ParsedFeature, ParseError> {
        parse_feature("features/sample.feature".into(), text.to_string())
    }

    #[test]
    fn collects_feature_and_scenario_metadata() {
        let feature = parse(
            "@billing\nFeature: Invoices\n\n  @smoke\n  Scenario: Issue\n    Given an order\n\n  Scenario: Void\n    Given an invoice\n",
        )
        .unwrap_or_else(|e| panic!("parse: {e}"));

        assert_eq!(feature.name, "Invoices");
        assert_eq!(feature.path.as_str(), "features/sample.feature");
        assert_eq!(feature.tags.as_slice(), ["@billing"]);
        let names: Vec<_> = feature.scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Issue", "Void"]);
        let Some(first) = feature.scenarios.first() else {
            panic!("expected a scenario");
        };
        let Some(second) = feature.scenarios.get(1) else {
            panic!("expected a second scenario");
        };
        assert_eq!(first.tags.as_slice(), ["@smoke"]);
        assert!(second.tags.is_empty());
        assert!(second.line > first.line);
        assert_eq!(first.rule, None);
    }

    #[test]
    fn rule_scenarios_follow_top_level_scenarios_and_inherit_rule_tags() {
        let feature = parse(
            "Feature: Rules\n\n  Scenario: Plain\n    Given a\n\n  @strict\n  Rule: Limits\n\n    Scenario: Capped\n      Given b\n",
        )
        .unwrap_or_else(|e| panic!("parse: {e}"));

        let names: Vec<_> = feature.scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Plain", "Capped"]);
        let Some(capped) = feature.scenarios.get(1) else {
            panic!("expected the rule scenario");
        };
        assert_eq!(capped.rule.as_deref(), Some("Limits"));
        assert!(capped.tags.contains("@strict"));
    }

    #[test]
    fn keeps_the_outline_keyword() {
        let feature = parse(
            "Feature: Outlines\n\n  Scenario Outline: Add\n    Given <a> plus <b>\n\n    Examples:\n      | a | b |\n      | 1 | 2 |\n      | 3 | 4 |\n",
        )
        .unwrap_or_else(|e| panic!("parse: {e}"));
        let Some(outline) = feature.scenarios.first() else {
            panic!("expected an outline");
        };
        assert_eq!(outline.keyword, "Scenario Outline");
        assert_eq!(outline.name, "Add");
    }

    #[test]
    fn accepts_text_without_trailing_newline() {
        let feature = parse("Feature: Terse").unwrap_or_else(|e| panic!("parse: {e}"));
        assert_eq!(feature.name, "Terse");
        assert!(feature.scenarios.is_empty());
    }

    #[test]
    fn malformed_text_reports_the_resource_path() {
        let Err(err) = parse("this is not gherkin\n  Given nothing\n") else {
            panic!("expected a parse failure");
        };
        assert_eq!(
            err.to_string(),
            "Error parsing feature file features/sample.feature"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
