//! Normalised tag sets shared by features, scenarios, categories and
//! predicates.
//!
//! Gherkin stores tags without their leading `@`, entry points declare
//! categories by bare name, and users type filters either way. Every value is
//! therefore stored in the `@name` form so membership checks stay exact.

use std::fmt;

use serde::Serialize;

/// Normalise a single tag to the `@name` form, trimming whitespace.
///
/// # Examples
///
/// ```
/// use cuke_runner::tags::normalise_tag;
///
/// assert_eq!(normalise_tag("smoke"), "@smoke");
/// assert_eq!(normalise_tag(" @smoke "), "@smoke");
/// ```
#[must_use]
pub fn normalise_tag(tag: &str) -> String {
    let trimmed = tag.trim();
    if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{trimmed}")
    }
}

/// Ordered, de-duplicated set of `@`-prefixed tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Create an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append tags, keeping the first occurrence of each value.
    ///
    /// Empty and whitespace-only values are ignored.
    pub fn extend<I, S>(&mut self, additions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in additions {
            if tag.as_ref().trim().is_empty() {
                continue;
            }
            let formatted = normalise_tag(tag.as_ref());
            if !self.0.iter().any(|existing| existing == &formatted) {
                self.0.push(formatted);
            }
        }
    }

    /// Merge two sets, preserving insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuke_runner::Tags;
    ///
    /// let base = Tags::from_iter(["@fast", "slow"]);
    /// let merged = base.merged(&Tags::from_iter(["fast", "web"]));
    /// assert_eq!(merged.as_slice(), ["@fast", "@slow", "@web"]);
    /// ```
    #[must_use]
    pub fn merged(&self, additions: &Self) -> Self {
        let mut merged = self.clone();
        merged.extend(additions.iter());
        merged
    }

    /// Return `true` when the set holds `tag` (in either spelling).
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let wanted = normalise_tag(tag);
        self.0.iter().any(|existing| existing == &wanted)
    }

    /// Return `true` when at least one tag of `other` is present.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        other.0.iter().any(|tag| self.0.contains(tag))
    }

    /// Iterate over the tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Borrow the tags as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        tags.extend(iter);
        tags
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
