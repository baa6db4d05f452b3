//! Runner-holder validation for `cuke-runner`.
//!
//! A runner holder only configures discovery. Step definitions and hooks
//! declared on it would never be registered with the step registry, so a
//! holder carrying any such marker is rejected.

use thiserror::Error;

/// Step-definition markers, matched on the last path segment.
pub const STEP_MARKERS: &[&str] = &["given", "when", "then", "step"];

/// Hook markers, matched on the last path segment.
pub const HOOK_MARKERS: &[&str] = &["before", "after", "before_step", "after_step"];

/// Category of a forbidden marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    /// A step-definition marker such as `given`.
    Step,
    /// A hook marker such as `before`.
    Hook,
    /// A marker registered with [`HolderPolicy::forbid`].
    Custom,
}

impl MarkerKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Step => "step definition",
            Self::Hook => "hook",
            Self::Custom => "forbidden",
        }
    }
}

/// One member of a runner holder and the marker paths attached to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberDescriptor {
    name: String,
    markers: Vec<String>,
}

impl MemberDescriptor {
    /// Describe a member with no markers.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
        }
    }

    /// Attach a marker path such as `given` or `rstest_bdd_macros::when`.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    /// Member name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marker paths in declaration order.
    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

/// A runner holder and its members.
///
/// # Examples
///
/// ```
/// use cuke_runner_policy::{HolderDescriptor, MemberDescriptor, assert_no_step_definitions};
///
/// let holder = HolderDescriptor::new("RunCukesTest")
///     .with_member(MemberDescriptor::new("helper").with_marker("inline"));
/// assert!(assert_no_step_definitions(&holder).is_ok());
///
/// let holder = holder.with_member(MemberDescriptor::new("pay").with_marker("cucumber::When"));
/// assert!(assert_no_step_definitions(&holder).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HolderDescriptor {
    name: String,
    members: Vec<MemberDescriptor>,
}

impl HolderDescriptor {
    /// Describe a holder with no members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Add a member.
    #[must_use]
    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Holder name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }
}

/// A holder member carrying a forbidden marker.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error(
    "{holder}::{member} carries the {} marker `{marker}`; runner holders must not declare step definitions or hooks",
    .kind.label()
)]
pub struct PolicyViolation {
    /// Holder name.
    pub holder: String,
    /// Offending member.
    pub member: String,
    /// Marker path as written.
    pub marker: String,
    /// Why the marker is forbidden.
    pub kind: MarkerKind,
}

/// Marker rules applied to runner holders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HolderPolicy {
    custom: Vec<String>,
}

impl HolderPolicy {
    /// The built-in step and hook rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also forbid `marker`, matched like the built-in markers.
    #[must_use]
    pub fn forbid(mut self, marker: impl AsRef<str>) -> Self {
        self.custom.push(last_segment(marker.as_ref()).to_ascii_lowercase());
        self
    }

    /// Classify `marker`, returning `None` when it is allowed.
    #[must_use]
    pub fn classify(&self, marker: &str) -> Option<MarkerKind> {
        let segment = last_segment(marker).to_ascii_lowercase();
        if STEP_MARKERS.contains(&segment.as_str()) {
            Some(MarkerKind::Step)
        } else if HOOK_MARKERS.contains(&segment.as_str()) {
            Some(MarkerKind::Hook)
        } else if self.custom.contains(&segment) {
            Some(MarkerKind::Custom)
        } else {
            None
        }
    }

    /// Check every member of `holder`.
    ///
    /// # Errors
    ///
    /// Returns the first forbidden marker in member declaration order.
    pub fn check(&self, holder: &HolderDescriptor) -> Result<(), PolicyViolation> {
        for member in holder.members() {
            for marker in member.markers() {
                if let Some(kind) = self.classify(marker) {
                    return Err(PolicyViolation {
                        holder: holder.name().to_string(),
                        member: member.name().to_string(),
                        marker: marker.clone(),
                        kind,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Reject holders declaring step definitions or hooks.
///
/// # Errors
///
/// Returns [`PolicyViolation`] for the first member carrying a step or hook
/// marker.
pub fn assert_no_step_definitions(holder: &HolderDescriptor) -> Result<(), PolicyViolation> {
    HolderPolicy::new().check(holder)
}

fn last_segment(marker: &str) -> &str {
    let marker = marker.trim().trim_start_matches('#');
    let marker = marker
        .trim_start_matches('[')
        .split(['(', ']'])
        .next()
        .unwrap_or(marker);
    marker.rsplit("::").next().unwrap_or(marker).trim()
}
