//! Host configuration for the empty-filter policy.
//!
//! `CUKE_RUNNER_FAIL_ON_EMPTY_FILTER` selects [`EmptyFilterPolicy::Reject`]
//! when it holds a truthy value. A process can pin the choice with
//! [`override_empty_filter_policy`], which takes precedence over the
//! environment.
//!
//! [`EmptyFilterPolicy::Reject`]: crate::EmptyFilterPolicy::Reject

use std::sync::{Mutex, PoisonError};

/// Environment variable consulted by [`fail_on_empty_filter`].
pub const FAIL_ON_EMPTY_FILTER_ENV: &str = "CUKE_RUNNER_FAIL_ON_EMPTY_FILTER";

static OVERRIDE: Mutex<Option<bool>> = Mutex::new(None);

fn truthy(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Whether an emptied tree should fail the host's filter call.
///
/// Unset or unrecognised values mean `false`.
#[must_use]
pub fn fail_on_empty_filter() -> bool {
    let pinned = *OVERRIDE.lock().unwrap_or_else(PoisonError::into_inner);
    pinned
        .or_else(|| {
            std::env::var(FAIL_ON_EMPTY_FILTER_ENV)
                .ok()
                .as_deref()
                .and_then(truthy)
        })
        .unwrap_or(false)
}

/// Pin the flag for this process, or pass `None` to defer to the
/// environment again.
pub fn override_empty_filter_policy(fail: Option<bool>) {
    *OVERRIDE.lock().unwrap_or_else(PoisonError::into_inner) = fail;
}

#[cfg(test)]
mod tests {
    use super::{fail_on_empty_filter, override_empty_filter_policy, truthy};
    use rstest::rstest;
    use serial_test::serial;

    #[test]
    #[serial]
    fn pinned_value_wins_until_cleared() {
        override_empty_filter_policy(Some(true));
        assert!(fail_on_empty_filter());
        override_empty_filter_policy(Some(false));
        assert!(!fail_on_empty_filter());
        override_empty_filter_policy(None);
    }

    #[rstest]
    #[case("Yes", Some(true))]
    #[case(" 0 ", Some(false))]
    #[case("maybe", None)]
    fn recognises_switch_spellings(#[case] value: &str, #[case] expected: Option<bool>) {
        assert_eq!(truthy(value), expected);
    }
}
