//! Behavioural tests for runner-holder validation.

use cuke_runner_policy::{
    HolderDescriptor, HolderPolicy, MarkerKind, MemberDescriptor, PolicyViolation,
    assert_no_step_definitions,
};
use rstest::{fixture, rstest};

#[fixture]
fn clean_holder() -> HolderDescriptor {
    HolderDescriptor::new("RunCukesTest")
        .with_member(MemberDescriptor::new("setup").with_marker("rstest::fixture"))
        .with_member(MemberDescriptor::new("entry_point"))
}

#[rstest]
fn holders_without_markers_pass(clean_holder: HolderDescriptor) {
    assert_eq!(assert_no_step_definitions(&clean_holder), Ok(()));
}

#[rstest]
fn when_markers_are_rejected(clean_holder: HolderDescriptor) {
    let holder = clean_holder
        .with_member(MemberDescriptor::new("ignored").with_marker("cucumber::When"));
    let Err(violation) = assert_no_step_definitions(&holder) else {
        panic!("expected a policy violation");
    };
    assert_eq!(
        violation,
        PolicyViolation {
            holder: "RunCukesTest".to_string(),
            member: "ignored".to_string(),
            marker: "cucumber::When".to_string(),
            kind: MarkerKind::Step,
        }
    );
    assert_eq!(
        violation.to_string(),
        "RunCukesTest::ignored carries the step definition marker `cucumber::When`; runner holders must not declare step definitions or hooks"
    );
}

#[rstest]
fn hooks_are_rejected(clean_holder: HolderDescriptor) {
    let holder =
        clean_holder.with_member(MemberDescriptor::new("reset").with_marker("before_step"));
    let Err(violation) = assert_no_step_definitions(&holder) else {
        panic!("expected a policy violation");
    };
    assert_eq!(violation.kind, MarkerKind::Hook);
    assert_eq!(violation.member, "reset");
}

#[rstest]
fn first_offending_member_is_reported() {
    let holder = HolderDescriptor::new("Holder")
        .with_member(MemberDescriptor::new("a").with_marker("then"))
        .with_member(MemberDescriptor::new("b").with_marker("given"));
    let Err(violation) = assert_no_step_definitions(&holder) else {
        panic!("expected a policy violation");
    };
    assert_eq!(violation.member, "a");
}

#[rstest]
fn custom_policy_extends_the_builtin_rules(clean_holder: HolderDescriptor) {
    let policy = HolderPolicy::new().forbid("fixture");
    let Err(violation) = policy.check(&clean_holder) else {
        panic!("expected a policy violation");
    };
    assert_eq!(violation.kind, MarkerKind::Custom);
    assert_eq!(violation.member, "setup");
    assert!(violation.to_string().contains("forbidden marker `rstest::fixture`"));
}
