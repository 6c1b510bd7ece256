use oa_coat::classification::{find_embargo_time, resolve_embargo, EvidenceWarning};
use oa_coat::sources::{PermittedOa, PolicyDocument};

fn fixture_policy() -> PolicyDocument {
    serde_json::from_str(include_str!("fixtures/romeo_policy.json")).expect("fixture parses")
}

#[test]
fn fixture_resolves_to_shortest_free_route() {
    // 12 months accepted beats 24 months published; the 6 month route needs a funder.
    assert_eq!(find_embargo_time(&fixture_policy()), Some(12));
}

#[test]
fn fee_and_prerequisite_routes_never_count() {
    let policy = PolicyDocument::new(["1111-2222"]).with_policy(vec![
        PermittedOa::for_versions(&["published"])
            .with_embargo(0, Some("months"))
            .with_additional_fee(),
        PermittedOa::for_versions(&["accepted"])
            .with_embargo(0, Some("months"))
            .with_funder_prerequisite(serde_json::json!({"funder_metadata": {"id": 1}})),
        PermittedOa::for_versions(&["accepted"]).with_embargo(18, Some("months")),
    ]);
    assert_eq!(find_embargo_time(&policy), Some(18));
}

#[test]
fn partitions_are_combined_by_minimum() {
    let policy = PolicyDocument::new(["1111-2222"])
        .with_policy(vec![
            PermittedOa::for_versions(&["accepted"]).with_embargo(24, Some("months"))
        ])
        .with_policy(vec![
            PermittedOa::for_versions(&["published"]).with_embargo(90, Some("days"))
        ]);
    assert_eq!(find_embargo_time(&policy), Some(3));
}

#[test]
fn unknown_units_are_skipped_and_reported() {
    let policy = PolicyDocument::new(["1111-2222"]).with_policy(vec![
        PermittedOa::for_versions(&["accepted"]).with_embargo(1, Some("fortnights")),
        PermittedOa::for_versions(&["published"]).with_embargo(1, Some("years")),
    ]);
    let resolution = resolve_embargo(&policy);
    assert_eq!(resolution.months, Some(12));
    match resolution.warnings.as_slice() {
        [EvidenceWarning::UnknownEmbargoUnit { issns, unit }] => {
            assert_eq!(issns, "1111-2222");
            assert_eq!(unit, "fortnights");
        }
        other => panic!("expected one unknown unit warning, got {other:?}"),
    }
}

#[test]
fn no_usable_route_is_unknown_not_zero() {
    let policy = PolicyDocument::new(["1111-2222"]).with_policy(vec![PermittedOa::for_versions(
        &["published"],
    )
    .with_embargo(0, Some("months"))
    .with_additional_fee()]);
    assert_eq!(find_embargo_time(&policy), None);
}
