use super::*;
use crate::test_support::{FakeCollab, SimGroup};

fn solo_group() -> SimGroup {
    SimGroup::world(1).remove(0)
}

#[yare::parameterized(
    no_redundancy = { 4, 0, Ok(CodecVariant::Single) },
    full_duplication = { 3, 3, Ok(CodecVariant::Partner) },
    single_parity = { 5, 1, Ok(CodecVariant::Xor) },
)]
fn variant_for_accepts_supported_shapes(data_blocks: i32, erasure_blocks: i32, expected: Result<CodecVariant, ErError>) {
    let got = SchemeRegistry::<SimGroup>::variant_for(data_blocks, erasure_blocks);
    match (got, expected) {
        (Ok(g), Ok(e)) => assert_eq!(g, e),
        (Err(_), Err(_)) => {}
        other => panic!("mismatch: {other:?}"),
    }
}

#[yare::parameterized(
    zero_data_blocks = { 0, 0 },
    negative_data_blocks = { -1, 0 },
    partial_erasure = { 4, 2 },
    too_much_erasure = { 4, 5 },
    xor_needs_at_least_two_data_blocks = { 1, 1 },
)]
fn variant_for_rejects_unsupported_shapes(data_blocks: i32, erasure_blocks: i32) {
    let got = SchemeRegistry::<SimGroup>::variant_for(data_blocks, erasure_blocks);
    assert!(got.is_err(), "expected rejection for ({data_blocks}, {erasure_blocks}), got {got:?}");
}

#[test]
fn create_then_free_round_trips() {
    let comm = solo_group();
    let codec = FakeCollab::new();
    let mut registry = SchemeRegistry::<SimGroup>::new();

    let id = registry.create(comm, "rack", 4, 1, &codec);
    assert_ne!(id, crate::id::FAIL);
    assert_eq!(registry.len(), 1);
    assert_eq!(codec.calls(), vec!["codec.create"]);

    let scheme_id = SchemeId::from(id);

    registry.free(scheme_id, &codec).unwrap();
    assert!(registry.is_empty());
    assert_eq!(codec.calls(), vec!["codec.create", "codec.delete"]);
}

#[test]
fn create_with_invalid_shape_fails_without_touching_codec() {
    let comm = solo_group();
    let codec = FakeCollab::new();
    let mut registry = SchemeRegistry::<SimGroup>::new();

    let id = registry.create(comm, "rack", 4, 2, &codec);
    assert_eq!(id, crate::id::FAIL);
    assert!(registry.is_empty());
    assert!(codec.calls().is_empty(), "codec should never be invoked for a rejected shape");
}

#[test]
fn create_fails_when_codec_collaborator_fails() {
    let comm = solo_group();
    let codec = FakeCollab::new();
    codec.fail_on("codec.create");
    let mut registry = SchemeRegistry::<SimGroup>::new();

    let id = registry.create(comm, "rack", 4, 0, &codec);
    assert_eq!(id, crate::id::FAIL);
    assert!(registry.is_empty());
}

#[test]
fn free_unknown_scheme_errors() {
    let codec = FakeCollab::new();
    let mut registry = SchemeRegistry::<SimGroup>::new();
    let bogus = SchemeId::from(999);
    assert!(registry.free(bogus, &codec).is_err());
}
