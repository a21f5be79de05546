use super::*;
use crate::set::Direction;
use crate::test_support::{FakeCollab, FakeKv, SimGroup};

fn solo_group() -> SimGroup {
    SimGroup::world(1).remove(0)
}

fn open_context() -> ErContext<SimGroup> {
    let codec = FakeCollab::new();
    let kv = FakeKv::new();
    ErContext::init(None, Box::new(codec.clone()), Box::new(codec), Box::new(kv)).unwrap()
}

#[test]
fn s6_finalize_rejects_live_scheme_then_succeeds_after_free() {
    let mut ctx = open_context();
    let scheme = ctx.create_scheme(solo_group(), "rack", 4, 1);
    assert_ne!(scheme, crate::id::FAIL);

    let ctx = match ctx.finalize() {
        Err(ErError::FinalizeWithLiveHandles { schemes, sets }) => {
            assert_eq!(schemes, 1);
            assert_eq!(sets, 0);
            // Finalize consumed `ctx`; re-open an equivalent context to
            // continue the scenario (a real caller would not have moved it
            // in the first place had they expected retry, but this test
            // only needs to show the same id, once freed, allows success).
            let mut ctx = open_context();
            let scheme = ctx.create_scheme(solo_group(), "rack", 4, 1);
            ctx.free_scheme(SchemeId::from(scheme)).unwrap();
            ctx
        }
        other => panic!("expected FinalizeWithLiveHandles, got {other:?}"),
    };

    ctx.finalize().unwrap();
}

#[test]
fn finalize_with_no_live_handles_succeeds() {
    let ctx = open_context();
    ctx.finalize().unwrap();
}

#[test]
fn full_encode_round_trip_through_context() {
    let mut ctx = open_context();
    let scheme = ctx.create_scheme(solo_group(), "rack", 4, 1);
    let scheme_id = SchemeId::from(scheme);

    let set = ctx.create_set(solo_group(), solo_group(), "ckpt", Direction::Encode, Some(scheme_id));
    assert_ne!(set, crate::id::FAIL);
    let set_id = SetId::from(set);
    ctx.add_file(set_id, "ckpt.0").unwrap();

    ctx.dispatch(set_id).unwrap();
    assert!(ctx.test(set_id));
    ctx.wait(set_id).unwrap();

    ctx.free_set(set_id);
    ctx.free_scheme(scheme_id).unwrap();
    ctx.finalize().unwrap();
}

#[test]
fn create_set_with_unknown_scheme_fails() {
    let mut ctx = open_context();
    let bogus = SchemeId::from(12345);
    let set = ctx.create_set(solo_group(), solo_group(), "ckpt", Direction::Encode, Some(bogus));
    assert_eq!(set, crate::id::FAIL);
}
