// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn counter_starts_at_one() {
    let counter = IdCounter::new();
    assert_eq!(counter.next(), 1);
    assert_eq!(counter.next(), 2);
    assert_eq!(counter.next(), 3);
}

#[test]
fn scheme_id_displays_as_integer() {
    let id = SchemeId::from(7);
    assert_eq!(id.to_string(), "7");
    assert_eq!(id.as_i64(), 7);
}

#[test]
fn set_id_never_equals_a_different_value() {
    let a = SetId::from(1);
    let b = SetId::from(2);
    assert_ne!(a, b);
    assert_eq!(a, SetId::from(1));
}

#[test]
fn fail_sentinel_is_negative_one() {
    assert_eq!(FAIL, -1);
}
