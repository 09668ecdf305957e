//! Lockout domain: tests for the charge model.

use super::{DEFAULT_MAX_CHARGE, LockoutCharges};
use crate::player::Transformation;

// -----------------------------------------------------------------------------
// Charge arithmetic
// -----------------------------------------------------------------------------

#[test]
fn test_charges_start_full() {
    let charges = LockoutCharges::default();
    for transformation in Transformation::ALL {
        if transformation.is_neutral() {
            assert!(charges.charge(transformation).is_none());
            continue;
        }
        let record = charges.charge(transformation).unwrap();
        assert_eq!(record.current, DEFAULT_MAX_CHARGE);
        assert_eq!(record.max, DEFAULT_MAX_CHARGE);
    }
}

#[test]
fn test_subtract_then_add_round_trips() {
    let mut charges = LockoutCharges::default();

    for _ in 0..3 {
        assert!(charges.subtract(Transformation::Frog));
    }
    assert_eq!(
        charges.charge(Transformation::Frog).unwrap().current,
        DEFAULT_MAX_CHARGE - 3
    );

    for _ in 0..3 {
        assert!(charges.add(Transformation::Frog));
    }
    assert_eq!(
        charges.charge(Transformation::Frog).unwrap().current,
        DEFAULT_MAX_CHARGE
    );
}

#[test]
fn test_subtract_floors_at_zero() {
    let mut charges = LockoutCharges::with_max(|_| 1);

    assert!(charges.subtract(Transformation::Ball));
    assert!(!charges.subtract(Transformation::Ball));
    assert_eq!(charges.charge(Transformation::Ball).unwrap().current, 0);
}

#[test]
fn test_add_clamps_at_max() {
    let mut charges = LockoutCharges::default();

    assert!(!charges.add(Transformation::Bulldozer));
    assert_eq!(
        charges.charge(Transformation::Bulldozer).unwrap().current,
        DEFAULT_MAX_CHARGE
    );
}

#[test]
fn test_terry_is_exempt() {
    let mut charges = LockoutCharges::default();

    assert!(!charges.subtract(Transformation::Terry));
    assert!(!charges.add(Transformation::Terry));
    assert!(charges.is_selectable(Transformation::Terry));
}

// -----------------------------------------------------------------------------
// Selectability and lockout
// -----------------------------------------------------------------------------

#[test]
fn test_exhausted_form_is_not_selectable() {
    let mut charges = LockoutCharges::with_max(|_| 2);

    charges.subtract(Transformation::Frog);
    assert!(charges.is_selectable(Transformation::Frog));

    charges.subtract(Transformation::Frog);
    assert!(!charges.is_selectable(Transformation::Frog));

    charges.add(Transformation::Frog);
    assert!(charges.is_selectable(Transformation::Frog));
}

#[test]
fn test_locked_out_requires_every_form_exhausted() {
    let mut charges = LockoutCharges::with_max(|_| 1);
    assert!(!charges.is_any_locked_out());

    charges.subtract(Transformation::Frog);
    charges.subtract(Transformation::Bulldozer);
    assert!(!charges.is_any_locked_out());

    charges.subtract(Transformation::Ball);
    assert!(charges.is_any_locked_out());

    // Restoring any single charge clears the indicator
    charges.add(Transformation::Ball);
    assert!(!charges.is_any_locked_out());
}

#[test]
fn test_reset_to_max_reports_changed_forms() {
    let mut charges = LockoutCharges::default();

    charges.subtract(Transformation::Frog);
    charges.subtract(Transformation::Ball);

    let mut restored = charges.reset_to_max();
    restored.sort_by_key(|transformation| transformation.display_name());

    assert_eq!(restored, vec![Transformation::Ball, Transformation::Frog]);
    assert!(charges.reset_to_max().is_empty());
}
