//! Exact-type matching of the side-effect registry.

use gallery::widgets::number::{DecimalField, IntegerField};
use gallery::widgets::text::TextField;
use gallery::SideEffectRegistry;

#[test]
fn scenario_c_only_the_exact_type_fires() {
    let mut effects = SideEffectRegistry::new();
    effects
        .register::<IntegerField, _>(|field| field.set_maximum_integer_digits(6))
        .unwrap();

    // DecimalField shares the integer field's whole capability surface,
    // but its concrete type is different, so nothing may fire for it.
    let mut integer = IntegerField::new("i", 3);
    let mut decimal = DecimalField::new("d", 3, 4, 1);

    assert!(effects.run_for(&mut integer));
    assert!(!effects.run_for(&mut decimal));
    assert_eq!(integer.maximum_integer_digits(), 6);
    assert_eq!(decimal.maximum_integer_digits(), 3);
}

#[test]
fn entries_do_not_leak_across_types() {
    let mut effects = SideEffectRegistry::new();
    effects
        .register::<IntegerField, _>(|field| field.set_maximum_integer_digits(1))
        .unwrap();
    effects
        .register::<DecimalField, _>(|field| field.set_maximum_fraction_digits(2))
        .unwrap();

    let mut integer = IntegerField::new("i", 9);
    let mut decimal = DecimalField::new("d", 9, 9, 0);
    assert!(effects.run_for(&mut integer));
    assert!(effects.run_for(&mut decimal));
    assert_eq!(integer.maximum_integer_digits(), 1);
    assert_eq!(decimal.maximum_integer_digits(), 9);
    assert_eq!(decimal.maximum_fraction_digits(), 2);
}

#[test]
fn a_miss_is_a_silent_no_op() {
    let effects = SideEffectRegistry::new();
    let mut field = TextField::new("t");
    assert!(!effects.run_for(&mut field));
}
