use super::dec;
use decimal_assert::logger::init_logger;
use decimal_assert::{
    Failure, Fault, FailureSink, Guarded, Recorder, Shape, Traverse, equal,
    equal_dyn,
};
use core::cell::{Ref, RefCell};

/// A zero value whose contents cannot be read.
struct Unreadable;

impl Guarded for Unreadable {
    fn borrow_inner(&self) -> Result<Ref<'_, dyn Traverse + '_>, Fault> {
        Err(Fault::AlreadyBorrowed {
            type_name: "Unreadable",
        })
    }
}

impl Traverse for Unreadable {
    fn shape(&self) -> Shape<'_> {
        Shape::Guarded(self)
    }

    fn is_zero(&self) -> bool {
        true
    }
}

struct Faulty;

impl Traverse for Faulty {
    fn shape(&self) -> Shape<'_> {
        panic!("cannot describe {}", "Faulty")
    }
}

#[test]
fn zero_values_are_never_entered() {
    init_logger();
    let mut recorder = Recorder::new();
    assert!(equal(
        &mut recorder,
        &vec![Unreadable, Unreadable],
        &vec![Unreadable, Unreadable],
        None
    ));
    assert!(!recorder.failed());
}

#[test]
fn panics_in_user_code_are_reported() {
    init_logger();
    let mut recorder = Recorder::new();
    assert!(!equal(
        &mut recorder,
        &Faulty,
        &Faulty,
        Some(format_args!("fixture"))
    ));
    assert_eq!(
        recorder.failures(),
        &[Failure::new(
            "panic: cannot describe Faulty",
            Some("fixture".to_string())
        )]
    );
}

#[test]
fn borrowed_cells_are_reported() {
    init_logger();
    let expected = RefCell::new(dec("1"));
    let actual = RefCell::new(dec("1"));
    let _guard = actual.borrow_mut();
    let mut recorder = Recorder::new();
    assert!(!equal(&mut recorder, &expected, &actual, None));
    assert_eq!(recorder.failures().len(), 1);
    assert!(recorder.messages()[0].starts_with("panic: value of type"));
    assert!(recorder.messages()[0].ends_with("is already mutably borrowed"));
}

#[test]
fn dynamic_values_of_different_types_differ() {
    init_logger();
    let expected: Box<dyn Traverse> = Box::new(dec("1"));
    let actual: Box<dyn Traverse> = Box::new(1u8);
    let mut recorder = Recorder::new();
    assert!(!equal_dyn(&mut recorder, &expected, &actual, None));
    assert!(recorder.messages()[0].starts_with("Not equal at $: types differ"));
}

#[test]
#[should_panic(expected = "panic: cannot describe Faulty")]
fn deep_eq_macro_raises_faults() {
    init_logger();
    decimal_assert::assert_deep_eq!(Faulty, Faulty);
}
