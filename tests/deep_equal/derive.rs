use super::dec;
use bigdecimal::BigDecimal;
use decimal_assert::logger::init_logger;
use decimal_assert::{FailureSink, Recorder, Shape, Traverse, equal};

#[derive(Traverse)]
enum Payment {
    Cash(BigDecimal),
    Card { last4: String, amount: BigDecimal },
    Pending,
}

#[derive(Traverse)]
struct Money(BigDecimal, &'static str);

#[derive(Traverse)]
struct Cached {
    value: BigDecimal,
    #[traverse(skip)]
    hits: u32,
}

#[derive(Traverse)]
struct Tagged<T> {
    tag: String,
    value: T,
}

#[test]
fn enum_variants_compare_their_fields() {
    init_logger();
    let mut recorder = Recorder::new();
    let card = |amount| Payment::Card {
        last4: "4242".to_string(),
        amount: dec(amount),
    };
    assert!(equal(&mut recorder, &card("5.0"), &card("5"), None));
    assert!(equal(&mut recorder, &Payment::Pending, &Payment::Pending, None));
    assert!(!equal(&mut recorder, &card("5"), &card("6"), None));
    assert_eq!(recorder.messages(), vec!["Expected 5; Actual 6; Diff -1"]);
}

#[test]
fn different_variants_are_structural_mismatches() {
    init_logger();
    let mut recorder = Recorder::new();
    assert!(!equal(
        &mut recorder,
        &Payment::Cash(dec("1")),
        &Payment::Pending,
        None
    ));
    assert!(recorder.messages()[0].starts_with("Not equal at $: variants differ"));
}

#[test]
fn tuple_structs_are_positional() {
    init_logger();
    let money = Money(dec("1"), "EUR");
    let Shape::Record(record) = money.shape() else {
        panic!("expected a record");
    };
    assert_eq!(
        record.fields.iter().map(|field| field.name).collect::<Vec<_>>(),
        vec!["0", "1"]
    );
    let mut recorder = Recorder::new();
    assert!(equal(
        &mut recorder,
        &Money(dec("9.90"), "EUR"),
        &Money(dec("9.9"), "EUR"),
        None
    ));
}

#[test]
fn skipped_fields_are_ignored() {
    init_logger();
    let expected = Cached {
        value: dec("2.0"),
        hits: 1,
    };
    let actual = Cached {
        value: dec("2"),
        hits: 99,
    };
    let mut recorder = Recorder::new();
    assert!(equal(&mut recorder, &expected, &actual, None));
    assert!(!recorder.failed());
    assert_eq!(expected.hits + actual.hits, 100);
}

#[test]
fn generic_structs_are_supported() {
    init_logger();
    let expected = Tagged {
        tag: "rates".to_string(),
        value: vec![dec("0.070"), dec("0.19")],
    };
    let actual = Tagged {
        tag: "rates".to_string(),
        value: vec![dec("0.07"), dec("0.190")],
    };
    let mut recorder = Recorder::new();
    assert!(equal(&mut recorder, &expected, &actual, None));
}
