use super::dec;
use bigdecimal::BigDecimal;
use decimal_assert::logger::init_logger;
use decimal_assert::{FailureSink, Recorder, Traverse, equal};
use indexmap::IndexMap;
use indoc::indoc;
use alloc::collections::BTreeMap;
use std::collections::HashMap;

#[derive(Traverse)]
struct Line {
    sku: String,
    qty: u32,
    price: BigDecimal,
}

#[derive(Traverse)]
struct Invoice {
    number: u64,
    lines: Vec<Line>,
    totals: BTreeMap<String, BigDecimal>,
    note: Option<String>,
}

fn line(sku: &str, qty: u32, price: &str) -> Line {
    Line {
        sku: sku.to_string(),
        qty,
        price: dec(price),
    }
}

fn invoice(prices: [&str; 2], net: &str, note: Option<&str>) -> Invoice {
    Invoice {
        number: 7,
        lines: vec![line("apple", 2, prices[0]), line("pear", 1, prices[1])],
        totals: BTreeMap::from([("net".to_string(), dec(net))]),
        note: note.map(str::to_string),
    }
}

#[test]
fn nested_decimals_compare_by_value() {
    init_logger();
    let expected = invoice(["1.00", "2.50"], "4.50", Some("paid"));
    let actual = invoice(["1", "2.5"], "4.5", Some("paid"));
    let mut recorder = Recorder::new();
    assert!(equal(&mut recorder, &expected, &actual, None));
    assert!(!recorder.failed());
}

#[test]
fn only_the_first_mismatch_is_reported() {
    init_logger();
    let expected = invoice(["1.00", "2"], "3", None);
    let actual = invoice(["1.01", "3"], "3", None);
    let mut recorder = Recorder::new();
    assert!(!equal(&mut recorder, &expected, &actual, None));
    assert_eq!(
        recorder.messages(),
        vec!["Expected 1.00; Actual 1.01; Diff -0.01"]
    );
}

#[test]
fn shallower_mismatch_is_found_first() {
    init_logger();
    // the totals map sits one level above the line prices
    let expected = invoice(["1.00", "2"], "3.00", None);
    let actual = invoice(["1.01", "2"], "4", None);
    let mut recorder = Recorder::new();
    assert!(!equal(&mut recorder, &expected, &actual, None));
    assert_eq!(
        recorder.messages(),
        vec!["Expected 3.00; Actual 4; Diff -1.00"]
    );
}

#[test]
fn structural_difference_is_reported_with_path() {
    init_logger();
    let expected = invoice(["1", "2"], "3", Some("a"));
    let actual = invoice(["1", "2"], "3", Some("b"));
    let mut recorder = Recorder::new();
    assert!(!equal(&mut recorder, &expected, &actual, None));
    assert_eq!(
        recorder.messages(),
        vec![indoc! {r#"
            Not equal at $.note: values differ
            expected: "a"
            actual  : "b""#}]
    );
}

#[test]
fn structural_difference_wins_over_decimal_difference() {
    init_logger();
    let expected = invoice(["1", "2"], "3", None);
    let mut actual = invoice(["5", "2"], "3", None);
    actual.lines[1].qty = 9;
    let mut recorder = Recorder::new();
    assert!(!equal(&mut recorder, &expected, &actual, None));
    assert_eq!(recorder.failures().len(), 1);
    assert!(
        recorder.messages()[0].starts_with("Not equal at $.lines[1].qty: values differ")
    );
}

#[test]
fn sequence_length_is_checked() {
    init_logger();
    let expected = invoice(["1", "2"], "3", None);
    let mut actual = invoice(["1", "2"], "3", None);
    actual.lines.pop();
    let mut recorder = Recorder::new();
    assert!(!equal(&mut recorder, &expected, &actual, None));
    assert!(
        recorder.messages()[0].starts_with("Not equal at $.lines: lengths differ")
    );
}

#[test]
fn map_values_are_paired_by_key() {
    init_logger();
    let expected = HashMap::from([("eur", dec("1.10")), ("usd", dec("1.00"))]);
    let actual = HashMap::from([("usd", dec("1")), ("eur", dec("1.1"))]);
    let mut recorder = Recorder::new();
    assert!(equal(&mut recorder, &expected, &actual, None));

    // values swapped between keys must not pass
    let swapped = HashMap::from([("eur", dec("1")), ("usd", dec("1.1"))]);
    assert!(!equal(&mut recorder, &expected, &swapped, None));
    assert_eq!(
        recorder.messages(),
        vec!["Expected 1.10; Actual 1; Diff 0.10"]
    );
}

#[test]
fn missing_map_key_is_structural() {
    init_logger();
    let expected = BTreeMap::from([(1u8, dec("1")), (2u8, dec("2"))]);
    let actual = BTreeMap::from([(1u8, dec("1")), (3u8, dec("2"))]);
    let mut recorder = Recorder::new();
    assert!(!equal(&mut recorder, &expected, &actual, None));
    assert!(recorder.messages()[0].starts_with("Not equal at $[2]: key missing"));
}

#[test]
fn insertion_order_of_index_maps_is_ignored() {
    init_logger();
    let mut expected = IndexMap::new();
    expected.insert("a", dec("0.1"));
    expected.insert("b", dec("0.2"));
    let mut actual = IndexMap::new();
    actual.insert("b", dec("0.20"));
    actual.insert("a", dec("0.10"));
    let mut recorder = Recorder::new();
    assert!(equal(&mut recorder, &expected, &actual, None));
}

#[derive(Traverse)]
struct Fee {
    label: String,
    amount: BigDecimal,
}

fn fee(amount: &str) -> Fee {
    Fee {
        label: String::new(),
        amount: dec(amount),
    }
}

#[test]
fn zero_composites_compare_decimals_by_value() {
    init_logger();
    let mut recorder = Recorder::new();
    assert!(equal(&mut recorder, &fee("0"), &fee("0.00"), None));
    assert!(equal(&mut recorder, &(dec("0"),), &(dec("0.00"),), None));
    assert!(equal(&mut recorder, &[dec("0")], &[dec("0.000")], None));
    assert!(equal(
        &mut recorder,
        &vec![fee("0.0"), fee("1")],
        &vec![fee("0"), fee("1.00")],
        None
    ));
    assert!(!recorder.failed());
}

#[test]
fn zero_composite_against_non_zero_decimal_fails() {
    init_logger();
    let mut recorder = Recorder::new();
    assert!(!equal(&mut recorder, &fee("0"), &fee("0.01"), None));
    assert!(!equal(&mut recorder, &[dec("0.00")], &[dec("0.01")], None));
    assert_eq!(recorder.failures().len(), 2);
}

#[test]
fn zero_values_are_equal() {
    init_logger();
    let expected = Line {
        sku: String::new(),
        qty: 0,
        price: BigDecimal::default(),
    };
    assert!(expected.is_zero());
    let actual = Line {
        sku: String::new(),
        qty: 0,
        price: BigDecimal::default(),
    };
    let mut recorder = Recorder::new();
    assert!(equal(&mut recorder, &expected, &actual, None));
}
