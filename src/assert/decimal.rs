use crate::sink::{Failure, FailureSink};
use crate::traits::value_eq::ValueEq;
use bigdecimal::BigDecimal;
use core::fmt;
use log::debug;

/// Asserts that two decimals are numerically equal.
///
/// Returns true without side effects if they are. Otherwise reports
/// `Expected <expected>; Actual <actual>; Diff <expected - actual>` to the sink
/// and returns false.
pub fn decimal_equal(
    sink: &mut dyn FailureSink,
    expected: &BigDecimal,
    actual: &BigDecimal,
    context: Option<fmt::Arguments<'_>>,
) -> bool {
    let context = context.map(|args| args.to_string());
    report_decimal(sink, expected, actual, context.as_deref())
}

pub(crate) fn report_decimal(
    sink: &mut dyn FailureSink,
    expected: &BigDecimal,
    actual: &BigDecimal,
    context: Option<&str>,
) -> bool {
    if expected.value_eq(actual) {
        return true;
    }
    let diff = expected - actual;
    debug!("decimal mismatch: {expected} != {actual}");
    sink.fail(Failure::new(
        format!("Expected {expected}; Actual {actual}; Diff {diff}"),
        context.map(str::to_owned),
    ));
    false
}
