pub mod decimal;
pub mod walk;

use crate::fault::Fault;
use crate::sink::{Failure, FailureSink, Recorder};
use crate::snapshot::{Snapshot, diff};
use crate::values::shape::Traverse;
use core::any::Any;
use core::fmt;
use core::panic::AssertUnwindSafe;
use log::debug;
use std::panic;
use walk::Walker;

/// Asserts that `expected` and `actual` are deeply equal, comparing decimal
/// leaves by numeric value.
///
/// Both values are snapshotted and compared structurally first. If that
/// passes, the original values are walked breadth-first and every decimal pair
/// is checked with [`decimal::decimal_equal`] semantics. At most one failure is
/// reported to `sink`.
///
/// ```
/// use bigdecimal::BigDecimal;
/// use decimal_assert::{Recorder, equal};
/// use std::str::FromStr;
///
/// let expected = vec![BigDecimal::from_str("1.50").unwrap()];
/// let actual = vec![BigDecimal::from_str("1.5").unwrap()];
/// let mut recorder = Recorder::new();
/// assert!(equal(&mut recorder, &expected, &actual, None));
/// ```
pub fn equal<T: Traverse>(
    sink: &mut dyn FailureSink,
    expected: &T,
    actual: &T,
    context: Option<fmt::Arguments<'_>>,
) -> bool {
    equal_dyn(sink, expected, actual, context)
}

/// Same as [`equal`] for values whose types are only known at runtime.
pub fn equal_dyn(
    sink: &mut dyn FailureSink,
    expected: &dyn Traverse,
    actual: &dyn Traverse,
    context: Option<fmt::Arguments<'_>>,
) -> bool {
    let context = context.map(|args| args.to_string());
    run(sink, context, |recorder, context| {
        if !precheck(recorder, expected, actual, context)? {
            return Ok(false);
        }
        Walker::new(recorder, context).walk(expected, actual)
    })
}

/// Only the structural pre-check of [`equal`]: decimal leaves always match.
pub fn structural_equal(
    sink: &mut dyn FailureSink,
    expected: &dyn Traverse,
    actual: &dyn Traverse,
    context: Option<fmt::Arguments<'_>>,
) -> bool {
    let context = context.map(|args| args.to_string());
    run(sink, context, |recorder, context| {
        precheck(recorder, expected, actual, context)
    })
}

fn precheck(
    sink: &mut dyn FailureSink,
    expected: &dyn Traverse,
    actual: &dyn Traverse,
    context: Option<&str>,
) -> Result<bool, Fault> {
    let expected = Snapshot::capture(expected)?;
    let actual = Snapshot::capture(actual)?;
    match diff::first_difference(&expected, &actual) {
        None => Ok(true),
        Some(difference) => {
            debug!("structural mismatch at {}", difference.path);
            sink.fail(Failure::new(
                difference.to_string(),
                context.map(str::to_owned),
            ));
            Ok(false)
        }
    }
}

/// Runs `check` against a local recorder and forwards the outcome to `sink`
/// once the check has returned, so a panicking sink is never caught here.
fn run(
    sink: &mut dyn FailureSink,
    context: Option<String>,
    check: impl FnOnce(&mut Recorder, Option<&str>) -> Result<bool, Fault>,
) -> bool {
    let mut recorder = Recorder::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        check(&mut recorder, context.as_deref())
    }));

    let fault = match outcome {
        Ok(Ok(equal)) => {
            for failure in recorder.into_failures() {
                sink.fail(failure);
            }
            return equal;
        }
        Ok(Err(fault)) => fault,
        Err(payload) => Fault::Panicked(panic_details(payload.as_ref())),
    };
    debug!("comparison aborted: {fault}");
    sink.fail(Failure::new(format!("panic: {fault}"), context));
    false
}

fn panic_details(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Asserts deep equality with numeric decimal comparison, panicking with the
/// failure message otherwise. Extra arguments are formatted as context.
#[macro_export]
macro_rules! assert_deep_eq {
    ($expected:expr, $actual:expr $(,)?) => {{
        $crate::assert::equal(
            &mut $crate::sink::PanicSink,
            &$expected,
            &$actual,
            None,
        );
    }};
    ($expected:expr, $actual:expr, $($context:tt)+) => {{
        $crate::assert::equal(
            &mut $crate::sink::PanicSink,
            &$expected,
            &$actual,
            Some(format_args!($($context)+)),
        );
    }};
}

#[macro_export]
macro_rules! assert_decimal_eq {
    ($expected:expr, $actual:expr $(,)?) => {{
        $crate::assert::decimal::decimal_equal(
            &mut $crate::sink::PanicSink,
            &$expected,
            &$actual,
            None,
        );
    }};
    ($expected:expr, $actual:expr, $($context:tt)+) => {{
        $crate::assert::decimal::decimal_equal(
            &mut $crate::sink::PanicSink,
            &$expected,
            &$actual,
            Some(format_args!($($context)+)),
        );
    }};
}
