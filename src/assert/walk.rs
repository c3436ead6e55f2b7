use crate::assert::decimal::report_decimal;
use crate::fault::Fault;
use crate::sink::FailureSink;
use crate::values::shape::{PointerId, Shape, Traverse};
use alloc::collections::VecDeque;
use log::{debug, trace};
use std::collections::HashSet;

/// An expected/actual pair taken from the same position of both graphs.
/// `None` stands for a value that does not exist, e.g. a missing map entry.
struct Pair<'a> {
    expected: Option<&'a dyn Traverse>,
    actual: Option<&'a dyn Traverse>,
}

impl<'a> Pair<'a> {
    fn new(expected: &'a dyn Traverse, actual: &'a dyn Traverse) -> Self {
        Pair {
            expected: Some(expected),
            actual: Some(actual),
        }
    }
}

/// Breadth-first walk over two value graphs that re-validates every decimal
/// leaf by numeric value.
///
/// Only decimals are compared here; everything else has been checked by the
/// structural pre-check. The walk stops at the first decimal mismatch.
pub struct Walker<'s> {
    sink: &'s mut dyn FailureSink,
    context: Option<&'s str>,
    visited: HashSet<PointerId>,
    steps: usize,
}

impl<'s> Walker<'s> {
    pub fn new(sink: &'s mut dyn FailureSink, context: Option<&'s str>) -> Self {
        Walker {
            sink,
            context,
            visited: HashSet::new(),
            steps: 0,
        }
    }

    /// Number of pairs dequeued so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns `Ok(false)` after reporting the first decimal mismatch.
    ///
    /// The contents of a borrowed cell are walked to completion before the
    /// rest of the queue, so decimals inside a `RefCell` are checked ahead of
    /// shallower pairs queued after it.
    pub fn walk(
        &mut self,
        expected: &dyn Traverse,
        actual: &dyn Traverse,
    ) -> Result<bool, Fault> {
        let mut queue = VecDeque::from([Pair::new(expected, actual)]);

        while let Some(pair) = queue.pop_front() {
            self.steps += 1;
            let (Some(expected), Some(actual)) = (pair.expected, pair.actual)
            else {
                continue;
            };
            if expected.is_zero() && actual.is_zero() {
                continue;
            }
            trace!("visiting {}", expected.type_name());

            match (expected.shape(), actual.shape()) {
                (Shape::Decimal(e), Shape::Decimal(a)) => {
                    if !report_decimal(self.sink, e, a, self.context) {
                        return Ok(false);
                    }
                }
                (Shape::Scalar(_), Shape::Scalar(_)) => {}
                (Shape::Pointer(e), Shape::Pointer(a)) => {
                    if self.visited.contains(&e.id) || self.visited.contains(&a.id)
                    {
                        continue;
                    }
                    self.visited.insert(e.id);
                    self.visited.insert(a.id);
                    queue.push_back(Pair::new(e.target, a.target));
                }
                (Shape::Record(e), Shape::Record(a)) => {
                    let mut actual_fields = a.fields.into_iter();
                    for (index, field) in e.fields.into_iter().enumerate() {
                        let other =
                            actual_fields.next().ok_or_else(|| Fault::MissingField {
                                index,
                                type_name: actual.type_name(),
                            })?;
                        queue.push_back(Pair::new(field.value, other.value));
                    }
                }
                (Shape::Sequence(e), Shape::Sequence(a)) => {
                    for (index, item) in e.into_iter().enumerate() {
                        let other =
                            a.get(index).ok_or_else(|| Fault::IndexOutOfBounds {
                                index,
                                len: a.len(),
                                type_name: actual.type_name(),
                            })?;
                        queue.push_back(Pair::new(item, *other));
                    }
                }
                (Shape::Mapping(e), Shape::Mapping(a)) => {
                    for key in e.keys() {
                        queue.push_back(Pair {
                            expected: e.lookup(key.raw)?,
                            actual: a.lookup(key.raw)?,
                        });
                    }
                }
                (Shape::Interface(e), Shape::Interface(a)) => {
                    queue.push_back(Pair::new(e, a));
                }
                (Shape::Guarded(e), Shape::Guarded(a)) => {
                    let e = e.borrow_inner()?;
                    let a = a.borrow_inner()?;
                    if !self.walk(&*e, &*a)? {
                        return Ok(false);
                    }
                }
                (e, a) => {
                    debug!("cannot pair {} with {}", e.kind(), a.kind());
                    return Err(Fault::ShapeMismatch {
                        expected: e.kind(),
                        actual: a.kind(),
                        expected_type: expected.type_name(),
                        actual_type: actual.type_name(),
                    });
                }
            }
        }
        Ok(true)
    }
}
