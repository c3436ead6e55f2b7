//! Deep equality assertions for test code, with arbitrary-precision decimals
//! compared by numeric value instead of by representation.

extern crate alloc;
// lets the derive macro refer to `::decimal_assert` from inside this crate
extern crate self as decimal_assert;

pub mod assert;
pub mod fault;
pub mod logger;
pub mod sink;
pub mod snapshot;
pub mod traits;
pub mod values;

pub use assert::decimal::decimal_equal;
pub use assert::{equal, equal_dyn, structural_equal};
pub use decimal_assert_macros::Traverse;
pub use fault::Fault;
pub use sink::{Failure, FailureSink, PanicSink, Recorder};
pub use values::shape::{
    Field, Guarded, Kind, MapKey, Mapping, Pointer, PointerId, Record, Scalar,
    Shape, Traverse,
};
