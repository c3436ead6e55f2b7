use crate::traits::structural_eq::StructuralEq;
use crate::traits::value_eq::ValueEq;
use crate::values::shape::{Shape, Traverse};
use bigdecimal::BigDecimal;
use num_traits::Zero;

impl Traverse for BigDecimal {
    fn shape(&self) -> Shape<'_> {
        Shape::Decimal(self)
    }

    /// Any numeric zero, whatever its scale: `0` and `0.00` are both zero, so
    /// composites holding either agree on being zero.
    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }
}

/// Numeric equality: `1.50` equals `1.5`.
impl ValueEq for BigDecimal {
    fn value_eq(&self, other: &Self) -> bool {
        self == other
    }
}

/// Representation equality: digits and scale must both match, so `1.50` and
/// `1.5` differ.
impl StructuralEq for BigDecimal {
    fn structural_eq(&self, other: &Self) -> bool {
        self.as_bigint_and_exponent() == other.as_bigint_and_exponent()
    }
}
