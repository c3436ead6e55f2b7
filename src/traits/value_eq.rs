pub trait ValueEq {
    /// Check if two values represent the same value, ignoring their representation.
    fn value_eq(&self, other: &Self) -> bool;
}

#[macro_export]
macro_rules! assert_value_eq {
    ($left_val:expr, $right_val:expr $(,)?) => {
        if !$crate::traits::value_eq::ValueEq::value_eq(&$left_val, &$right_val) {
            panic!(
                "value equality assertion failed: `(left === right)`\n  left: `{:?}`,\n right: `{:?}`",
                $left_val, $right_val
            );
        }
    };
}
