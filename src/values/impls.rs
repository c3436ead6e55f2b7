use crate::fault::Fault;
use crate::values::shape::{
    Field, Guarded, MapKey, Mapping, Pointer, Record, Scalar, Shape, Traverse,
};
use alloc::borrow::Cow;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::rc::Rc;
use alloc::sync::Arc;
use core::any::Any;
use core::cell::{OnceCell, Ref, RefCell};
use core::fmt::Debug;
use core::hash::Hash;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::OnceLock;

macro_rules! traverse_int {
    ($variant:ident, $wide:ty, $($t:ty),*) => {
        $(
            impl Traverse for $t {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::$variant(<$wide>::from(*self)))
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

traverse_int!(Int, i128, i8, i16, i32, i64, i128);
traverse_int!(UInt, u128, u8, u16, u32, u64, u128);

impl Traverse for isize {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Int(*self as i128))
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl Traverse for usize {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::UInt(*self as u128))
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl Traverse for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float(f64::from(*self)))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl Traverse for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float(*self))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl Traverse for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Bool(*self))
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl Traverse for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Char(*self))
    }

    fn is_zero(&self) -> bool {
        *self == '\0'
    }
}

impl Traverse for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Unit)
    }

    fn is_zero(&self) -> bool {
        true
    }
}

impl Traverse for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(Cow::Borrowed(self.as_str())))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Traverse for &str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(Cow::Borrowed(self)))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

// pointers

impl<T: Traverse> Traverse for &T {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(Pointer::new(*self))
    }
}

impl<T: Traverse> Traverse for Box<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(Pointer::new(&**self))
    }
}

impl<T: Traverse> Traverse for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(Pointer::new(&**self))
    }
}

impl<T: Traverse> Traverse for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(Pointer::new(&**self))
    }
}

impl Traverse for Rc<dyn Traverse> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(Pointer::new_dyn(&**self))
    }
}

impl Traverse for Arc<dyn Traverse> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(Pointer::new_dyn(&**self))
    }
}

// dynamic wrappers

impl Traverse for Box<dyn Traverse> {
    fn shape(&self) -> Shape<'_> {
        Shape::Interface(&**self)
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

impl<T: Traverse> Traverse for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => Shape::Interface(value),
            None => Shape::Scalar(Scalar::Null),
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

/// Set-once cells are the usual way to close a cycle (`OnceCell<Rc<Node>>`).
impl<T: Traverse> Traverse for OnceCell<T> {
    fn shape(&self) -> Shape<'_> {
        match self.get() {
            Some(value) => Shape::Interface(value),
            None => Shape::Scalar(Scalar::Null),
        }
    }

    fn is_zero(&self) -> bool {
        self.get().is_none()
    }
}

impl<T: Traverse> Traverse for OnceLock<T> {
    fn shape(&self) -> Shape<'_> {
        match self.get() {
            Some(value) => Shape::Interface(value),
            None => Shape::Scalar(Scalar::Null),
        }
    }

    fn is_zero(&self) -> bool {
        self.get().is_none()
    }
}

impl<T: Traverse> Traverse for RefCell<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Guarded(self)
    }

    fn is_zero(&self) -> bool {
        self.try_borrow().is_ok_and(|inner| inner.is_zero())
    }
}

impl<T: Traverse> Guarded for RefCell<T> {
    fn borrow_inner(&self) -> Result<Ref<'_, dyn Traverse + '_>, Fault> {
        let guard = self.try_borrow().map_err(|_| Fault::AlreadyBorrowed {
            type_name: core::any::type_name::<Self>(),
        })?;
        Ok(Ref::map(guard, |inner| inner as &dyn Traverse))
    }
}

// sequences

impl<T: Traverse> Traverse for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self.iter().map(|item| item as &dyn Traverse).collect())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Traverse> Traverse for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self.iter().map(|item| item as &dyn Traverse).collect())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Traverse, const N: usize> Traverse for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self.iter().map(|item| item as &dyn Traverse).collect())
    }

    fn is_zero(&self) -> bool {
        self.iter().all(Traverse::is_zero)
    }
}

macro_rules! traverse_tuple {
    ($(($($name:ident $index:tt),+)),*) => {
        $(
            impl<$($name: Traverse),+> Traverse for ($($name,)+) {
                fn shape(&self) -> Shape<'_> {
                    Shape::Record(Record::new(vec![
                        $(Field::new(stringify!($index), &self.$index)),+
                    ]))
                }

                fn is_zero(&self) -> bool {
                    $(self.$index.is_zero())&&+
                }
            }
        )*
    };
}

traverse_tuple!(
    (A 0),
    (A 0, B 1),
    (A 0, B 1, C 2),
    (A 0, B 1, C 2, D 3)
);

// maps

fn downcast_key<K: Any>(key: &dyn Any) -> Result<&K, Fault> {
    key.downcast_ref::<K>().ok_or(Fault::KeyType {
        expected: core::any::type_name::<K>(),
    })
}

fn labelled_keys<'a, K: Any + Debug>(
    keys: impl Iterator<Item = &'a K>,
) -> Vec<MapKey<'a>> {
    keys.map(|key| MapKey {
        raw: key as &dyn Any,
        label: format!("{key:?}"),
    })
    .collect()
}

impl<K, V> Mapping for HashMap<K, V>
where
    K: Any + Eq + Hash + Debug,
    V: Traverse,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    /// Sorted by their debug rendering, hash order is not reproducible.
    fn keys(&self) -> Vec<MapKey<'_>> {
        let mut keys = labelled_keys(HashMap::keys(self));
        keys.sort_by(|a, b| a.label.cmp(&b.label));
        keys
    }

    fn lookup(&self, key: &dyn Any) -> Result<Option<&dyn Traverse>, Fault> {
        let key = downcast_key::<K>(key)?;
        Ok(self.get(key).map(|value| value as &dyn Traverse))
    }
}

impl<K, V> Traverse for HashMap<K, V>
where
    K: Any + Eq + Hash + Debug,
    V: Traverse,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Mapping for BTreeMap<K, V>
where
    K: Any + Ord + Debug,
    V: Traverse,
{
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn keys(&self) -> Vec<MapKey<'_>> {
        labelled_keys(BTreeMap::keys(self))
    }

    fn lookup(&self, key: &dyn Any) -> Result<Option<&dyn Traverse>, Fault> {
        let key = downcast_key::<K>(key)?;
        Ok(self.get(key).map(|value| value as &dyn Traverse))
    }
}

impl<K, V> Traverse for BTreeMap<K, V>
where
    K: Any + Ord + Debug,
    V: Traverse,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Mapping for IndexMap<K, V>
where
    K: Any + Eq + Hash + Debug,
    V: Traverse,
{
    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn keys(&self) -> Vec<MapKey<'_>> {
        labelled_keys(IndexMap::keys(self))
    }

    fn lookup(&self, key: &dyn Any) -> Result<Option<&dyn Traverse>, Fault> {
        let key = downcast_key::<K>(key)?;
        Ok(self.get(key).map(|value| value as &dyn Traverse))
    }
}

impl<K, V> Traverse for IndexMap<K, V>
where
    K: Any + Eq + Hash + Debug,
    V: Traverse,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}
