use crate::fault::Fault;
use bigdecimal::BigDecimal;
use core::any::Any;
use core::cell::Ref;
use core::fmt::Display;
use alloc::borrow::Cow;

/// A value that can be walked by the comparator.
///
/// Implementations expose the value's [`Shape`], which the snapshot and the
/// traversal dispatch on. Use `#[derive(Traverse)]` for structs and enums.
pub trait Traverse {
    fn shape(&self) -> Shape<'_>;

    /// Whether the value is the zero value of its type. Two zero values of the
    /// same type are equal without looking inside them.
    fn is_zero(&self) -> bool {
        false
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// The classification of a value used for dispatch.
pub enum Shape<'a> {
    /// Arbitrary-precision decimal leaf, compared by numeric value.
    Decimal(&'a BigDecimal),
    Scalar(Scalar<'a>),
    Pointer(Pointer<'a>),
    Record(Record<'a>),
    Sequence(Vec<&'a dyn Traverse>),
    Mapping(&'a dyn Mapping),
    /// A dynamic wrapper around exactly one value (`Option`, `Box<dyn Traverse>`, ...).
    Interface(&'a dyn Traverse),
    /// A value that has to be borrowed before it can be read (`RefCell`).
    Guarded(&'a dyn Guarded),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Kind {
    Decimal,
    Scalar,
    Pointer,
    Record,
    Sequence,
    Mapping,
    Interface,
    Guarded,
}

impl Shape<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Decimal(_) => Kind::Decimal,
            Shape::Scalar(_) => Kind::Scalar,
            Shape::Pointer(_) => Kind::Pointer,
            Shape::Record(_) => Kind::Record,
            Shape::Sequence(_) => Kind::Sequence,
            Shape::Mapping(_) => Kind::Mapping,
            Shape::Interface(_) => Kind::Interface,
            Shape::Guarded(_) => Kind::Guarded,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    Unit,
    /// An empty `Option` or an unset cell.
    Null,
    Bool(bool),
    Int(i128),
    UInt(u128),
    Float(f64),
    Char(char),
    Str(Cow<'a, str>),
}

impl Scalar<'_> {
    pub fn into_owned(self) -> Scalar<'static> {
        match self {
            Scalar::Unit => Scalar::Unit,
            Scalar::Null => Scalar::Null,
            Scalar::Bool(value) => Scalar::Bool(value),
            Scalar::Int(value) => Scalar::Int(value),
            Scalar::UInt(value) => Scalar::UInt(value),
            Scalar::Float(value) => Scalar::Float(value),
            Scalar::Char(value) => Scalar::Char(value),
            Scalar::Str(value) => Scalar::Str(Cow::Owned(value.into_owned())),
        }
    }

    /// Equality where NaN equals NaN, so that every scalar equals itself.
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Float(a), Scalar::Float(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (a, b) => a == b,
        }
    }
}

impl Display for Scalar<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Scalar::Unit => write!(f, "()"),
            Scalar::Null => write!(f, "None"),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::UInt(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Char(value) => write!(f, "{value:?}"),
            Scalar::Str(value) => write!(f, "{value:?}"),
        }
    }
}

/// Identity of a pointer target: its address together with its type, so that a
/// struct and its first field never share an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId {
    pub address: usize,
    pub type_name: &'static str,
}

pub struct Pointer<'a> {
    pub id: PointerId,
    pub target: &'a dyn Traverse,
}

impl<'a> Pointer<'a> {
    pub fn new<T: Traverse>(target: &'a T) -> Self {
        Pointer {
            id: PointerId {
                address: core::ptr::from_ref(target).cast::<()>() as usize,
                type_name: target.type_name(),
            },
            target,
        }
    }

    /// Pointer to a trait object, identified by its data address.
    pub fn new_dyn(target: &'a dyn Traverse) -> Self {
        Pointer {
            id: PointerId {
                address: core::ptr::from_ref(target).cast::<()>() as usize,
                type_name: target.type_name(),
            },
            target,
        }
    }
}

pub struct Field<'a> {
    pub name: &'static str,
    pub value: &'a dyn Traverse,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: &'a dyn Traverse) -> Self {
        Field { name, value }
    }
}

/// Fields of a struct or of the active variant of an enum, in declaration order.
pub struct Record<'a> {
    pub variant: Option<&'static str>,
    pub fields: Vec<Field<'a>>,
}

impl<'a> Record<'a> {
    pub fn new(fields: Vec<Field<'a>>) -> Self {
        Record {
            variant: None,
            fields,
        }
    }

    pub fn variant(name: &'static str, fields: Vec<Field<'a>>) -> Self {
        Record {
            variant: Some(name),
            fields,
        }
    }
}

pub struct MapKey<'a> {
    pub raw: &'a dyn Any,
    /// Debug rendering of the key, used for snapshots and messages.
    pub label: String,
}

/// Key/value collections. Keys are passed around as `Any` so that the key taken
/// from one map can index another map of the same type.
pub trait Mapping {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in a deterministic order.
    fn keys(&self) -> Vec<MapKey<'_>>;

    /// Looks up `key`. A key of the wrong type is a fault, a missing key is `None`.
    fn lookup(&self, key: &dyn Any) -> Result<Option<&dyn Traverse>, Fault>;
}

pub trait Guarded {
    fn borrow_inner(&self) -> Result<Ref<'_, dyn Traverse + '_>, Fault>;
}
