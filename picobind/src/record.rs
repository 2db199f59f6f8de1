// SPDX-License-Identifier: Apache-2.0

//! Declared types and the traits the binders populate through.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::binder::Binder;
use crate::shared::{EventKind, PullParser};
use crate::BindError;

/// The declared semantic type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Decimal,
    /// Arbitrary-precision number kept as text.
    BigNumber,
    Bool,
    /// Untyped slot, accepts any value.
    Any,
    /// A nested record, by type name.
    Record(&'static str),
    List(Box<FieldType>),
    Optional(Box<FieldType>),
    /// Object with arbitrary keys and uniformly typed values.
    Map(Box<FieldType>),
}

impl FieldType {
    /// The element type parameter of a list, optional or map.
    pub fn element(&self) -> Option<&FieldType> {
        match self {
            FieldType::List(inner) | FieldType::Optional(inner) | FieldType::Map(inner) => {
                Some(inner)
            }
            _ => None,
        }
    }

    /// Whether an event of this kind can start a value of the declared type.
    ///
    /// This looks at kinds only; an integer that does not fit the declared
    /// width is still rejected when it is bound.
    pub fn accepts(&self, kind: EventKind) -> bool {
        match self {
            FieldType::Any => true,
            FieldType::Optional(inner) => kind == EventKind::Null || inner.accepts(kind),
            FieldType::Record(_) | FieldType::Map(_) => kind == EventKind::StartObject,
            FieldType::List(_) => kind == EventKind::StartArray,
            FieldType::Text => kind == EventKind::String,
            FieldType::Integer => matches!(kind, EventKind::Integer | EventKind::BigNumber),
            FieldType::Decimal => matches!(kind, EventKind::Decimal | EventKind::Integer),
            FieldType::BigNumber => matches!(kind, EventKind::BigNumber | EventKind::Integer),
            FieldType::Bool => kind == EventKind::Bool,
        }
    }
}

impl core::fmt::Display for FieldType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldType::Text => f.write_str("text"),
            FieldType::Integer => f.write_str("integer"),
            FieldType::Decimal => f.write_str("decimal"),
            FieldType::BigNumber => f.write_str("big number"),
            FieldType::Bool => f.write_str("boolean"),
            FieldType::Any => f.write_str("any value"),
            FieldType::Record(name) => write!(f, "record {name}"),
            FieldType::List(inner) => write!(f, "list of {inner}"),
            FieldType::Optional(inner) => write!(f, "optional {inner}"),
            FieldType::Map(inner) => write!(f, "map of {inner}"),
        }
    }
}

/// A named, typed slot on a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The JSON key this field is bound from.
    pub name: &'static str,
    pub declared: FieldType,
}

impl Field {
    pub fn new(name: &'static str, declared: FieldType) -> Self {
        Field { name, declared }
    }
}

/// A scalar value taken off the event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Decimal(f64),
    BigNumber(String),
    Bool(bool),
}

/// A value about to be bound.
///
/// For `Object` and `Array` only the opening event has been consumed; the
/// receiver must consume the rest, either by binding it through the
/// [`Binder`] or by handing it to [`Binder::mismatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    Scalar(Scalar),
    Null,
    Object,
    Array,
}

impl Incoming {
    pub fn kind(&self) -> EventKind {
        match self {
            Incoming::Scalar(Scalar::Text(_)) => EventKind::String,
            Incoming::Scalar(Scalar::Integer(_)) => EventKind::Integer,
            Incoming::Scalar(Scalar::Decimal(_)) => EventKind::Decimal,
            Incoming::Scalar(Scalar::BigNumber(_)) => EventKind::BigNumber,
            Incoming::Scalar(Scalar::Bool(_)) => EventKind::Bool,
            Incoming::Null => EventKind::Null,
            Incoming::Object => EventKind::StartObject,
            Incoming::Array => EventKind::StartArray,
        }
    }
}

/// Outcome of offering a keyed value to a [`Target`].
#[derive(Debug, PartialEq)]
pub enum Binding {
    /// The value was stored.
    Written,
    /// The key matched but the value was dropped under
    /// [`MismatchPolicy::Skip`](crate::MismatchPolicy::Skip).
    Skipped,
    /// No field has this key. The value is handed back, still unconsumed.
    Unknown(Incoming),
}

impl Binding {
    pub fn from_written(written: bool) -> Self {
        if written {
            Binding::Written
        } else {
            Binding::Skipped
        }
    }
}

/// A type that can fill a declared slot from one incoming value.
pub trait Bind: Sized {
    fn declared() -> FieldType;

    /// A default instance, used before binding and as the placeholder for
    /// array items that are `null` or were skipped.
    fn construct() -> Result<Self, BindError>;

    /// Stores `value` into `self`. Returns `Ok(false)` when the value was
    /// consumed without writing.
    fn bind<P: PullParser>(
        &mut self,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<bool, BindError>;
}

/// Something the object binder can populate key by key.
pub trait Target {
    fn bind_field<P: PullParser>(
        &mut self,
        key: &str,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<Binding, BindError>;
}

/// A record type with a fixed set of named fields.
///
/// Usually generated by [`record!`](crate::record); a hand-written impl pairs
/// with a `Bind` impl that calls [`bind_record`].
pub trait Record: Target + Sized {
    fn type_name() -> &'static str;

    /// Declared fields in declaration order.
    fn fields() -> Vec<Field>;

    fn construct() -> Result<Self, BindError>;

    /// Looks a field up by JSON key.
    ///
    /// This builds the whole [`fields`](Record::fields) list on each call and
    /// is meant for introspection. Binding itself never calls it: generated
    /// [`Target`] impls match keys against string literals.
    fn field(name: &str) -> Option<Field> {
        Self::fields().into_iter().find(|field| field.name == name)
    }
}

/// `Bind::bind` for record types: a fresh instance is constructed and bound
/// from the object, then written into `slot`.
pub fn bind_record<R: Record, P: PullParser>(
    slot: &mut R,
    value: Incoming,
    binder: &mut Binder<P>,
) -> Result<bool, BindError> {
    match value {
        Incoming::Object => {
            let mut record = R::construct()?;
            binder.bind_object(&mut record)?;
            *slot = record;
            Ok(true)
        }
        other => binder.mismatch(FieldType::Record(R::type_name()), other),
    }
}

impl Bind for String {
    fn declared() -> FieldType {
        FieldType::Text
    }

    fn construct() -> Result<Self, BindError> {
        Ok(String::new())
    }

    fn bind<P: PullParser>(
        &mut self,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<bool, BindError> {
        match value {
            Incoming::Scalar(Scalar::Text(text)) => {
                *self = text;
                Ok(true)
            }
            other => binder.mismatch(FieldType::Text, other),
        }
    }
}

macro_rules! bind_integer {
    ($($ty:ty),*) => {$(
        impl Bind for $ty {
            fn declared() -> FieldType {
                FieldType::Integer
            }

            fn construct() -> Result<Self, BindError> {
                Ok(0)
            }

            fn bind<P: PullParser>(
                &mut self,
                value: Incoming,
                binder: &mut Binder<P>,
            ) -> Result<bool, BindError> {
                let fitted = match &value {
                    Incoming::Scalar(Scalar::Integer(v)) => <$ty>::try_from(*v).ok(),
                    Incoming::Scalar(Scalar::BigNumber(text)) => text.parse::<$ty>().ok(),
                    _ => None,
                };
                match fitted {
                    Some(v) => {
                        *self = v;
                        Ok(true)
                    }
                    None => binder.mismatch(FieldType::Integer, value),
                }
            }
        }
    )*};
}

bind_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Largest magnitudes at which every integer is exactly representable.
const F64_EXACT_INT: u64 = 1 << 53;
const F32_EXACT_INT: u64 = 1 << 24;

impl Bind for f64 {
    fn declared() -> FieldType {
        FieldType::Decimal
    }

    fn construct() -> Result<Self, BindError> {
        Ok(0.0)
    }

    fn bind<P: PullParser>(
        &mut self,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<bool, BindError> {
        let fitted = match &value {
            Incoming::Scalar(Scalar::Decimal(v)) => Some(*v),
            Incoming::Scalar(Scalar::Integer(v)) if v.unsigned_abs() <= F64_EXACT_INT => {
                Some(*v as f64)
            }
            _ => None,
        };
        match fitted {
            Some(v) => {
                *self = v;
                Ok(true)
            }
            None => binder.mismatch(FieldType::Decimal, value),
        }
    }
}

impl Bind for f32 {
    fn declared() -> FieldType {
        FieldType::Decimal
    }

    fn construct() -> Result<Self, BindError> {
        Ok(0.0)
    }

    fn bind<P: PullParser>(
        &mut self,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<bool, BindError> {
        let fitted = match &value {
            // Only decimals that survive narrowing unchanged.
            Incoming::Scalar(Scalar::Decimal(v)) => {
                Some(*v as f32).filter(|narrowed| f64::from(*narrowed) == *v)
            }
            Incoming::Scalar(Scalar::Integer(v)) if v.unsigned_abs() <= F32_EXACT_INT => {
                Some(*v as f32)
            }
            _ => None,
        };
        match fitted {
            Some(v) => {
                *self = v;
                Ok(true)
            }
            None => binder.mismatch(FieldType::Decimal, value),
        }
    }
}

impl Bind for bool {
    fn declared() -> FieldType {
        FieldType::Bool
    }

    fn construct() -> Result<Self, BindError> {
        Ok(false)
    }

    fn bind<P: PullParser>(
        &mut self,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<bool, BindError> {
        match value {
            Incoming::Scalar(Scalar::Bool(v)) => {
                *self = v;
                Ok(true)
            }
            other => binder.mismatch(FieldType::Bool, other),
        }
    }
}

impl<T: Bind> Bind for Option<T> {
    fn declared() -> FieldType {
        FieldType::Optional(Box::new(T::declared()))
    }

    fn construct() -> Result<Self, BindError> {
        Ok(None)
    }

    fn bind<P: PullParser>(
        &mut self,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<bool, BindError> {
        if value == Incoming::Null {
            *self = None;
            return Ok(true);
        }
        let mut inner = T::construct()?;
        let written = inner.bind(value, binder)?;
        if written {
            *self = Some(inner);
        }
        Ok(written)
    }
}

impl<T: Bind> Bind for Vec<T> {
    fn declared() -> FieldType {
        FieldType::List(Box::new(T::declared()))
    }

    fn construct() -> Result<Self, BindError> {
        Ok(Vec::new())
    }

    fn bind<P: PullParser>(
        &mut self,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<bool, BindError> {
        match value {
            Incoming::Array => {
                let mut items = Vec::new();
                binder.bind_array(&mut items)?;
                *self = items;
                Ok(true)
            }
            other => binder.mismatch(Self::declared(), other),
        }
    }
}

impl<V: Bind> Target for BTreeMap<String, V> {
    fn bind_field<P: PullParser>(
        &mut self,
        key: &str,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<Binding, BindError> {
        let mut item = V::construct()?;
        let written = item.bind(value, binder)?;
        if written {
            self.insert(String::from(key), item);
        }
        Ok(Binding::from_written(written))
    }
}

impl<V: Bind> Bind for BTreeMap<String, V> {
    fn declared() -> FieldType {
        FieldType::Map(Box::new(V::declared()))
    }

    fn construct() -> Result<Self, BindError> {
        Ok(BTreeMap::new())
    }

    fn bind<P: PullParser>(
        &mut self,
        value: Incoming,
        binder: &mut Binder<P>,
    ) -> Result<bool, BindError> {
        match value {
            Incoming::Object => {
                let mut map = BTreeMap::new();
                binder.bind_object(&mut map)?;
                *self = map;
                Ok(true)
            }
            other => binder.mismatch(Self::declared(), other),
        }
    }
}
