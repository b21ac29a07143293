use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Plain mapping produced from a record. Keys keep insertion order, which
/// is the order they are written to the log.
pub type RecordMap = IndexMap<String, LogValue>;

/// A single scalar field value, kept in its native type until the entry
/// is serialized.
///
/// JSON-native values are stored directly. Everything else (decimals,
/// UUIDs, timestamps, enum members, user types) is wrapped in an
/// [`Opaque`] and resolved through the scalar converter table at write
/// time.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    /// Already-structured JSON, written through unchanged.
    Json(serde_json::Value),
    Opaque(Opaque),
}

impl FieldValue {
    /// Wrap an arbitrary host value. It is only serializable if a
    /// converter for `T` is registered.
    pub fn opaque<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
    {
        FieldValue::Opaque(Opaque::new(value))
    }

    /// Store the selected member of an enum. It serializes as the bare
    /// member name, e.g. with `#[derive(strum::IntoStaticStr)]`.
    pub fn enumeration<E>(member: E) -> Self
    where
        E: Into<&'static str> + 'static,
    {
        let member = EnumMember { name: member.into() };
        FieldValue::Opaque(Opaque::named(member, std::any::type_name::<E>()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            FieldValue::Opaque(o) => Some(o),
            _ => None,
        }
    }

    /// Borrow the native value behind an opaque field.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_opaque().and_then(Opaque::downcast_ref)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Json(v) => write!(f, "{}", v),
            FieldValue::Opaque(o) => write!(f, "{:?}", o),
        }
    }
}

trait AnyScalar: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> AnyScalar for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Host value with no JSON representation of its own.
///
/// Clones share the wrapped value; equality is identity of that shared
/// value.
#[derive(Clone)]
pub struct Opaque {
    type_id: TypeId,
    type_name: &'static str,
    value: Arc<dyn AnyScalar>,
}

impl Opaque {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
    {
        Self::named(value, std::any::type_name::<T>())
    }

    /// Like [`Opaque::new`] but reports `type_name` in errors instead of
    /// the name of `T`.
    fn named<T>(value: T, type_name: &'static str) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
    {
        Opaque {
            type_id: TypeId::of::<T>(),
            type_name,
            value: Arc::new(value),
        }
    }

    /// Type the converter table is keyed on.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.value).as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.value, f)
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

/// Selected member of an enum field, see [`FieldValue::enumeration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumMember {
    name: &'static str,
}

impl EnumMember {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

macro_rules! field_value_from {
    ($variant:ident($target:ty): $($src:ty),+) => {
        $(
            impl From<$src> for FieldValue {
                fn from(value: $src) -> Self {
                    FieldValue::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

field_value_from!(Bool(bool): bool);
field_value_from!(Int(i64): i8, i16, i32, i64);
field_value_from!(UInt(u64): u8, u16, u32, u64);
field_value_from!(Float(f64): f32, f64);
field_value_from!(Text(String): String, &str);

impl From<isize> for FieldValue {
    fn from(value: isize) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::UInt(value as u64)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::Json(value)
    }
}

macro_rules! field_value_opaque {
    ($($src:ty),+) => {
        $(
            impl From<$src> for FieldValue {
                fn from(value: $src) -> Self {
                    FieldValue::opaque(value)
                }
            }
        )+
    };
}

field_value_opaque!(
    Decimal,
    Uuid,
    NaiveDateTime,
    NaiveDate,
    DateTime<Utc>,
    DateTime<FixedOffset>,
    DateTime<Local>,
    Vec<u8>
);

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Value inside a structured log entry.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Scalar(FieldValue),
    Map(RecordMap),
    List(Vec<LogValue>),
}

impl LogValue {
    pub fn as_scalar(&self) -> Option<&FieldValue> {
        match self {
            LogValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&RecordMap> {
        match self {
            LogValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[LogValue]> {
        match self {
            LogValue::List(l) => Some(l),
            _ => None,
        }
    }
}

impl From<FieldValue> for LogValue {
    fn from(value: FieldValue) -> Self {
        LogValue::Scalar(value)
    }
}

impl From<RecordMap> for LogValue {
    fn from(value: RecordMap) -> Self {
        LogValue::Map(value)
    }
}

impl From<Vec<RecordMap>> for LogValue {
    fn from(value: Vec<RecordMap>) -> Self {
        LogValue::List(value.into_iter().map(LogValue::Map).collect())
    }
}

impl From<Vec<LogValue>> for LogValue {
    fn from(value: Vec<LogValue>) -> Self {
        LogValue::List(value)
    }
}
