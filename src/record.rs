use crate::error::LoggerError;
use crate::value::{FieldValue, LogValue, RecordMap};
use serde_json::Value;

/// Target of one declared relationship.
pub enum Related<'a> {
    /// No relation set. The key is left out of the converted mapping.
    Absent,
    One(&'a dyn ModelRecord),
    /// To-many relation. An empty collection still produces an empty
    /// sequence.
    Many(Vec<&'a dyn ModelRecord>),
}

/// Enumerates the scalar columns of a record in declaration order.
pub trait FieldEnumerable {
    fn fields(&self) -> Result<Vec<(String, FieldValue)>, LoggerError>;
}

/// Enumerates the relationships of a record in declaration order.
///
/// Records without relationships can rely on the default.
pub trait RelationEnumerable {
    fn relations(&self) -> Result<Vec<(String, Related<'_>)>, LoggerError> {
        Ok(Vec::new())
    }
}

/// Anything the logger can convert into a mapping.
pub trait ModelRecord: FieldEnumerable + RelationEnumerable {}

impl<T: FieldEnumerable + RelationEnumerable> ModelRecord for T {}

/// Convert a record into a plain mapping.
///
/// Scalar fields are copied with their native values. With
/// `include_relationships`, each set relationship is added as a mapping
/// (to-one) or a sequence of mappings (to-many); related records are
/// always converted without their own relationships, so the result is at
/// most one level deep.
pub fn to_mapping<R>(record: &R, include_relationships: bool) -> Result<RecordMap, LoggerError>
where
    R: ModelRecord + ?Sized,
{
    let mut data: RecordMap = record
        .fields()?
        .into_iter()
        .map(|(name, value)| (name, LogValue::Scalar(value)))
        .collect();

    if include_relationships {
        for (name, related) in record.relations()? {
            match related {
                Related::Absent => {}
                Related::Many(items) => {
                    let list = items
                        .into_iter()
                        .map(|item| to_mapping(item, false).map(LogValue::Map))
                        .collect::<Result<Vec<_>, _>>()?;
                    data.insert(name, LogValue::List(list));
                }
                Related::One(item) => {
                    data.insert(name, LogValue::Map(to_mapping(item, false)?));
                }
            }
        }
    }

    Ok(data)
}

/// Struct fields that can be declared as relationships.
pub trait IntoRelated {
    fn related(&self) -> Related<'_>;
}

impl<T: ModelRecord> IntoRelated for Option<T> {
    fn related(&self) -> Related<'_> {
        match self {
            Some(record) => Related::One(record),
            None => Related::Absent,
        }
    }
}

impl<T: ModelRecord> IntoRelated for Vec<T> {
    fn related(&self) -> Related<'_> {
        Related::Many(self.iter().map(|r| r as &dyn ModelRecord).collect())
    }
}

/// Optional to-many relation: `None` leaves the key out, `Some` of an
/// empty collection writes an empty sequence.
///
/// `Vec<T>` must never implement `FieldEnumerable`, or this overlaps the
/// `Option<T>` impl.
impl<T: ModelRecord> IntoRelated for Option<Vec<T>> {
    fn related(&self) -> Related<'_> {
        match self {
            Some(records) => records.related(),
            None => Related::Absent,
        }
    }
}

impl<T: ModelRecord> IntoRelated for Box<T> {
    fn related(&self) -> Related<'_> {
        Related::One(&**self)
    }
}

impl<T: FieldEnumerable + ?Sized> FieldEnumerable for Box<T> {
    fn fields(&self) -> Result<Vec<(String, FieldValue)>, LoggerError> {
        (**self).fields()
    }
}

impl<T: RelationEnumerable + ?Sized> RelationEnumerable for Box<T> {
    fn relations(&self) -> Result<Vec<(String, Related<'_>)>, LoggerError> {
        (**self).relations()
    }
}

/// A JSON object is a record whose keys are all scalar fields, so any
/// `Serialize` type can be logged through `serde_json::to_value`.
impl FieldEnumerable for Value {
    fn fields(&self) -> Result<Vec<(String, FieldValue)>, LoggerError> {
        let Value::Object(map) = self else {
            return Err(LoggerError::schema(format!(
                "expected a JSON object, found {}",
                json_kind(self)
            )));
        };

        Ok(map
            .iter()
            .map(|(key, value)| (key.clone(), json_field(value)))
            .collect())
    }
}

impl RelationEnumerable for Value {}

fn json_field(value: &Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                FieldValue::UInt(u)
            } else {
                n.as_f64().map_or_else(|| FieldValue::Json(value.clone()), FieldValue::Float)
            }
        }
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => FieldValue::Json(value.clone()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
