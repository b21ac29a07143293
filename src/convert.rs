use crate::error::LoggerError;
use crate::value::{EnumMember, FieldValue, LogValue, Opaque};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Number, Value};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

type Converter = Arc<dyn Fn(&Opaque) -> Option<String> + Send + Sync>;

const INDENT: &[u8] = b"    ";

/// Table of string conversions for values the JSON encoder cannot
/// represent natively, keyed by the wrapped Rust type.
///
/// The default table covers [`Decimal`] (exact decimal text), [`Uuid`]
/// (hyphenated form), chrono timestamps (their `Display` output) and
/// [`EnumMember`] (the bare member name). Any other opaque value fails to
/// serialize unless a rule is added with [`ScalarConverters::register`].
#[derive(Clone)]
pub struct ScalarConverters {
    rules: HashMap<TypeId, Converter>,
}

impl ScalarConverters {
    /// A table without any rules.
    pub fn empty() -> Self {
        ScalarConverters {
            rules: HashMap::new(),
        }
    }

    /// Add or replace the rule for values of type `T`.
    pub fn register<T, F>(&mut self, convert: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let rule: Converter = Arc::new(move |value: &Opaque| value.downcast_ref::<T>().map(&convert));
        self.rules.insert(TypeId::of::<T>(), rule);
        self
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.rules.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Convert one opaque value to its textual form.
    pub fn convert(&self, value: &Opaque) -> Result<String, LoggerError> {
        self.rules
            .get(&value.type_id())
            .and_then(|rule| rule(value))
            .ok_or(LoggerError::Unserializable {
                type_name: value.type_name(),
            })
    }

    /// Build the JSON tree for a structured value.
    pub fn to_json(&self, value: &LogValue) -> Result<Value, LoggerError> {
        match value {
            LogValue::Scalar(scalar) => self.scalar_to_json(scalar),
            LogValue::Map(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map {
                    out.insert(key.clone(), self.to_json(item)?);
                }
                Ok(Value::Object(out))
            }
            LogValue::List(items) => items
                .iter()
                .map(|item| self.to_json(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }

    fn scalar_to_json(&self, value: &FieldValue) -> Result<Value, LoggerError> {
        Ok(match value {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::UInt(u) => Value::from(*u),
            // NaN and infinities have no JSON form.
            FieldValue::Float(x) => Number::from_f64(*x).map_or(Value::Null, Value::Number),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Json(v) => v.clone(),
            FieldValue::Opaque(o) => Value::String(self.convert(o)?),
        })
    }

    /// Render a structured value as JSON indented by four spaces, with
    /// keys in insertion order and non-ASCII text left unescaped.
    pub fn to_pretty_json(&self, value: &LogValue) -> Result<String, LoggerError> {
        let json = self.to_json(value)?;

        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        json.serialize(&mut ser)?;

        String::from_utf8(buf)
            .map_err(|e| LoggerError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// String form of a scalar logged as a plain message. Opaque values
    /// without a rule fall back to their `Debug` output.
    pub fn render_text(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::Opaque(o) => self.convert(o).unwrap_or_else(|_| format!("{:?}", o)),
            other => other.to_string(),
        }
    }
}

impl Default for ScalarConverters {
    fn default() -> Self {
        let mut table = ScalarConverters::empty();
        table
            .register::<Decimal, _>(|d| d.to_string())
            .register::<Uuid, _>(|u| u.hyphenated().to_string())
            .register::<NaiveDateTime, _>(|t| t.to_string())
            .register::<NaiveDate, _>(|t| t.to_string())
            .register::<DateTime<Utc>, _>(|t| t.to_string())
            .register::<DateTime<FixedOffset>, _>(|t| t.to_string())
            .register::<DateTime<Local>, _>(|t| t.to_string())
            .register::<EnumMember, _>(|m| m.name().to_string());
        table
    }
}

impl fmt::Debug for ScalarConverters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarConverters")
            .field("rules", &self.rules.len())
            .finish()
    }
}
