use crate::error::LoggerError;
use crate::record::{FieldEnumerable, ModelRecord, Related, RelationEnumerable};
use crate::value::FieldValue;
use indexmap::IndexMap;

/// Record assembled at runtime, for hosts that have no static type per
/// entity (rows from a query builder, test fixtures).
///
/// ```
/// use record_file_log::dynamic::DynamicRecord;
///
/// let author = DynamicRecord::new().field("id", 1).field("name", "Ann");
/// let book = DynamicRecord::new()
///     .field("id", 10)
///     .field("title", "Dune")
///     .one("author", author)
///     .absent("editor");
/// # let _ = book;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DynamicRecord {
    fields: IndexMap<String, FieldValue>,
    relations: IndexMap<String, DynamicRelation>,
}

#[derive(Debug, Clone)]
pub enum DynamicRelation {
    Absent,
    One(Box<DynamicRecord>),
    Many(Vec<DynamicRecord>),
}

impl DynamicRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn one(mut self, name: impl Into<String>, record: DynamicRecord) -> Self {
        self.set_relation(name, DynamicRelation::One(Box::new(record)));
        self
    }

    pub fn many(mut self, name: impl Into<String>, records: impl IntoIterator<Item = DynamicRecord>) -> Self {
        self.set_relation(name, DynamicRelation::Many(records.into_iter().collect()));
        self
    }

    /// Declare a relationship that is currently not set.
    pub fn absent(mut self, name: impl Into<String>) -> Self {
        self.set_relation(name, DynamicRelation::Absent);
        self
    }

    /// Setting an existing name replaces its value in place.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn set_relation(&mut self, name: impl Into<String>, relation: DynamicRelation) {
        self.relations.insert(name.into(), relation);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

impl FieldEnumerable for DynamicRecord {
    fn fields(&self) -> Result<Vec<(String, FieldValue)>, LoggerError> {
        Ok(self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect())
    }
}

impl RelationEnumerable for DynamicRecord {
    fn relations(&self) -> Result<Vec<(String, Related<'_>)>, LoggerError> {
        Ok(self
            .relations
            .iter()
            .map(|(name, relation)| {
                let related = match relation {
                    DynamicRelation::Absent => Related::Absent,
                    DynamicRelation::One(record) => Related::One(&**record),
                    DynamicRelation::Many(records) => {
                        Related::Many(records.iter().map(|r| r as &dyn ModelRecord).collect())
                    }
                };
                (name.clone(), related)
            })
            .collect())
    }
}
