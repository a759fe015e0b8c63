
use crate::{
    error::{MappingError, PersistenceError},
    key::KeyValue,
    record::Record,
    value::{CoerceError, CoerceFn, FieldType, Value},
};

///
/// FieldMapping
///
/// One column-to-field correspondence. The coercion function is resolved
/// from the declared type when the mapping is built, so materialization
/// never inspects types at runtime.
///

#[derive(Debug)]
pub struct FieldMapping {
    column: String,
    field: String,
    ty: FieldType,
    coerce: CoerceFn,
}

impl FieldMapping {
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.ty
    }

    pub(crate) fn coerce(&self, value: Value) -> Result<Value, CoerceError> {
        (self.coerce)(value)
    }
}

///
/// Mapping
///
/// Immutable, declarative row-to-record contract: the ordered field list,
/// the ordered primary-key subset, and key extraction from candidate
/// records. Primary-key field order is fixed and must match the
/// `?`-placeholder order of any SQL consuming it.
///
/// A mapping holds no per-call state and may be shared across threads.
///

#[derive(Debug)]
pub struct Mapping {
    entity: String,
    fields: Vec<FieldMapping>,
    primary_key: Vec<usize>,
}

impl Mapping {
    #[must_use]
    pub fn builder(entity: impl Into<String>) -> MappingBuilder {
        MappingBuilder {
            entity: entity.into(),
            fields: Vec::new(),
            primary_key: Vec::new(),
        }
    }

    /// Entity label used in diagnostics.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    /// Number of primary-key fields (≥ 1 by construction).
    #[must_use]
    pub fn primary_key_arity(&self) -> usize {
        self.primary_key.len()
    }

    /// Primary-key fields in their fixed declaration order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &FieldMapping> {
        self.primary_key.iter().map(|&index| &self.fields[index])
    }

    /// Extract the primary-key tuple from a candidate record.
    pub fn key_of(&self, record: &Record) -> Result<KeyValue, PersistenceError> {
        let mut values = Vec::with_capacity(self.primary_key.len());
        for field in self.primary_key_fields() {
            let value = record.get(field.field()).ok_or_else(|| {
                PersistenceError::mapping(
                    &self.entity,
                    MappingError::MissingKeyField {
                        name: field.field().to_string(),
                    },
                )
            })?;
            values.push(value.clone());
        }

        Ok(KeyValue::compound(values))
    }
}

///
/// MappingBuilder
///
/// Validating constructor for [`Mapping`]. Field order is the declaration
/// order; primary-key order is the order given to `primary_key`.
///

pub struct MappingBuilder {
    entity: String,
    fields: Vec<FieldMapping>,
    primary_key: Vec<String>,
}

impl MappingBuilder {
    #[must_use]
    pub fn field(
        mut self,
        column: impl Into<String>,
        field: impl Into<String>,
        ty: FieldType,
    ) -> Self {
        self.fields.push(FieldMapping {
            column: column.into(),
            field: field.into(),
            ty,
            coerce: ty.coercer(),
        });
        self
    }

    #[must_use]
    pub fn primary_key(mut self, fields: &[&str]) -> Self {
        self.primary_key = fields.iter().map(ToString::to_string).collect();
        self
    }

    pub fn build(self) -> Result<Mapping, PersistenceError> {
        let entity = self.entity;
        let fail = |err| Err(PersistenceError::mapping(&entity, err));

        if self.fields.is_empty() {
            return fail(MappingError::NoFields);
        }
        for (index, field) in self.fields.iter().enumerate() {
            if self.fields[..index].iter().any(|f| f.field == field.field) {
                return fail(MappingError::DuplicateField {
                    name: field.field.clone(),
                });
            }
            if self.fields[..index].iter().any(|f| f.column == field.column) {
                return fail(MappingError::DuplicateColumn {
                    name: field.column.clone(),
                });
            }
        }
        if self.primary_key.is_empty() {
            return fail(MappingError::EmptyPrimaryKey);
        }

        let mut primary_key = Vec::with_capacity(self.primary_key.len());
        for name in &self.primary_key {
            match self.fields.iter().position(|f| &f.field == name) {
                Some(index) => primary_key.push(index),
                None => {
                    return fail(MappingError::UnknownPrimaryKeyField { name: name.clone() });
                }
            }
        }

        Ok(Mapping {
            entity,
            fields: self.fields,
            primary_key,
        })
    }
}
