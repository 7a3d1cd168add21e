//! Record: a typed, id-addressed value with positional fields.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::handle::Handle;
use crate::ids::RecordId;
use crate::kind::RecordKind;
use crate::value::Value;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub kind: RecordKind,
    pub fields: Vec<Value>,
}

impl Record {
    /// Id carried by records embedded inline; the store never allocates it.
    pub const INLINE_ID: RecordId = RecordId(0);

    /// Build a record, checking the field count against the kind's layout.
    pub fn new(id: RecordId, kind: RecordKind, fields: Vec<Value>) -> Result<Self> {
        let record = Self { id, kind, fields };
        record.validate()?;
        Ok(record)
    }

    /// Field count matches the layout and every real is finite. Snapshots
    /// are JSON, which has no encoding for NaN or infinity.
    pub fn validate(&self) -> Result<()> {
        if self.fields.len() != self.kind.arity() {
            return Err(StoreError::MalformedRecord {
                kind: self.kind,
                reason: format!(
                    "expected {} fields, got {}",
                    self.kind.arity(),
                    self.fields.len()
                ),
            });
        }
        if let Some(index) = self.fields.iter().position(|f| !f.is_finite()) {
            let name = self.kind.field_names().get(index).copied().unwrap_or("?");
            return Err(StoreError::MalformedRecord {
                kind: self.kind,
                reason: format!("field '{name}' holds a non-finite real"),
            });
        }
        Ok(())
    }

    /// A record meant to be embedded in another record's field.
    /// Missing trailing fields are padded with `Null`.
    pub fn inline(kind: RecordKind, mut fields: Vec<Value>) -> Self {
        fields.resize(kind.arity(), Value::Null);
        Self {
            id: Self::INLINE_ID,
            kind,
            fields,
        }
    }

    pub fn is_inline(&self) -> bool {
        self.id == Self::INLINE_ID
    }

    /// Indirect handle to this record.
    pub fn handle(&self) -> Handle {
        Handle::reference(self.id, self.kind)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.kind
            .field_index(name)
            .and_then(|i| self.fields.get(i))
    }

    pub fn field_at(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let index = self
            .kind
            .field_index(name)
            .ok_or_else(|| StoreError::MalformedRecord {
                kind: self.kind,
                reason: format!("unknown field '{name}'"),
            })?;
        match self.fields.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(StoreError::MalformedRecord {
                kind: self.kind,
                reason: format!("field '{name}' missing from record {}", self.id),
            }),
        }
    }

    /// Handle stored in a named field, if the field holds one.
    pub fn handle_field(&self, name: &str) -> Option<&Handle> {
        self.field(name).and_then(Value::as_handle)
    }

    /// Ids of every indirect handle in this record, in field order.
    pub fn references(&self) -> Vec<RecordId> {
        let mut out = Vec::new();
        for field in &self.fields {
            field.collect_references(&mut out);
        }
        out
    }
}
