//! Value: the contents of a single record field.

use serde::{Deserialize, Serialize};

use crate::handle::Handle;
use crate::ids::RecordId;
use crate::record::Record;

/// Lightweight kind enum for quick dispatch without matching payloads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Real,
    Text,
    Enum,
    Inline,
    Ref,
    List,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Unset optional field
    Null,

    Bool(bool),

    Integer(i64),

    Real(f64),

    Text(String),

    /// Enumeration label, e.g. `AREA` or `DIFFERENCE`
    Enum(String),

    /// A record embedded by value; it is not addressable through the store
    Inline(Box<Record>),

    /// Reference to another record
    Ref(Handle),

    /// Ordered sequence of any values
    List(Vec<Value>),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::Text(_) => ValueKind::Text,
            Value::Enum(_) => ValueKind::Enum,
            Value::Inline(_) => ValueKind::Inline,
            Value::Ref(_) => ValueKind::Ref,
            Value::List(_) => ValueKind::List,
        }
    }

    /// Convenience constructors
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn label(s: impl Into<String>) -> Self {
        Value::Enum(s.into())
    }

    pub fn reals(values: &[f64]) -> Self {
        Value::List(values.iter().copied().map(Value::Real).collect())
    }

    pub fn refs(handles: impl IntoIterator<Item = Handle>) -> Self {
        Value::List(handles.into_iter().map(Value::Ref).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<&Handle> {
        match self {
            Value::Ref(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// A list of numbers, e.g. point coordinates or direction ratios.
    pub fn as_reals(&self) -> Option<Vec<f64>> {
        self.as_list()?.iter().map(Value::as_real).collect()
    }

    /// Append the id of every indirect handle found in this value, descending
    /// into lists and inline records.
    pub(crate) fn collect_references(&self, out: &mut Vec<RecordId>) {
        match self {
            Value::Ref(h) => {
                if let Some(id) = h.reference_id() {
                    out.push(id);
                }
            }
            Value::List(items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
            Value::Inline(record) => {
                for field in &record.fields {
                    field.collect_references(out);
                }
            }
            _ => {}
        }
    }

    /// False if any real inside this value, including embedded records, is
    /// NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            Value::Real(v) => v.is_finite(),
            Value::List(items) => items.iter().all(Value::is_finite),
            Value::Inline(record) => record.fields.iter().all(Value::is_finite),
            Value::Ref(Handle::Direct(record)) => record.fields.iter().all(Value::is_finite),
            _ => true,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Handle> for Value {
    fn from(h: Handle) -> Self {
        Value::Ref(h)
    }
}

impl From<Option<Handle>> for Value {
    fn from(h: Option<Handle>) -> Self {
        h.map(Value::Ref).unwrap_or(Value::Null)
    }
}
