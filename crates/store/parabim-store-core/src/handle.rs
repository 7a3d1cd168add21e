//! Handle: a typed reference to a record, either inline or by id.
//!
//! Handles never own what they point at and perform no I/O. Resolving an
//! indirect handle always goes through [`RecordStore::read`](crate::RecordStore::read).

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::ids::RecordId;
use crate::kind::RecordKind;
use crate::record::Record;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Handle {
    /// Carries the record value itself.
    Direct(Box<Record>),
    /// Carries only the id; `kind` is what the referencing field expects.
    ByReference { id: RecordId, kind: RecordKind },
}

impl Handle {
    pub fn reference(id: RecordId, kind: RecordKind) -> Self {
        Handle::ByReference { id, kind }
    }

    pub fn direct(record: Record) -> Self {
        Handle::Direct(Box::new(record))
    }

    /// Id of the referenced record. For a direct handle this is the inline
    /// record's own id.
    pub fn id(&self) -> RecordId {
        match self {
            Handle::Direct(record) => record.id,
            Handle::ByReference { id, .. } => *id,
        }
    }

    /// Id when the handle is indirect, `None` for direct handles.
    pub fn reference_id(&self) -> Option<RecordId> {
        match self {
            Handle::ByReference { id, .. } => Some(*id),
            Handle::Direct(_) => None,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Handle::Direct(record) => record.kind,
            Handle::ByReference { kind, .. } => *kind,
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Handle::Direct(_))
    }

    /// Fail unless this handle is declared to point at `expected`.
    pub fn expect_kind(&self, expected: RecordKind) -> Result<&Self> {
        let actual = self.kind();
        if actual != expected {
            return Err(StoreError::KindMismatch {
                id: self.id(),
                expected,
                actual,
            });
        }
        Ok(self)
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Handle::ByReference { id: a, .. }, Handle::ByReference { id: b, .. }) => a == b,
            (Handle::Direct(a), Handle::Direct(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&Record> for Handle {
    fn from(record: &Record) -> Self {
        record.handle()
    }
}
