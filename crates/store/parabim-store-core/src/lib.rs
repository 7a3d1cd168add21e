//! parabim-store-core: generation-based record-graph store.
//!
//! Records are typed, id-addressed values kept in an arena owned by
//! [`RecordStore`]. Records point at each other through [`Handle`]s, which are
//! lookup keys only; the store alone controls record lifetime. A commit
//! snapshots the live records, closes the generation and reopens the next one
//! with every id preserved.

pub mod config;
pub mod error;
pub mod handle;
pub mod ids;
pub mod kind;
pub mod record;
pub mod snapshot;
pub mod store;
pub mod value;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use handle::Handle;
pub use ids::{IdAllocator, RecordId};
pub use kind::RecordKind;
pub use record::Record;
pub use snapshot::StoreSnapshot;
pub use store::RecordStore;
pub use value::{Value, ValueKind};
