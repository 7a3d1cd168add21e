//! RecordStore: the arena that owns every record of the current generation.
//!
//! Lifecycle:
//! 1. `initialize()` opens generation 0 and writes the default representation
//!    context (plus its world coordinate system).
//! 2. `write`/`insert`/`read`/`delete` operate on the open generation.
//! 3. `commit()` snapshots the live records, reopens them as the next
//!    generation and swaps it in. Ids survive; only the counter moves.
//! 4. `close()` drops the generation; the store cannot be reopened.

use hashbrown::{HashMap, HashSet};
use log::{debug, trace};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::handle::Handle;
use crate::ids::{IdAllocator, RecordId};
use crate::kind::RecordKind;
use crate::record::Record;
use crate::snapshot::StoreSnapshot;
use crate::value::Value;

#[derive(Debug)]
struct Generation {
    counter: u32,
    records: HashMap<RecordId, Record>,
    ids: IdAllocator,
    context: RecordId,
}

fn fresh_id(ids: &mut IdAllocator) -> Result<RecordId> {
    ids.alloc()
        .ok_or_else(|| StoreError::initialization("first_id leaves no room for the context records"))
}

impl Generation {
    fn snapshot(&self) -> StoreSnapshot {
        let mut records: Vec<Record> = self.records.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        StoreSnapshot {
            generation: self.counter,
            next_id: self.ids.peek(),
            context: self.context,
            records,
        }
    }

    fn open(snapshot: StoreSnapshot, counter: u32) -> Result<Self> {
        let mut ids = IdAllocator::resume(snapshot.next_id);
        let mut records = HashMap::with_capacity(snapshot.records.len());
        for record in snapshot.records {
            let id = record.id;
            if record.is_inline() {
                return Err(StoreError::initialization(
                    "snapshot holds a record with the inline id",
                ));
            }
            if let Err(e) = record.validate() {
                return Err(StoreError::initialization(format!(
                    "snapshot record {id}: {e}"
                )));
            }
            ids.observe(id);
            if records.insert(id, record).is_some() {
                return Err(StoreError::initialization(format!(
                    "snapshot holds record {id} twice"
                )));
            }
        }
        match records.get(&snapshot.context) {
            Some(r) if r.kind == RecordKind::GeometricRepresentationContext => {}
            _ => {
                return Err(StoreError::initialization(format!(
                    "context record {} missing from snapshot",
                    snapshot.context
                )))
            }
        }
        Ok(Self {
            counter,
            records,
            ids,
            context: snapshot.context,
        })
    }
}

#[derive(Debug, Default)]
pub struct RecordStore {
    config: StoreConfig,
    initialized: bool,
    generation: Option<Generation>,
}

impl RecordStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            initialized: false,
            generation: None,
        }
    }

    /// Reopen a store from an exported snapshot, at the snapshot's generation.
    pub fn from_snapshot(config: StoreConfig, snapshot: StoreSnapshot) -> Result<Self> {
        config.validate()?;
        let counter = snapshot.generation;
        let generation = Generation::open(snapshot, counter)?;
        debug!(
            "record store reopened at generation {counter} ({} records)",
            generation.records.len()
        );
        Ok(Self {
            config,
            initialized: true,
            generation: Some(generation),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Open generation 0 and write the default representation context.
    /// May only be called once per store.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Err(StoreError::initialization("store is already initialized"));
        }
        self.config.validate()?;

        let cfg = &self.config;
        let dim = cfg.dimension as usize;
        let mut ids = IdAllocator::starting_at(cfg.first_id);
        let origin = Record::new(
            fresh_id(&mut ids)?,
            RecordKind::CartesianPoint,
            vec![Value::reals(&[0.0, 0.0, 0.0][..dim])],
        );
        let origin = origin.map_err(|e| StoreError::initialization(e.to_string()))?;
        let wcs = if dim == 3 {
            Record::new(
                fresh_id(&mut ids)?,
                RecordKind::Axis2Placement3D,
                vec![Value::Ref(origin.handle()), Value::Null, Value::Null],
            )
        } else {
            Record::new(
                fresh_id(&mut ids)?,
                RecordKind::Axis2Placement2D,
                vec![Value::Ref(origin.handle()), Value::Null],
            )
        };
        let wcs = wcs.map_err(|e| StoreError::initialization(e.to_string()))?;
        let context = Record::new(
            fresh_id(&mut ids)?,
            RecordKind::GeometricRepresentationContext,
            vec![
                Value::text(cfg.context_identifier.as_str()),
                Value::text(cfg.context_type.as_str()),
                Value::Integer(cfg.dimension),
                Value::Real(cfg.precision),
                Value::Ref(wcs.handle()),
                Value::Null,
            ],
        )
        .map_err(|e| StoreError::initialization(e.to_string()))?;

        let context_id = context.id;
        let mut records = HashMap::new();
        for record in [origin, wcs, context] {
            records.insert(record.id, record);
        }

        self.generation = Some(Generation {
            counter: 0,
            records,
            ids,
            context: context_id,
        });
        self.initialized = true;
        debug!("record store initialized; context {context_id}");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// True while a generation is open (initialized and not closed).
    pub fn is_open(&self) -> bool {
        self.generation.is_some()
    }

    fn open_generation(&self) -> Result<&Generation> {
        self.generation.as_ref().ok_or(StoreError::NotInitialized)
    }

    fn open_generation_mut(&mut self) -> Result<&mut Generation> {
        self.generation.as_mut().ok_or(StoreError::NotInitialized)
    }

    /// Current generation counter.
    pub fn generation(&self) -> Result<u32> {
        Ok(self.open_generation()?.counter)
    }

    /// The default representation context written by `initialize()`.
    pub fn context(&self) -> Result<&Record> {
        let generation = self.open_generation()?;
        generation
            .records
            .get(&generation.context)
            .ok_or_else(|| StoreError::not_found(generation.context))
    }

    pub fn context_handle(&self) -> Result<Handle> {
        Ok(self.context()?.handle())
    }

    /// Next unused id of the current generation. Fails once the id space
    /// is exhausted instead of wrapping onto live records.
    pub fn allocate_id(&mut self) -> Result<RecordId> {
        let generation = self.open_generation_mut()?;
        let id = generation
            .ids
            .alloc()
            .ok_or_else(|| StoreError::MalformedState {
                reason: "record id space exhausted".to_string(),
            })?;
        if generation.records.contains_key(&id) {
            return Err(StoreError::MalformedState {
                reason: format!("allocator handed out live id {id}"),
            });
        }
        Ok(id)
    }

    /// Upsert a record into the current generation, keyed by its id.
    pub fn write(&mut self, record: Record) -> Result<()> {
        let generation = self.open_generation_mut()?;
        if record.is_inline() {
            return Err(StoreError::MalformedRecord {
                kind: record.kind,
                reason: "inline records are not addressable".to_string(),
            });
        }
        record.validate()?;
        generation.ids.observe(record.id);
        trace!("write {} {}", record.kind, record.id);
        generation.records.insert(record.id, record);
        Ok(())
    }

    /// Allocate an id, write a new record under it and return an indirect handle.
    pub fn insert(&mut self, kind: RecordKind, fields: Vec<Value>) -> Result<Handle> {
        let id = self.allocate_id()?;
        let record = Record::new(id, kind, fields)?;
        self.write(record)?;
        Ok(Handle::reference(id, kind))
    }

    /// Resolve a handle. Direct handles yield their inline value, indirect
    /// handles are looked up in the current generation. A null handle is
    /// reported as `NotFound`.
    pub fn read<'a>(&'a self, handle: impl Into<Option<&'a Handle>>) -> Result<&'a Record> {
        let generation = self.open_generation()?;
        match handle.into() {
            None => Err(StoreError::null_target()),
            Some(Handle::Direct(record)) => Ok(record),
            Some(Handle::ByReference { id, .. }) => generation
                .records
                .get(id)
                .ok_or_else(|| StoreError::not_found(*id)),
        }
    }

    /// `read` plus a check that the resolved record has the expected kind.
    pub fn read_as<'a>(
        &'a self,
        handle: impl Into<Option<&'a Handle>>,
        kind: RecordKind,
    ) -> Result<&'a Record> {
        let record = self.read(handle)?;
        if record.kind != kind {
            return Err(StoreError::KindMismatch {
                id: record.id,
                expected: kind,
                actual: record.kind,
            });
        }
        Ok(record)
    }

    pub fn get(&self, id: RecordId) -> Result<&Record> {
        self.open_generation()?
            .records
            .get(&id)
            .ok_or_else(|| StoreError::not_found(id))
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.generation
            .as_ref()
            .is_some_and(|g| g.records.contains_key(&id))
    }

    /// Number of live records, zero when no generation is open.
    pub fn len(&self) -> usize {
        self.generation.as_ref().map_or(0, |g| g.records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of every live record of `kind`, ascending.
    pub fn ids_of_kind(&self, kind: RecordKind) -> Result<Vec<RecordId>> {
        let mut ids: Vec<RecordId> = self
            .open_generation()?
            .records
            .values()
            .filter(|r| r.kind == kind)
            .map(|r| r.id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Delete the record a handle resolves to. A null target is a no-op.
    ///
    /// With `recursive`, every record reachable through indirect handles is
    /// deleted first, children before parents. Shared records are visited
    /// once and cycles terminate. The default context is never cascaded into.
    /// Deletion is not transactional: if a dangling reference is hit midway,
    /// records already removed stay removed.
    ///
    /// Returns the deleted ids in deletion order.
    pub fn delete<'a>(
        &mut self,
        target: impl Into<Option<&'a Handle>>,
        recursive: bool,
    ) -> Result<Vec<RecordId>> {
        match target.into() {
            None => Ok(Vec::new()),
            Some(handle) => self.delete_id(handle.id(), recursive),
        }
    }

    pub fn delete_record(&mut self, record: &Record, recursive: bool) -> Result<Vec<RecordId>> {
        self.delete_id(record.id, recursive)
    }

    pub fn delete_id(&mut self, root: RecordId, recursive: bool) -> Result<Vec<RecordId>> {
        let generation = self.open_generation_mut()?;
        let context = generation.context;
        if root == context {
            return Err(StoreError::MalformedState {
                reason: "the default context record cannot be deleted".to_string(),
            });
        }
        if !generation.records.contains_key(&root) {
            return Err(StoreError::not_found(root));
        }
        if !recursive {
            generation.records.remove(&root);
            trace!("delete {root}");
            return Ok(vec![root]);
        }

        let mut deleted = Vec::new();
        let mut visited: HashSet<RecordId> = HashSet::new();
        // (id, children already pushed)
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                if generation.records.remove(&id).is_some() {
                    trace!("delete {id}");
                    deleted.push(id);
                }
                continue;
            }
            if !visited.insert(id) {
                continue;
            }
            let children = match generation.records.get(&id) {
                Some(record) => record.references(),
                None => return Err(StoreError::not_found(id)),
            };
            stack.push((id, true));
            for child in children.into_iter().rev() {
                if child != context && !visited.contains(&child) {
                    stack.push((child, false));
                }
            }
        }
        debug!("cascading delete from {root} removed {} records", deleted.len());
        Ok(deleted)
    }

    /// Serialize the live records of the current generation.
    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        Ok(self.open_generation()?.snapshot())
    }

    pub fn export_json(&self) -> Result<String> {
        self.snapshot()?.to_json()
    }

    /// Snapshot, close and reopen the store as the next generation.
    /// The swap only happens once the new generation opened successfully.
    /// Returns the new generation counter.
    pub fn commit(&mut self) -> Result<u32> {
        let current = self
            .generation
            .as_ref()
            .ok_or_else(|| StoreError::initialization("commit called without an open generation"))?;
        let next_counter = current
            .counter
            .checked_add(1)
            .ok_or_else(|| StoreError::initialization("generation counter exhausted"))?;
        let encoded = current.snapshot().to_json()?;
        let reopened = Generation::open(StoreSnapshot::from_json(&encoded)?, next_counter)?;
        debug!(
            "commit: generation {} -> {next_counter} ({} records, {} bytes)",
            current.counter,
            reopened.records.len(),
            encoded.len()
        );
        self.generation = Some(reopened);
        Ok(next_counter)
    }

    /// Close the current generation. Afterwards every operation reports
    /// `NotInitialized`.
    pub fn close(&mut self) -> Result<()> {
        let generation = self.generation.take().ok_or(StoreError::NotInitialized)?;
        debug!(
            "record store closed at generation {} ({} records)",
            generation.counter,
            generation.records.len()
        );
        Ok(())
    }
}
