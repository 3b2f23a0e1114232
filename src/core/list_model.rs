/// Snapshot of the resources currently shown in the list region

use std::collections::HashSet;

use crate::core::client::ResourceClient;
use crate::core::error::{ConsoleError, ConsoleResult, ErrorSlot};
use crate::core::resource::{ResourceEntry, ResourceKind};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResourceListModel {
    kind: Option<ResourceKind>,
    entries: Vec<ResourceEntry>,
}

impl ResourceListModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from an engine listing. Order is kept as returned;
    /// a repeated id keeps its first row only.
    pub fn from_entries(kind: ResourceKind, entries: Vec<ResourceEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| {
                let fresh = seen.insert(entry.id.clone());
                if !fresh {
                    tracing::debug!(kind = %kind, id = %entry.id, "dropping duplicate row");
                }
                fresh
            })
            .collect();

        Self {
            kind: Some(kind),
            entries,
        }
    }

    /// Replace the snapshot with a fresh listing of `kind`.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// recorded in `errors`. Returns whether the snapshot was replaced.
    pub async fn load<C>(&mut self, client: &C, kind: ResourceKind, errors: &mut ErrorSlot) -> bool
    where
        C: ResourceClient + ?Sized,
    {
        match client.list(kind).await {
            Ok(entries) => {
                *self = Self::from_entries(kind, entries);
                tracing::debug!(kind = %kind, rows = self.len(), "list refreshed");
                true
            }
            Err(err) => {
                tracing::warn!(kind = %kind, error = %err, "list failed, keeping previous rows");
                errors.set(&err);
                false
            }
        }
    }

    /// Resolve a visible row to its entry
    pub fn entry_at(&self, index: usize) -> ConsoleResult<&ResourceEntry> {
        self.entries.get(index).ok_or(ConsoleError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Kind of the current snapshot, `None` before the first successful load
    pub fn kind(&self) -> Option<ResourceKind> {
        self.kind
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bring a row cursor back inside the current snapshot
    pub fn clamp(&self, cursor: usize) -> usize {
        cursor.min(self.entries.len().saturating_sub(1))
    }
}
