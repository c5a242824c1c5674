use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::{DashMap, mapref::entry::Entry};
use tower_lsp::lsp_types::Position;

use crate::{symbols::Location, vfs::FileId};

/// Cursor position a definition request was made at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnswerKey {
    pub file: FileId,
    pub line: u32,
    pub column: u32,
}

impl AnswerKey {
    pub fn new(
        file: FileId,
        position: Position,
    ) -> Self {
        Self {
            file,
            line: position.line,
            column: position.character,
        }
    }
}

#[derive(Debug, Clone)]
enum Slot {
    InFlight(u64),
    Done(Option<Location>),
}

/// Result of [`AnswerCache::claim`].
#[derive(Debug)]
pub enum Claim {
    /// A completed answer (which may be "no definition").
    Cached(Option<Location>),
    /// Another resolution for the same key is running.
    Pending,
    /// The caller now owns the key and must settle the ticket.
    Claimed(ResolveTicket),
}

/// Memoized definition answers plus the in-flight markers for keys that are
/// being resolved.
///
/// Both live in one map so checking for a cached answer and marking a key as
/// in flight is a single atomic step per key.
#[derive(Debug, Clone, Default)]
pub struct AnswerCache {
    slots: Arc<DashMap<AnswerKey, Slot>>,
    next_ticket: Arc<AtomicU64>,
}

impl AnswerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(
        &self,
        key: AnswerKey,
    ) -> Claim {
        match self.slots.entry(key.clone()) {
            Entry::Occupied(occupied) => match occupied.get() {
                Slot::Done(outcome) => Claim::Cached(outcome.clone()),
                Slot::InFlight(_) => Claim::Pending,
            },
            Entry::Vacant(vacant) => {
                let id = self.next_ticket.fetch_add(1, Ordering::Relaxed);
                vacant.insert(Slot::InFlight(id));
                Claim::Claimed(ResolveTicket {
                    slots: Arc::clone(&self.slots),
                    key,
                    id,
                    settled: false,
                })
            },
        }
    }

    /// Completed answer for `key`; `None` when absent or still in flight.
    pub fn get(
        &self,
        key: &AnswerKey,
    ) -> Option<Option<Location>> {
        match self.slots.get(key)?.value() {
            Slot::Done(outcome) => Some(outcome.clone()),
            Slot::InFlight(_) => None,
        }
    }

    pub fn is_in_flight(
        &self,
        key: &AnswerKey,
    ) -> bool {
        self.slots.get(key).is_some_and(|slot| matches!(slot.value(), Slot::InFlight(_)))
    }

    /// Drop every answer requested from `file` and every answer pointing
    /// into it. In-flight resolutions for `file` lose their slot, so their
    /// outcome is not cached when they finish.
    pub fn invalidate_file(
        &self,
        file: &FileId,
    ) -> usize {
        let before = self.slots.len();
        self.slots.retain(|key, slot| {
            let targets_file = matches!(slot, Slot::Done(Some(location)) if location.file == *file);
            key.file != *file && !targets_file
        });
        before.saturating_sub(self.slots.len())
    }

    pub fn clear(&self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Ownership of an in-flight key.
///
/// [`complete`](Self::complete) stores the outcome. Dropping the ticket
/// without completing it (the request future was cancelled) releases the
/// in-flight marker so later requests can resolve the key again.
#[derive(Debug)]
pub struct ResolveTicket {
    slots: Arc<DashMap<AnswerKey, Slot>>,
    key: AnswerKey,
    id: u64,
    settled: bool,
}

impl ResolveTicket {
    pub fn key(&self) -> &AnswerKey {
        &self.key
    }

    /// Store `outcome` if this ticket still owns the slot. Returns whether
    /// the outcome was cached.
    pub fn complete(
        mut self,
        outcome: Option<Location>,
    ) -> bool {
        self.settled = true;
        if let Some(mut slot) = self.slots.get_mut(&self.key)
            && matches!(*slot, Slot::InFlight(id) if id == self.id)
        {
            *slot = Slot::Done(outcome);
            return true;
        }
        false
    }
}

impl Drop for ResolveTicket {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let id = self.id;
        self.slots.remove_if(&self.key, |_, slot| matches!(slot, Slot::InFlight(current) if *current == id));
    }
}

#[cfg(test)]
#[path = "../../tests/src/definition/answer_cache_tests.rs"]
mod tests;
