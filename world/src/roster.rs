//! Insertion-ordered entity storage with deferred removal.
//!
//! Frame passes iterate a collection while earlier visits may remove other
//! members of the same collection. A [`Roster`] never shifts entries during a
//! pass: [`Roster::retire`] only marks an entry, lookups and iteration skip
//! marked entries, and [`Roster::sweep`] drops them once the frame is over.
//! Keys are handed out in increasing order, so key order equals insertion
//! order and lookups use binary search.

use hq_defence_core::{EnemyId, ProjectileId, TowerId};

/// Identifier type a [`Roster`] hands out for its entries.
pub trait RosterKey: Copy + Ord {
    /// Builds the key for the `raw`-th insertion.
    fn from_raw(raw: u32) -> Self;
}

impl RosterKey for TowerId {
    fn from_raw(raw: u32) -> Self {
        Self::new(raw)
    }
}

impl RosterKey for EnemyId {
    fn from_raw(raw: u32) -> Self {
        Self::new(raw)
    }
}

impl RosterKey for ProjectileId {
    fn from_raw(raw: u32) -> Self {
        Self::new(raw)
    }
}

#[derive(Clone, Debug)]
struct Slot<K, T> {
    key: K,
    item: T,
    retired: bool,
}

/// Collection of live entities keyed by monotonically allocated identifiers.
#[derive(Clone, Debug)]
pub struct Roster<K, T> {
    slots: Vec<Slot<K, T>>,
    next_key: u32,
}

impl<K: RosterKey, T> Default for Roster<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RosterKey, T> Roster<K, T> {
    /// Creates an empty roster whose first key is zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_key: 0,
        }
    }

    /// Appends `item` and returns the key allocated for it.
    pub fn insert(&mut self, item: T) -> K {
        let key = K::from_raw(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        self.slots.push(Slot {
            key,
            item,
            retired: false,
        });
        key
    }

    /// Live entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: K) -> Option<&T> {
        self.position(key)
            .map(|index| &self.slots[index])
            .filter(|slot| !slot.retired)
            .map(|slot| &slot.item)
    }

    /// Mutable access to the live entry stored under `key`.
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let index = self.position(key)?;
        let slot = &mut self.slots[index];
        if slot.retired {
            None
        } else {
            Some(&mut slot.item)
        }
    }

    /// Marks the entry under `key` for removal at the next [`Roster::sweep`].
    ///
    /// Returns `true` when a live entry was retired by this call.
    pub fn retire(&mut self, key: K) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        let slot = &mut self.slots[index];
        if slot.retired {
            return false;
        }
        slot.retired = true;
        true
    }

    /// Reports whether `key` refers to a live entry.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Snapshot of live keys in insertion order.
    ///
    /// Passes iterate this snapshot and look every key up again, so each
    /// entry live at snapshot time is visited exactly once and entries
    /// retired mid-pass are skipped.
    #[must_use]
    pub fn live_keys(&self) -> Vec<K> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Iterator over live entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.slots
            .iter()
            .filter(|slot| !slot.retired)
            .map(|slot| (slot.key, &slot.item))
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.retired).count()
    }

    /// Reports whether the roster holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every retired entry, returning how many were removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|slot| !slot.retired);
        before - self.slots.len()
    }

    fn position(&self, key: K) -> Option<usize> {
        self.slots.binary_search_by_key(&key, |slot| slot.key).ok()
    }
}
