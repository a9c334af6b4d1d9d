//! Dense Slot Maps - Fast Iteration, Stable Ids, Configurable Removal
//!
//! A dense slot map stores all of it's values in a `Vec<_>`, and stores the
//! slot state separately. Accessing a value through an [`Id`] costs a double
//! indirection (id -> slot -> value), but iterating over the values is just
//! iterating over a slice.
//!
//! Three allocations back the slot map: the values, the slots (one per id
//! index, holding the version and the position of the value), and the back
//! references from each position to the slot that owns it. Vacant slots are
//! kept on a free-list stack and reused last-in first-out.
//!
//! Each slot is versioned by using the [`Version`] trait. See [`Version`] for
//! docs on version exhaustion. Once a slot's version exhausts it is retired
//! and won't be reused until the slot map resets.
//!
//! Whenever the slot map becomes empty all of the bookkeeping is dropped, so
//! the slots don't keep growing across many fill-and-empty cycles.

use core::ops::{Index, IndexMut};

use std::vec::Vec;

use fiv_core::{
    version::{DefaultVersion, Version},
    AccessError, Id,
};

use crate::{
    iter::{Drain, Entries, EntriesMut, Ids},
    RemovalPolicy,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Slot<V> {
    pub(crate) version: V,
    // only meaningful while `version` is full
    pub(crate) position: usize,
}

/// A dense slot map
#[derive(Clone)]
pub struct SlotMap<T, V: Version = DefaultVersion> {
    policy: RemovalPolicy,
    values: Vec<T>,
    keys: Vec<usize>,
    slots: Vec<Slot<V>>,
    free: Vec<usize>,
    floor: V,
}

/// An empty slot in a dense slot map
///
/// Returned from [`SlotMap::vacant_entry`]
pub struct VacantEntry<'a, T, V: Version = DefaultVersion> {
    map: &'a mut SlotMap<T, V>,
    index: usize,
    version: V,
}

impl<T, V: Version> Default for SlotMap<T, V> {
    fn default() -> Self { Self::INIT }
}

impl<T> SlotMap<T> {
    /// Create a new slot map that keeps the order of its values on removal
    pub const fn new() -> Self { Self::INIT }

    /// Create a new slot map with the given removal policy
    pub const fn with_policy(policy: RemovalPolicy) -> Self { Self::versioned(policy) }

    /// Create a new slot map with the given removal policy, that can hold
    /// at least `capacity` values without reallocating
    pub fn with_capacity(capacity: usize, policy: RemovalPolicy) -> Self {
        let mut map = Self::with_policy(policy);
        map.reserve(capacity);
        map
    }
}

impl<T, V: Version> SlotMap<T, V> {
    /// An empty slot map that keeps the order of its values on removal
    pub const INIT: Self = Self::versioned(RemovalPolicy::KeepOrder);

    /// Create a new slot map with the given removal policy and the
    /// versioning strategy `V`
    pub const fn versioned(policy: RemovalPolicy) -> Self {
        Self {
            policy,
            values: Vec::new(),
            keys: Vec::new(),
            slots: Vec::new(),
            free: Vec::new(),
            floor: V::EMPTY,
        }
    }

    /// The removal policy this slot map was created with
    pub fn policy(&self) -> RemovalPolicy { self.policy }

    /// Returns true if the slot map is empty
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Returns the number of values in this slot map
    pub fn len(&self) -> usize { self.values.len() }

    /// Returns the capacity of this slot map
    pub fn capacity(&self) -> usize { self.values.capacity() }

    /// Reserves capacity for at least `additional` more values to be inserted
    /// in the given `SlotMap<T>`. After calling reserve, capacity will be greater
    /// than or equal to `self.len() + additional`. Does nothing if capacity is
    /// already sufficient.
    ///
    /// Slots on the free-list will be reused by the next insertions, so only
    /// the remainder is reserved for new slots.
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
        self.keys.reserve(additional);
        self.slots.reserve(additional.saturating_sub(self.free.len()));
    }

    /// Return a handle to a vacant entry allowing for further manipulation.
    ///
    /// This function is useful when creating values that must contain their
    /// id. The returned `VacantEntry` knows the id the value will be stored
    /// under, the slot map isn't changed until it's filled.
    pub fn vacant_entry(&mut self) -> VacantEntry<'_, T, V> {
        let (index, version) = match self.free.last() {
            Some(&index) => (index, self.slots[index].version),
            None => (self.slots.len(), self.floor),
        };

        VacantEntry {
            map: self,
            index,
            version,
        }
    }

    /// Insert a value at the end of the slot map, returning the id assigned to the value.
    ///
    /// The id is reused from the most recently removed value if there is one.
    pub fn push(&mut self, value: T) -> Id<V::Save> { self.vacant_entry().insert(value) }

    /// Construct a value in place at the end of the slot map, the constructor
    /// receives the id that the value will be stored under.
    ///
    /// If `make` panics, the slot map is left unchanged.
    pub fn emplace<F: FnOnce(Id<V::Save>) -> T>(&mut self, make: F) -> Id<V::Save> {
        let entry = self.vacant_entry();
        let value = make(entry.key());
        entry.insert(value)
    }

    /// Find the position of the value owned by `id`
    ///
    /// This is the only validity check in the slot map, everything that takes
    /// an `Id` goes through here.
    pub fn position(&self, id: Id<V::Save>) -> Result<usize, AccessError> {
        let slot = self.slots.get(id.index()).ok_or(AccessError::Unknown)?;

        if slot.version.equals_saved(*id.version()) {
            Ok(slot.position)
        } else {
            Err(AccessError::Stale)
        }
    }

    /// Return true if a value is associated with the given id.
    pub fn contains(&self, id: Id<V::Save>) -> bool { self.position(id).is_ok() }

    /// Return a shared reference to the value associated with the given id.
    pub fn get(&self, id: Id<V::Save>) -> Result<&T, AccessError> {
        let position = self.position(id)?;
        Ok(&self.values[position])
    }

    /// Return a unique reference to the value associated with the given id.
    pub fn get_mut(&mut self, id: Id<V::Save>) -> Result<&mut T, AccessError> {
        let position = self.position(id)?;
        Ok(&mut self.values[position])
    }

    /// Return a shared reference to the value associated with the
    /// given id without performing bounds checking, or checks
    /// if there is a value associated to the id
    ///
    /// # Safety
    ///
    /// `contains` should return true with the given id.
    pub unsafe fn get_unchecked(&self, id: Id<V::Save>) -> &T {
        let position = self.slots.get_unchecked(id.index()).position;
        self.values.get_unchecked(position)
    }

    /// Return a unique reference to the value associated with the
    /// given id without performing bounds checking, or checks
    /// if there is a value associated to the id
    ///
    /// # Safety
    ///
    /// `contains` should return true with the given id.
    pub unsafe fn get_unchecked_mut(&mut self, id: Id<V::Save>) -> &mut T {
        let position = self.slots.get_unchecked(id.index()).position;
        self.values.get_unchecked_mut(position)
    }

    /// Remove and return the value associated with the given id.
    ///
    /// The id is then released and may be associated with future stored values,
    /// if the versioning strategy allows it.
    ///
    /// Panics if the id is not associated with a value.
    #[track_caller]
    pub fn remove(&mut self, id: Id<V::Save>) -> T {
        match self.try_remove(id) {
            Ok(value) => value,
            Err(err) => panic!("Could not remove from a `SlotMap`: {}", err),
        }
    }

    /// Remove and return the value associated with the given id.
    ///
    /// The id is then released and may be associated with future stored values,
    /// if the versioning strategy allows it.
    ///
    /// Returns an error if the id is not associated with a value, the slot map
    /// is not changed in that case.
    pub fn try_remove(&mut self, id: Id<V::Save>) -> Result<T, AccessError> {
        let position = self.position(id)?;

        let value = match self.policy {
            RemovalPolicy::KeepOrder => {
                let value = self.values.remove(position);
                self.keys.remove(position);
                for position in position..self.keys.len() {
                    self.slots[self.keys[position]].position = position;
                }
                value
            }
            RemovalPolicy::SwapRemove => {
                let value = self.values.swap_remove(position);
                self.keys.swap_remove(position);
                if let Some(&moved) = self.keys.get(position) {
                    self.slots[moved].position = position;
                }
                value
            }
        };

        self.release(id.index());
        trace!("removed id {} from position {}", id.index(), position);

        if self.values.is_empty() {
            self.reset();
        }

        Ok(value)
    }

    /// Mark the slot at `index` as vacant, and put it on the free-list
    /// unless its version is exhausted
    fn release(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        match slot.version.mark_empty() {
            Ok(version) => {
                slot.version = version;
                self.free.push(index);
            }
            Err(version) => {
                slot.version = version;
                warn!("retiring slot {}, its versions are exhausted", index);
            }
        }
    }

    /// Drop all of the bookkeeping, the caller removes the values.
    ///
    /// Slots created afterwards start from the latest version any slot has
    /// reached, so ids handed out before the reset stay stale.
    fn reset(&mut self) {
        let floor = self.slots.iter().fold(self.floor, |floor, slot| {
            let version = if slot.version.is_full() {
                slot.version.mark_empty().unwrap_or_else(|version| version)
            } else {
                slot.version
            };
            floor.latest(version)
        });

        self.floor = if floor.is_exhausted() { V::EMPTY } else { floor };

        debug!("resetting bookkeeping of {} slots", self.slots.len());

        self.keys.clear();
        self.slots.clear();
        self.free.clear();
    }

    /// Remove all values, every id handed out so far becomes stale
    pub fn clear(&mut self) {
        debug!("clearing {} values", self.values.len());
        self.values.clear();
        self.reset();
    }

    /// Retain only the elements specified by the predicate.
    ///
    /// If the predicate returns true for a given element,
    /// then the element is kept in the slot map. The kept elements
    /// stay in the same relative order, regardless of the removal policy.
    ///
    /// If the predicate panics, the elements it rejected so far may or may
    /// not have been removed, but the slot map stays consistent.
    pub fn retain<F: FnMut(&mut T) -> bool>(&mut self, mut f: F) {
        let mut kept = 0;

        for read in 0..self.values.len() {
            if !f(&mut self.values[read]) {
                continue
            }

            if read != kept {
                self.values.swap(read, kept);
                self.keys.swap(read, kept);
                self.slots[self.keys[kept]].position = kept;
                self.slots[self.keys[read]].position = read;
            }

            kept += 1;
        }

        for position in kept..self.keys.len() {
            self.release(self.keys[position]);
        }

        self.keys.truncate(kept);
        self.values.truncate(kept);

        if self.values.is_empty() {
            self.reset();
        }
    }

    /// Return a draining iterator that removes all elements from the
    /// slot map and yields the removed items in storage order.
    ///
    /// Note: Elements are removed even if the iterator is only partially
    /// consumed or not consumed at all. Every id handed out so far
    /// becomes stale.
    pub fn drain(&mut self) -> Drain<'_, T> {
        debug!("draining {} values", self.values.len());
        self.reset();
        Drain::new(self.values.drain(..))
    }

    /// The id owning the value at `position`, in storage order
    pub fn id_at(&self, position: usize) -> Option<Id<V::Save>> {
        let &index = self.keys.get(position)?;
        Some(Id::from_raw_parts(index, self.slots[index].version.save()))
    }

    /// The value at `position`, in storage order
    pub fn data_at(&self, position: usize) -> Option<&T> { self.values.get(position) }

    /// The value at `position`, in storage order
    pub fn data_at_mut(&mut self, position: usize) -> Option<&mut T> { self.values.get_mut(position) }

    /// All of the values, in storage order
    pub fn as_slice(&self) -> &[T] { &self.values }

    /// All of the values, in storage order
    ///
    /// Values may be modified in place, but not moved between ids.
    pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.values }

    /// An iterator over the ids of the slot map, in storage order
    pub fn ids(&self) -> Ids<'_, V> { Ids::new(&self.keys, &self.slots) }

    /// An iterator of shared references to values of the slot map,
    /// in storage order
    pub fn iter(&self) -> core::slice::Iter<'_, T> { self.values.iter() }

    /// An iterator of unique references to values of the slot map,
    /// in storage order
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> { self.values.iter_mut() }

    /// An iterator of ids and shared references to values of the slot map,
    /// in storage order, with each id being associated
    /// to the corrosponding value
    pub fn entries(&self) -> Entries<'_, T, V> { Entries::new(self.ids(), self.values.iter()) }

    /// An iterator of ids and unique references to values of the slot map,
    /// in storage order, with each id being associated
    /// to the corrosponding value
    pub fn entries_mut(&mut self) -> EntriesMut<'_, T, V> {
        EntriesMut::new(Ids::new(&self.keys, &self.slots), self.values.iter_mut())
    }
}

impl<'a, T, V: Version> VacantEntry<'a, T, V> {
    /// Get the id associated with the `VacantEntry`, this id can be used
    /// once this `VacantEntry` gets filled
    pub fn key(&self) -> Id<V::Save> { Id::from_raw_parts(self.index, self.version.mark_full().save()) }

    /// Insert an element into the vacant entry
    pub fn insert(self, value: T) -> Id<V::Save> {
        let Self { map, index, version } = self;
        let position = map.values.len();
        let slot = Slot {
            version: version.mark_full(),
            position,
        };

        if index == map.slots.len() {
            map.slots.push(slot);
        } else {
            map.free.pop();
            map.slots[index] = slot;
        }

        map.values.push(value);
        map.keys.push(index);

        trace!("allocated id {} at position {}", index, position);

        Id::from_raw_parts(index, slot.version.save())
    }
}

impl<T, V: Version> Index<Id<V::Save>> for SlotMap<T, V> {
    type Output = T;

    #[track_caller]
    fn index(&self, id: Id<V::Save>) -> &Self::Output {
        match self.get(id) {
            Ok(value) => value,
            Err(err) => panic!("Tried to access a `SlotMap` with an invalid `Id`: {}", err),
        }
    }
}

impl<T, V: Version> IndexMut<Id<V::Save>> for SlotMap<T, V> {
    #[track_caller]
    fn index_mut(&mut self, id: Id<V::Save>) -> &mut Self::Output {
        match self.get_mut(id) {
            Ok(value) => value,
            Err(err) => panic!("Tried to access a `SlotMap` with an invalid `Id`: {}", err),
        }
    }
}

impl<T, V: Version> Extend<T> for SlotMap<T, V> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        iter.for_each(move |value| {
            self.push(value);
        });
    }
}

impl<T, V: Version> core::iter::FromIterator<T> for SlotMap<T, V> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = Self::INIT;
        map.extend(iter);
        map
    }
}

impl<T, V: Version> IntoIterator for SlotMap<T, V> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter { self.values.into_iter() }
}

impl<'a, T, V: Version> IntoIterator for &'a SlotMap<T, V> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T, V: Version> IntoIterator for &'a mut SlotMap<T, V> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

use core::fmt;

impl<T: fmt::Debug, V: Version + fmt::Debug> fmt::Debug for SlotMap<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotMap")
            .field("policy", &self.policy)
            .field("values", &self.values)
            .field("keys", &self.keys)
            .field("slots", &self.slots)
            .field("free", &self.free)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiv_core::version::Unversioned;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn check_invariants<T, V: Version>(map: &SlotMap<T, V>) {
        assert_eq!(map.values.len(), map.keys.len());

        let live = map.slots.iter().filter(|slot| slot.version.is_full()).count();
        assert_eq!(live, map.values.len());

        for (position, &index) in map.keys.iter().enumerate() {
            let slot = map.slots[index];
            assert!(slot.version.is_full());
            assert_eq!(slot.position, position);
        }

        for &index in &map.free {
            assert!(index < map.slots.len());
            assert!(map.slots[index].version.is_empty());
        }

        let mut free = map.free.clone();
        free.sort_unstable();
        free.dedup();
        assert_eq!(free.len(), map.free.len(), "duplicate free-list entry");

        let vacant = map
            .slots
            .iter()
            .filter(|slot| slot.version.is_empty() && !slot.version.is_exhausted())
            .count();
        assert_eq!(vacant, map.free.len());

        if map.values.is_empty() {
            assert!(map.slots.is_empty());
            assert!(map.free.is_empty());
        }
    }

    fn random_operations<V: Version>(policy: RemovalPolicy, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut map = SlotMap::<u64, V>::versioned(policy);
        let mut live = Vec::new();
        let mut dead = Vec::new();

        let first = V::EMPTY.mark_full();
        let second = first.mark_empty().unwrap_or_else(|version| version).mark_full();
        // versioned ids never come back to life
        let versioned = first.save() != second.save();

        for step in 0..2000u64 {
            match rng.gen_range(0..10) {
                0..=4 => {
                    let id = map.push(step);
                    live.push((id, step));
                }
                5..=7 if !live.is_empty() => {
                    let (id, value) = live.swap_remove(rng.gen_range(0..live.len()));
                    assert_eq!(map.remove(id), value);
                    dead.push(id);
                }
                8 => {
                    let id = map.emplace(|id| {
                        assert!(!live.iter().any(|&(live_id, _)| live_id == id));
                        step
                    });
                    live.push((id, step));
                }
                9 if rng.gen_bool(0.05) => {
                    map.clear();
                    dead.extend(live.drain(..).map(|(id, _)| id));
                }
                _ => {}
            }

            check_invariants(&map);
            assert_eq!(map.len(), live.len());

            for &(id, value) in &live {
                assert_eq!(map.get(id), Ok(&value));
                let position = map.position(id).unwrap();
                assert_eq!(map.id_at(position), Some(id));
            }

            if versioned {
                for &id in &dead {
                    assert!(!map.contains(id));
                }
            }
        }
    }

    #[test]
    fn invariants_keep_order() { random_operations::<DefaultVersion>(RemovalPolicy::KeepOrder, 0x5eed); }

    #[test]
    fn invariants_swap_remove() { random_operations::<DefaultVersion>(RemovalPolicy::SwapRemove, 0xf00d); }

    #[test]
    fn invariants_unversioned() {
        random_operations::<Unversioned>(RemovalPolicy::KeepOrder, 1);
        random_operations::<Unversioned>(RemovalPolicy::SwapRemove, 2);
    }

    #[test]
    fn keep_order_preserves_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut map = SlotMap::<u32>::new();
        let ids = (0..100).map(|i| map.push(i)).collect::<Vec<_>>();

        for _ in 0..50 {
            let id = ids[rng.gen_range(0..ids.len())];
            let _ = map.try_remove(id);
        }

        assert!(map.as_slice().windows(2).all(|pair| pair[0] < pair[1]));
        check_invariants(&map);
    }

    #[test]
    fn retain_survives_panicking_predicate() {
        let mut map = SlotMap::<u32>::with_policy(RemovalPolicy::SwapRemove);
        map.extend(0..10);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            map.retain(|&mut value| {
                assert!(value != 6);
                value % 2 == 0
            })
        }));

        assert!(result.is_err());
        check_invariants(&map);
        assert_eq!(map.len(), 10);
        assert_eq!(map.as_slice()[..3], [0, 2, 4]);
    }
}
