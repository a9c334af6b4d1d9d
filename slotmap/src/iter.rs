use core::iter::FusedIterator;

use fiv_core::{version::Version, Id};

use crate::dense::Slot;

macro_rules! ids_impl {
    () => {
        fn next(&mut self) -> Option<Self::Item> { self.keys.next().map(|&index| self.id(index)) }

        fn nth(&mut self, n: usize) -> Option<Self::Item> { self.keys.nth(n).map(|&index| self.id(index)) }

        fn size_hint(&self) -> (usize, Option<usize>) { self.keys.size_hint() }
    };
    (rev) => {
        fn next_back(&mut self) -> Option<Self::Item> { self.keys.next_back().map(|&index| self.id(index)) }

        fn nth_back(&mut self, n: usize) -> Option<Self::Item> { self.keys.nth_back(n).map(|&index| self.id(index)) }
    };
}

/// Returned by [`SlotMap::ids`](crate::SlotMap::ids)
pub struct Ids<'a, V: Version> {
    keys: core::slice::Iter<'a, usize>,
    slots: &'a [Slot<V>],
}

impl<'a, V: Version> Ids<'a, V> {
    pub(crate) fn new(keys: &'a [usize], slots: &'a [Slot<V>]) -> Self {
        Self {
            keys: keys.iter(),
            slots,
        }
    }

    fn id(&self, index: usize) -> Id<V::Save> { Id::from_raw_parts(index, self.slots[index].version.save()) }
}

impl<V: Version> Clone for Ids<'_, V> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            slots: self.slots,
        }
    }
}

impl<V: Version> Iterator for Ids<'_, V> {
    type Item = Id<V::Save>;

    ids_impl! {}
}

impl<V: Version> DoubleEndedIterator for Ids<'_, V> {
    ids_impl! { rev }
}

impl<V: Version> ExactSizeIterator for Ids<'_, V> {}
impl<V: Version> FusedIterator for Ids<'_, V> {}

macro_rules! entries_impl {
    ($name:ident $(, $mut:tt)?) => {
        impl<'a, T, V: Version> Iterator for $name<'a, T, V> {
            type Item = (Id<V::Save>, &'a $($mut)? T);

            fn next(&mut self) -> Option<Self::Item> { Some((self.ids.next()?, self.iter.next()?)) }

            fn nth(&mut self, n: usize) -> Option<Self::Item> { Some((self.ids.nth(n)?, self.iter.nth(n)?)) }

            fn size_hint(&self) -> (usize, Option<usize>) { self.iter.size_hint() }
        }

        impl<T, V: Version> DoubleEndedIterator for $name<'_, T, V> {
            fn next_back(&mut self) -> Option<Self::Item> { Some((self.ids.next_back()?, self.iter.next_back()?)) }

            fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
                Some((self.ids.nth_back(n)?, self.iter.nth_back(n)?))
            }
        }

        impl<T, V: Version> ExactSizeIterator for $name<'_, T, V> {}
        impl<T, V: Version> FusedIterator for $name<'_, T, V> {}
    };
}

/// Returned by [`SlotMap::entries`](crate::SlotMap::entries)
pub struct Entries<'a, T, V: Version> {
    ids: Ids<'a, V>,
    iter: core::slice::Iter<'a, T>,
}

impl<'a, T, V: Version> Entries<'a, T, V> {
    pub(crate) fn new(ids: Ids<'a, V>, iter: core::slice::Iter<'a, T>) -> Self { Self { ids, iter } }
}

entries_impl!(Entries);

/// Returned by [`SlotMap::entries_mut`](crate::SlotMap::entries_mut)
pub struct EntriesMut<'a, T, V: Version> {
    ids: Ids<'a, V>,
    iter: core::slice::IterMut<'a, T>,
}

impl<'a, T, V: Version> EntriesMut<'a, T, V> {
    pub(crate) fn new(ids: Ids<'a, V>, iter: core::slice::IterMut<'a, T>) -> Self { Self { ids, iter } }
}

entries_impl!(EntriesMut, mut);

/// Returned by [`SlotMap::drain`](crate::SlotMap::drain)
pub struct Drain<'a, T> {
    inner: std::vec::Drain<'a, T>,
}

impl<'a, T> Drain<'a, T> {
    pub(crate) fn new(inner: std::vec::Drain<'a, T>) -> Self { Self { inner } }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> { self.inner.next() }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> { self.inner.next_back() }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}
impl<T> FusedIterator for Drain<'_, T> {}
