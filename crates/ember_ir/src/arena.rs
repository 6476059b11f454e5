//! ID-indexed storage for netlist entities.
//!
//! The [`Arena`] hands out stable IDs in allocation order. Slots can be
//! vacated with [`Arena::remove`]; a vacated ID is never reused, so stale
//! IDs held elsewhere fail lookups through [`Arena::try_get`] instead of
//! aliasing a newer entity.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Trait for opaque ID types used as arena keys.
pub trait ArenaId: Copy {
    /// Creates an ID from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// A dense, ID-indexed container with removable slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    slots: Vec<Option<T>>,
    live: usize,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            _marker: PhantomData,
        }
    }

    /// ID that the next [`alloc`](Self::alloc) will return.
    pub fn next_id(&self) -> I {
        I::from_raw(self.slots.len() as u32)
    }

    /// Allocates a new item and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = self.next_id();
        self.slots.push(Some(item));
        self.live += 1;
        id
    }

    /// Returns the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds or was removed.
    pub fn get(&self, id: I) -> &T {
        match self.try_get(id) {
            Some(item) => item,
            None => panic!("arena slot {} is vacant", id.as_raw()),
        }
    }

    /// Returns the item with the given ID, or `None` if it was removed.
    pub fn try_get(&self, id: I) -> Option<&T> {
        self.slots.get(id.as_raw() as usize)?.as_ref()
    }

    /// Returns a mutable reference to the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds or was removed.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        match self.try_get_mut(id) {
            Some(item) => item,
            None => panic!("arena slot {} is vacant", id.as_raw()),
        }
    }

    /// Mutable variant of [`try_get`](Self::try_get).
    pub fn try_get_mut(&mut self, id: I) -> Option<&mut T> {
        self.slots.get_mut(id.as_raw() as usize)?.as_mut()
    }

    /// Returns `true` if `id` names a live item.
    pub fn contains(&self, id: I) -> bool {
        self.try_get(id).is_some()
    }

    /// Vacates the slot, returning the item that occupied it.
    pub fn remove(&mut self, id: I) -> Option<T> {
        let item = self.slots.get_mut(id.as_raw() as usize)?.take();
        if item.is_some() {
            self.live -= 1;
        }
        item
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no live items remain.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterates over live `(ID, &T)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|item| (I::from_raw(i as u32), item)))
    }

    /// Iterates over live items in allocation order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        self.get_mut(id)
    }
}
