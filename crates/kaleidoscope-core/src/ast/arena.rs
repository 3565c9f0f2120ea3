// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Append-only node storage.
//!
//! An arena is a vector that only grows. Nodes are addressed by their `u32`
//! position, which stays valid for the life of the arena because nothing is
//! ever removed or reordered.

use std::ops::Index;

use tracing::trace;

/// An append-only vector of nodes of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends `item` and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` items.
    #[inline]
    pub fn alloc(&mut self, item: T) -> u32 {
        let index = self.items.len();
        assert!(index < u32::MAX as usize, "arena index space exhausted");
        self.items.push(item);
        trace!(index, node = std::any::type_name::<T>(), "arena alloc");
        index as u32
    }

    /// Returns the item at `index`, if allocated.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&T> {
        self.items.get(index as usize)
    }

    /// Number of allocated items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over items together with their indices, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.items.iter().enumerate().map(|(i, item)| (i as u32, item))
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<u32> for Arena<T> {
    type Output = T;

    fn index(&self, index: u32) -> &T {
        &self.items[index as usize]
    }
}
