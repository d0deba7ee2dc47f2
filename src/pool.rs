//! Index-based arena with bulk reset
//!
//! A [`Pool`] hands out records addressed by [`PoolId`] handles. Records are
//! recycled rather than dropped on [`Pool::release_all`], so the vectors inside
//! candidates and phrases keep their capacity from one extraction to the next.
//! Every reset bumps the pool generation; handles issued before a reset no
//! longer resolve.

/// A record that can be returned to its default state without freeing
/// its allocations.
pub trait Recycle: Default {
    fn recycle(&mut self);
}

/// Handle to a record allocated from a [`Pool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId {
    slot: u32,
    generation: u32,
}

impl PoolId {
    /// Slot index within the pool's backing store
    pub fn slot(self) -> usize {
        self.slot as usize
    }
}

/// Growable backing store plus a cursor that `release_all` rewinds.
#[derive(Debug)]
pub struct Pool<T> {
    items: Vec<T>,
    cursor: usize,
    generation: u32,
}

impl<T: Recycle> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Recycle> Pool<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            generation: 0,
        }
    }

    /// Create a pool with `capacity` records allocated up front
    pub fn with_capacity(capacity: usize) -> Self {
        let mut items = Vec::with_capacity(capacity);
        items.resize_with(capacity, T::default);
        Self {
            items,
            cursor: 0,
            generation: 0,
        }
    }

    /// Allocate a record in its default state, valid until the next
    /// [`release_all`](Self::release_all).
    pub fn alloc(&mut self) -> (PoolId, &mut T) {
        let id = self.next_id();
        let slot = id.slot();
        if slot < self.items.len() {
            self.items[slot].recycle();
        } else {
            self.items.push(T::default());
        }
        self.cursor += 1;
        (id, &mut self.items[slot])
    }

    /// Allocate a record while keeping shared access to an existing one.
    ///
    /// Returns `None` if `parent` is stale. A fresh slot always lies past every
    /// live slot, which is what makes the split borrow possible.
    pub fn alloc_derived(&mut self, parent: PoolId) -> Option<(&T, PoolId, &mut T)> {
        if !self.is_live(parent) {
            return None;
        }
        let (id, _) = self.alloc();
        let (head, tail) = self.items.split_at_mut(id.slot());
        Some((&head[parent.slot()], id, &mut tail[0]))
    }

    /// Resolve a handle; `None` for handles from before the last reset.
    pub fn get(&self, id: PoolId) -> Option<&T> {
        if self.is_live(id) {
            self.items.get(id.slot())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: PoolId) -> Option<&mut T> {
        if self.is_live(id) {
            self.items.get_mut(id.slot())
        } else {
            None
        }
    }

    /// Invalidate every record handed out so far.
    pub fn release_all(&mut self) {
        self.cursor = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Iterate over live records in allocation order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items[..self.cursor].iter()
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Number of records ever materialized (live or recyclable)
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    fn is_live(&self, id: PoolId) -> bool {
        id.generation == self.generation && id.slot() < self.cursor
    }

    fn next_id(&self) -> PoolId {
        PoolId {
            slot: self.cursor as u32,
            generation: self.generation,
        }
    }
}
