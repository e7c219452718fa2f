//! Generic free-list recycler for visual entities.

use std::collections::VecDeque;

use crate::error::PoolExhausted;

/// A FIFO bag of retired values.
///
/// [`Pool::get`] removes and returns the oldest entry, or fails with
/// [`PoolExhausted`] when empty — there is no auto-growth. [`Pool::add`]
/// performs no dedup or ownership check: adding the same value twice without
/// an intervening `get` corrupts the active/pool partition and is the
/// caller's responsibility to avoid. FIFO order is an implementation detail,
/// not part of the contract.
#[derive(Debug, Default)]
pub struct Pool<T> {
    items: VecDeque<T>,
}

impl<T> Pool<T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Creates an empty pool with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Removes and returns a retired value.
    pub fn get(&mut self) -> Result<T, PoolExhausted> {
        self.items.pop_front().ok_or(PoolExhausted)
    }

    /// Accepts a retired or newly constructed value.
    pub fn add(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Number of values currently resting in the pool.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the pool has nothing to hand out.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_from_empty_pool_fails() {
        let mut pool: Pool<u32> = Pool::new();
        assert_eq!(pool.get(), Err(PoolExhausted));
    }

    #[test]
    fn test_get_removes_the_value() {
        let mut pool = Pool::new();
        pool.add(7u32);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(), Ok(7));
        assert!(pool.is_empty());
        assert_eq!(pool.get(), Err(PoolExhausted));
    }

    #[test]
    fn test_add_after_get_recycles() {
        let mut pool = Pool::with_capacity(2);
        pool.add(1u32);
        pool.add(2u32);
        let first = pool.get().unwrap();
        pool.add(first);
        assert_eq!(pool.len(), 2);
        // Everything handed out comes back exactly once.
        let mut drained = vec![pool.get().unwrap(), pool.get().unwrap()];
        drained.sort_unstable();
        assert_eq!(drained, vec![1, 2]);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_fifo_hand_out_order() {
        // Not a contract guarantee, but the implementation is FIFO and the
        // streaming tests rely on knowing which entity comes out first.
        let mut pool = Pool::new();
        pool.add("a");
        pool.add("b");
        pool.add("c");
        assert_eq!(pool.get(), Ok("a"));
        assert_eq!(pool.get(), Ok("b"));
        pool.add("a");
        assert_eq!(pool.get(), Ok("c"));
        assert_eq!(pool.get(), Ok("a"));
    }
}
