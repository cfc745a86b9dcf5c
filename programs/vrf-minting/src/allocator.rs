//! Unique token id allocation over the occupancy bitmap.
//!
//! ```text
//! start = seed mod N            (seed read as a big-endian uint256)
//! probe   start, start+1, ... (mod N) until a free slot is found
//! ```
//!
//! The scan walks consecutive ids and never re-hashes the seed, so the result
//! is a pure function of `(seed, occupancy)`. Runs of occupied ids make the
//! next free id after a run more likely; that clustering is accepted.
//!
//! Atomicity of read-then-mark comes from the runtime: every instruction that
//! allocates holds the pool account writable, so two allocations never
//! observe the same snapshot.

use anchor_lang::prelude::*;

use crate::errors::MintError;
use crate::state::TokenPool;

/// Reduce a 32-byte big-endian unsigned integer modulo `modulus`.
pub fn seed_index(seed: &[u8; 32], modulus: u32) -> u32 {
    debug_assert!(modulus > 0);
    let modulus = u64::from(modulus);
    let rem = seed
        .iter()
        .fold(0u64, |rem, byte| ((rem << 8) | u64::from(*byte)) % modulus);
    rem as u32
}

impl TokenPool {
    /// Empty pool of `size` ids.
    pub fn with_size(size: u32, bump: u8) -> Self {
        Self {
            size,
            allocated: 0,
            bump,
            occupancy: vec![0u8; Self::bitmap_len(size)],
        }
    }

    pub fn is_occupied(&self, index: u32) -> bool {
        let byte = self.occupancy[(index / 8) as usize];
        byte & (1 << (index % 8)) != 0
    }

    fn mark(&mut self, index: u32) {
        self.occupancy[(index / 8) as usize] |= 1 << (index % 8);
        self.allocated += 1;
    }

    pub fn remaining(&self) -> u32 {
        self.size - self.allocated
    }

    pub fn is_exhausted(&self) -> bool {
        self.allocated >= self.size
    }

    /// Index `allocate` would return for `seed`, without marking it.
    ///
    /// Byte-aligned runs of eight occupied ids are skipped in one step. Bits
    /// past `size` are never set, so a full byte lies entirely inside the pool.
    pub fn probe(&self, seed: &[u8; 32]) -> Result<u32> {
        require!(!self.is_exhausted(), MintError::PoolExhausted);

        let mut index = seed_index(seed, self.size);
        let mut scanned = 0u32;
        while scanned < self.size {
            if index % 8 == 0 && self.occupancy[(index / 8) as usize] == u8::MAX {
                index += 8;
                scanned += 8;
            } else if self.is_occupied(index) {
                index += 1;
                scanned += 1;
            } else {
                return Ok(index);
            }
            if index >= self.size {
                index = 0;
            }
        }
        err!(MintError::PoolExhausted)
    }

    /// Claim the first free id at or after `seed mod N`, wrapping to `0`.
    pub fn allocate(&mut self, seed: &[u8; 32]) -> Result<u32> {
        let index = self.probe(seed)?;
        self.mark(index);
        Ok(index)
    }

    /// Claim `quantity` ids with the same seed. Either every id is claimed or
    /// the pool is left untouched.
    pub fn allocate_batch(&mut self, seed: &[u8; 32], quantity: u32) -> Result<Vec<u32>> {
        require!(quantity <= self.remaining(), MintError::PoolExhausted);

        let mut ids = Vec::with_capacity(quantity as usize);
        for _ in 0..quantity {
            ids.push(self.allocate(seed)?);
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL_SIZE: u32 = 3333;

    fn seed_from(value: u64) -> [u8; 32] {
        let mut seed = [0u8; 32];
        seed[24..].copy_from_slice(&value.to_be_bytes());
        seed
    }

    fn occupy(pool: &mut TokenPool, ids: impl IntoIterator<Item = u32>) {
        for id in ids {
            pool.mark(id);
        }
    }

    #[test]
    fn seed_index_reduces_full_width() {
        assert_eq!(seed_index(&seed_from(461), POOL_SIZE), 461);
        assert_eq!(seed_index(&seed_from(3333 + 5), POOL_SIZE), 5);
        // 2^256 - 1 mod 3333
        let max = [0xffu8; 32];
        let expected = (0..32).fold(0u64, |rem, _| (rem * 256 + 255) % 3333) as u32;
        assert_eq!(seed_index(&max, POOL_SIZE), expected);
        // high bytes take part in the reduction
        let mut high = [0u8; 32];
        high[0] = 1;
        assert_ne!(seed_index(&high, POOL_SIZE), 0);
    }

    #[test]
    fn fresh_pool_returns_seed_index() {
        let mut pool = TokenPool::with_size(POOL_SIZE, 255);
        assert_eq!(pool.allocate(&seed_from(461)).unwrap(), 461);
        assert!(pool.is_occupied(461));
        assert_eq!(pool.allocated, 1);
    }

    #[test]
    fn occupied_start_moves_forward() {
        let mut pool = TokenPool::with_size(POOL_SIZE, 255);
        pool.allocate(&seed_from(461)).unwrap();
        assert_eq!(pool.allocate(&seed_from(461)).unwrap(), 462);
    }

    #[test]
    fn probe_is_deterministic_and_does_not_mark() {
        let mut pool = TokenPool::with_size(POOL_SIZE, 255);
        occupy(&mut pool, 100..110);
        let seed = seed_from(100);
        assert_eq!(pool.probe(&seed).unwrap(), 110);
        assert_eq!(pool.probe(&seed).unwrap(), 110);
        assert!(!pool.is_occupied(110));
        assert_eq!(pool.allocated, 10);
    }

    #[test]
    fn last_slot_wraps_to_zero() {
        let mut pool = TokenPool::with_size(POOL_SIZE, 255);
        occupy(&mut pool, [POOL_SIZE - 1]);
        assert_eq!(pool.allocate(&seed_from(u64::from(POOL_SIZE - 1))).unwrap(), 0);
    }

    #[test]
    fn scan_skips_a_run_of_minted_ids() {
        let mut pool = TokenPool::with_size(POOL_SIZE, 255);
        occupy(&mut pool, 461..469);
        assert_eq!(pool.allocate(&seed_from(461)).unwrap(), 469);
    }

    #[test]
    fn scan_wraps_past_the_tail_of_the_pool() {
        let mut pool = TokenPool::with_size(POOL_SIZE, 255);
        occupy(&mut pool, 461..POOL_SIZE);
        assert_eq!(pool.allocate(&seed_from(461)).unwrap(), 0);

        occupy(&mut pool, 1..289);
        assert_eq!(pool.allocate(&seed_from(760)).unwrap(), 289);
    }

    #[test]
    fn single_free_slot_is_found() {
        let mut pool = TokenPool::with_size(POOL_SIZE, 255);
        occupy(&mut pool, 461..POOL_SIZE);
        occupy(&mut pool, 0..460);
        assert_eq!(pool.remaining(), 1);
        assert_eq!(pool.allocate(&seed_from(461)).unwrap(), 460);
        assert!(pool.is_exhausted());
    }

    #[test]
    fn exhausted_pool_fails() {
        let mut pool = TokenPool::with_size(3, 255);
        for seed in 0..3 {
            pool.allocate(&seed_from(seed)).unwrap();
        }
        assert_eq!(pool.allocate(&seed_from(0)), Err(MintError::PoolExhausted.into()));
        assert_eq!(pool.probe(&seed_from(1)), Err(MintError::PoolExhausted.into()));
    }

    #[test]
    fn batch_uses_consecutive_free_ids() {
        let mut pool = TokenPool::with_size(POOL_SIZE, 255);
        occupy(&mut pool, [1360]);
        let ids = pool.allocate_batch(&seed_from(1359), 3).unwrap();
        assert_eq!(ids, vec![1359, 1361, 1362]);
    }

    #[test]
    fn batch_larger_than_remaining_leaves_pool_untouched() {
        let mut pool = TokenPool::with_size(4, 255);
        pool.allocate(&seed_from(0)).unwrap();
        pool.allocate(&seed_from(1)).unwrap();
        let before = pool.occupancy.clone();

        assert_eq!(
            pool.allocate_batch(&seed_from(2), 3),
            Err(MintError::PoolExhausted.into())
        );
        assert_eq!(pool.occupancy, before);
        assert_eq!(pool.allocated, 2);
    }

    #[test]
    fn full_bytes_are_skipped_in_a_large_pool() {
        let size = 65_536;
        let mut pool = TokenPool::with_size(size, 255);
        occupy(&mut pool, (0..size).filter(|id| *id != 3));

        assert_eq!(pool.probe(&seed_from(5)).unwrap(), 3);
        assert_eq!(pool.probe(&seed_from(4)).unwrap(), 3);
        assert_eq!(pool.allocate(&seed_from(2)).unwrap(), 3);
        assert!(pool.is_exhausted());
    }

    #[test]
    fn mid_byte_start_checks_single_bits_before_skipping() {
        let mut pool = TokenPool::with_size(64, 255);
        occupy(&mut pool, 5..40);
        assert_eq!(pool.probe(&seed_from(5)).unwrap(), 40);
        occupy(&mut pool, 40..64);
        assert_eq!(pool.probe(&seed_from(13)).unwrap(), 0);
    }

    #[test]
    fn pool_size_not_multiple_of_eight() {
        let mut pool = TokenPool::with_size(10, 255);
        assert_eq!(pool.occupancy.len(), 2);
        let ids: Vec<u32> = (0..10).map(|_| pool.allocate(&seed_from(9)).unwrap()).collect();
        assert_eq!(ids, vec![9, 0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
