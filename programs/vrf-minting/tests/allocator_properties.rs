//! Property-based tests for token id allocation

use std::collections::HashSet;

use anchor_lang::error::Error;
use proptest::prelude::*;
use vrf_minting::allocator::seed_index;
use vrf_minting::errors::MintError;
use vrf_minting::state::TokenPool;

fn pool_with(size: u32, occupied: &[u32]) -> TokenPool {
    let mut pool = TokenPool::with_size(size, 255);
    for id in occupied {
        if pool.is_exhausted() {
            break;
        }
        let mut seed = [0u8; 32];
        seed[28..].copy_from_slice(&(id % size).to_be_bytes());
        pool.allocate(&seed).unwrap();
    }
    pool
}

// Property test: the start index always lies inside the pool
proptest! {
    #[test]
    fn seed_index_in_range(
        seed in prop::array::uniform32(any::<u8>()),
        size in 1u32..=65_536
    ) {
        prop_assert!(seed_index(&seed, size) < size);
    }
}

// Property test: allocation returns a previously free id and marks it
proptest! {
    #[test]
    fn allocation_claims_a_free_id(
        size in 1u32..512,
        occupied in prop::collection::vec(any::<u32>(), 0..64),
        seed in prop::array::uniform32(any::<u8>())
    ) {
        let mut pool = pool_with(size, &occupied);
        prop_assume!(!pool.is_exhausted());

        let before = pool.allocated;
        let id = pool.allocate(&seed).unwrap();
        prop_assert!(id < size);
        prop_assert!(pool.is_occupied(id));
        prop_assert_eq!(pool.allocated, before + 1);
    }
}

// Property test: probing is a pure function of seed and occupancy
proptest! {
    #[test]
    fn probe_is_deterministic(
        size in 1u32..512,
        occupied in prop::collection::vec(any::<u32>(), 0..64),
        seed in prop::array::uniform32(any::<u8>())
    ) {
        let pool = pool_with(size, &occupied);
        prop_assume!(!pool.is_exhausted());

        let first = pool.probe(&seed).unwrap();
        let second = pool.probe(&seed).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!(!pool.is_occupied(first));

        let mut copy = pool_with(size, &occupied);
        prop_assert_eq!(copy.allocate(&seed).unwrap(), first);
    }
}

// Property test: ids are unique until the pool is exhausted
proptest! {
    #[test]
    fn ids_unique_until_exhausted(
        size in 1u32..256,
        seeds in prop::collection::vec(prop::array::uniform32(any::<u8>()), 256)
    ) {
        let mut pool = TokenPool::with_size(size, 255);
        let mut seen = HashSet::new();

        for seed in seeds.iter().take(size as usize) {
            let id = pool.allocate(seed).unwrap();
            prop_assert!(seen.insert(id), "id {} allocated twice", id);
        }

        prop_assert!(pool.is_exhausted());
        prop_assert_eq!(seen.len(), size as usize);
        prop_assert_eq!(
            pool.allocate(&seeds[0]).unwrap_err(),
            Error::from(MintError::PoolExhausted)
        );
    }
}

// Property test: the scan never skips a free id between start and the result
proptest! {
    #[test]
    fn result_is_first_free_id_from_start(
        size in 1u32..512,
        occupied in prop::collection::vec(any::<u32>(), 0..128),
        seed in prop::array::uniform32(any::<u8>())
    ) {
        let pool = pool_with(size, &occupied);
        prop_assume!(!pool.is_exhausted());

        let start = seed_index(&seed, size);
        let id = pool.probe(&seed).unwrap();
        let distance = (id + size - start) % size;
        for offset in 0..distance {
            prop_assert!(pool.is_occupied((start + offset) % size));
        }
    }
}

fn reference_probe(pool: &TokenPool, seed: &[u8; 32]) -> Option<u32> {
    let start = seed_index(seed, pool.size);
    (0..pool.size)
        .map(|offset| (start + offset) % pool.size)
        .find(|index| !pool.is_occupied(*index))
}

// Property test: skipping full bitmap bytes finds the same id as a bit-by-bit scan
proptest! {
    #[test]
    fn dense_pool_probe_matches_bitwise_scan(
        (size, taken) in (1u32..512).prop_flat_map(|size| {
            (Just(size), prop::collection::vec(prop::bool::weighted(0.95), size as usize))
        }),
        seed in prop::array::uniform32(any::<u8>())
    ) {
        let occupied: Vec<u32> = (0..size).filter(|id| taken[*id as usize]).collect();
        let pool = pool_with(size, &occupied);

        match reference_probe(&pool, &seed) {
            Some(expected) => prop_assert_eq!(pool.probe(&seed).unwrap(), expected),
            None => prop_assert!(pool.probe(&seed).is_err()),
        }
    }
}
