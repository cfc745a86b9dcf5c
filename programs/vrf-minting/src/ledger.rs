//! Randomness request ledger.
//!
//! Correlates outbound coordinator requests with their asynchronous delivery.
//! Each handle has a [`RequestRecord`]; each requester has one
//! [`RequesterRecord`] pointing at its latest handle. Minting only ever reads
//! the requester record, so a fulfillment that arrives for a superseded handle
//! is stored on the handle and otherwise ignored.

use anchor_lang::prelude::*;

use crate::errors::MintError;
use crate::state::{RequestRecord, RequesterRecord};

/// Read-only projection returned by `get_randomness_request_state`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct RandomnessRequestState {
    pub fulfilled: bool,
    pub exists: bool,
    pub value: [u8; 32],
}

impl RandomnessRequestState {
    /// State of a requester that never asked for randomness.
    pub fn missing() -> Self {
        Self::default()
    }
}

impl RequesterRecord {
    /// Point the record at a freshly issued handle, dropping any previous
    /// request whether pending, fulfilled or consumed.
    pub fn begin(&mut self, requester: Pubkey, request_id: u64, slot: u64, bump: u8) {
        self.requester = requester;
        self.request_id = request_id;
        self.fulfilled = false;
        self.consumed = false;
        self.randomness = [0u8; 32];
        self.request_slot = slot;
        self.fulfilled_slot = 0;
        self.bump = bump;
    }

    /// Copy a delivery into the record if it belongs to the latest handle.
    ///
    /// Returns `false` for superseded handles, leaving the record untouched.
    pub fn apply_fulfillment(&mut self, request_id: u64, randomness: [u8; 32], slot: u64) -> bool {
        if request_id != self.request_id {
            return false;
        }
        self.fulfilled = true;
        self.randomness = randomness;
        self.fulfilled_slot = slot;
        true
    }

    pub fn state(&self) -> RandomnessRequestState {
        RandomnessRequestState {
            fulfilled: self.fulfilled,
            exists: true,
            value: self.randomness,
        }
    }

    /// Check that the record holds unspent randomness and return it.
    pub fn seed(&self) -> Result<[u8; 32]> {
        require!(self.fulfilled, MintError::RequestNotFulfilled);
        require!(!self.consumed, MintError::RandomnessConsumed);
        Ok(self.randomness)
    }

    /// Spend the randomness. A new request is needed before the next mint.
    pub fn consume(&mut self) -> Result<[u8; 32]> {
        let seed = self.seed()?;
        self.consumed = true;
        Ok(seed)
    }
}

impl RequestRecord {
    pub fn open(&mut self, request_id: u64, requester: Pubkey, bump: u8) {
        self.request_id = request_id;
        self.requester = requester;
        self.fulfilled = false;
        self.randomness = [0u8; 32];
        self.bump = bump;
    }

    /// Record the delivered value. A second delivery for the same handle is
    /// rejected so oracle replays surface instead of silently rewriting state.
    pub fn fulfill(&mut self, randomness: [u8; 32]) -> Result<()> {
        require!(!self.fulfilled, MintError::RequestAlreadyFulfilled);
        self.fulfilled = true;
        self.randomness = randomness;
        Ok(())
    }

    /// Only the requester may close a handle record, and only once it was
    /// fulfilled. A pending handle stays open so the coordinator can still
    /// deliver to it.
    pub fn check_closable(&self, requester: &Pubkey) -> Result<()> {
        require_keys_eq!(self.requester, *requester, MintError::Unauthorized);
        require!(self.fulfilled, MintError::RequestNotFulfilled);
        Ok(())
    }
}

/// Deserialize a program-owned record, or `None` if the PDA was never created.
///
/// Ledger PDAs are taken as unchecked accounts so that a missing record can be
/// reported with a ledger error instead of `AccountNotInitialized`.
pub fn load_record<T: AccountDeserialize>(
    info: &AccountInfo,
    program_id: &Pubkey,
) -> Result<Option<T>> {
    if info.owner != program_id || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..]).map(Some)
}

/// Write a record loaded with [`load_record`] back into its account.
pub fn store_record<T: AccountSerialize>(record: &T, info: &AccountInfo) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    record.try_serialize(&mut writer)
}

/// First word of a coordinator delivery; only one word is ever requested.
pub fn first_word(random_words: &[[u8; 32]]) -> Result<[u8; 32]> {
    random_words
        .first()
        .copied()
        .ok_or_else(|| error!(MintError::EmptyRandomWords))
}
