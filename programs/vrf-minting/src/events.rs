use anchor_lang::prelude::*;

use crate::state::SaleState;

/// Emitted when a requester asks the coordinator for new randomness.
///
/// `request_id` is the coordinator handle the oracle will fulfill.
#[event]
pub struct RandomnessRequestSent {
    pub requester: Pubkey,
    pub request_id: u64,
}

/// Emitted when the coordinator delivers randomness for a handle.
///
/// `superseded` is set when the requester issued a newer request in the
/// meantime; the value is then recorded on the handle only.
#[event]
pub struct RandomnessRequestFulfilled {
    pub requester: Pubkey,
    pub request_id: u64,
    pub randomness: [u8; 32],
    pub superseded: bool,
}

/// Emitted when a requester closes a fulfilled handle record and reclaims its rent.
#[event]
pub struct RequestRecordClosed {
    pub requester: Pubkey,
    pub request_id: u64,
}

/// Emitted after a successful mint.
#[event]
pub struct TokensMinted {
    pub owner: Pubkey,
    pub request_id: u64,
    pub token_ids: Vec<u32>,
    pub paid: u64,
}

/// Emitted when the admin moves the sale to a different state.
#[event]
pub struct SaleStateChanged {
    pub previous: SaleState,
    pub current: SaleState,
}

/// Emitted when the admin updates the collection configuration.
#[event]
pub struct ConfigUpdated {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub max_mint_per_tx: u8,
    pub max_mint_per_wallet: u8,
}
