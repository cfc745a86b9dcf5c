use anchor_lang::prelude::*;

/// Largest pool the program accepts; the occupancy bitmap must fit in a
/// single account created through CPI (10 KiB).
pub const MAX_POOL_SIZE: u32 = 65_536;

/// Upper bound for `max_mint_per_wallet`, sizing the wallet token list.
pub const MAX_WALLET_TOKENS: usize = 32;

/// Sale gate. Only the admin moves between states.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Default, Debug)]
pub enum SaleState {
    #[default]
    Paused,
    PublicSale,
}

/// Collection configuration, stored as a singleton PDA.
///
/// Seeds: `["collection"]`
///
/// Only the `admin` may change the sale state or the mint limits. The
/// `coordinator_signer` is the coordinator's config PDA, which signs every
/// `fulfill_random_words` callback.
#[account]
#[derive(InitSpace)]
pub struct CollectionConfig {
    /// Privileged key for sale state and configuration changes.
    pub admin: Pubkey,
    /// Receives mint payments.
    pub treasury: Pubkey,
    /// VRF coordinator program that serves randomness requests.
    pub coordinator_program: Pubkey,
    /// Coordinator config PDA (`["coordinator-config"]`) that signs callbacks.
    pub coordinator_signer: Pubkey,
    /// Coordinator subscription paying for this collection's requests.
    pub subscription_id: u64,
    /// Current sale state.
    pub sale_state: SaleState,
    /// Price per token in lamports.
    pub price: u64,
    /// Maximum tokens per `mint` call.
    pub max_mint_per_tx: u8,
    /// Maximum tokens a single wallet may ever mint.
    pub max_mint_per_wallet: u8,
    /// PDA bump seed cached for efficient re-derivation.
    pub bump: u8,
}

/// Occupancy of the token id pool `[0, size)`.
///
/// Seeds: `["token-pool"]`
///
/// Bit `i % 8` of `occupancy[i / 8]` is set once id `i` is minted and is
/// never cleared.
#[account]
pub struct TokenPool {
    /// Number of ids in the pool (`N`).
    pub size: u32,
    /// Number of ids allocated so far.
    pub allocated: u32,
    /// PDA bump seed cached for efficient re-derivation.
    pub bump: u8,
    /// Occupancy bitmap, `ceil(size / 8)` bytes.
    pub occupancy: Vec<u8>,
}

impl TokenPool {
    /// Account space (discriminator included) for a pool of `size` ids.
    pub fn space(size: u32) -> usize {
        8 + 4 + 4 + 1 + 4 + Self::bitmap_len(size)
    }

    pub fn bitmap_len(size: u32) -> usize {
        size.div_ceil(8) as usize
    }
}

/// Latest randomness request of a requester.
///
/// Seeds: `["randomness", requester]`
///
/// Lifecycle: requested -> fulfilled -> consumed by a mint. A new request
/// resets the record regardless of where it was (last request wins).
#[account]
#[derive(InitSpace)]
pub struct RequesterRecord {
    /// The account that requested randomness.
    pub requester: Pubkey,
    /// Coordinator handle of the latest request.
    pub request_id: u64,
    /// Whether the latest request has been fulfilled.
    pub fulfilled: bool,
    /// Whether the fulfilled value has been spent by a mint.
    pub consumed: bool,
    /// Delivered randomness, zero until fulfilled.
    pub randomness: [u8; 32],
    /// Slot at which the latest request was sent.
    pub request_slot: u64,
    /// Slot at which the latest request was fulfilled.
    pub fulfilled_slot: u64,
    /// PDA bump seed cached for efficient re-derivation.
    pub bump: u8,
}

/// Delivery record of a single coordinator handle.
///
/// Seeds: `["request", request_id.to_le_bytes()]`
#[account]
#[derive(InitSpace, Debug)]
pub struct RequestRecord {
    /// Coordinator handle.
    pub request_id: u64,
    /// The account that issued the request.
    pub requester: Pubkey,
    /// Whether the coordinator delivered randomness for this handle.
    pub fulfilled: bool,
    /// Delivered randomness, zero until fulfilled.
    pub randomness: [u8; 32],
    /// PDA bump seed cached for efficient re-derivation.
    pub bump: u8,
}

/// Tokens owned by a wallet and its mint count.
///
/// Seeds: `["wallet", owner]`
#[account]
#[derive(InitSpace)]
pub struct WalletRecord {
    pub owner: Pubkey,
    /// Total tokens minted by this wallet.
    pub minted: u8,
    /// Minted token ids in mint order.
    #[max_len(MAX_WALLET_TOKENS)]
    pub tokens: Vec<u32>,
    /// PDA bump seed cached for efficient re-derivation.
    pub bump: u8,
}

/// Owner of a single minted token id.
///
/// Seeds: `["token", token_id.to_le_bytes()]`
///
/// Created by `mint` for every allocated id and never closed, so its
/// existence marks the id as minted.
#[account]
#[derive(InitSpace)]
pub struct TokenRecord {
    pub token_id: u32,
    pub owner: Pubkey,
    /// PDA bump seed cached for efficient re-derivation.
    pub bump: u8,
}
