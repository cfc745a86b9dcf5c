//! Boundary with the VRF coordinator program.
//!
//! The coordinator is a separate program; this module only knows its
//! instruction and account layouts:
//!
//! - outbound CPI `request_random_words(num_words, seed, callback_compute_limit)`
//! - inbound callback `fulfill_random_words(request_id, random_words)`, signed
//!   by the coordinator config PDA `["coordinator-config"]`
//! - the `CoordinatorConfig` account, read for the next request id

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::program::invoke;
use sha2::{Digest, Sha256};

use crate::errors::MintError;

/// Seed of the coordinator's config PDA, which signs fulfillment callbacks.
pub const COORDINATOR_CONFIG_SEED: &[u8] = b"coordinator-config";

/// Every mint consumes exactly one word.
pub const NUM_WORDS: u32 = 1;

/// Compute budget the coordinator reserves for our callback.
pub const CALLBACK_COMPUTE_LIMIT: u32 = 200_000;

/// Anchor instruction discriminator: `sha256("global:<name>")[..8]`.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(format!("global:{name}"));
    let hash = hasher.finalize();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&hash[..8]);
    disc
}

/// Anchor account discriminator: `sha256("account:<Name>")[..8]`.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(format!("account:{name}"));
    let hash = hasher.finalize();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&hash[..8]);
    disc
}

/// Address that signs coordinator callbacks.
pub fn coordinator_signer(coordinator_program: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[COORDINATOR_CONFIG_SEED], coordinator_program).0
}

/// Subscription PDA of the coordinator: `["subscription", id_le]`.
pub fn subscription_address(coordinator_program: &Pubkey, subscription_id: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[b"subscription", subscription_id.to_le_bytes().as_ref()],
        coordinator_program,
    )
    .0
}

/// Caller entropy mixed into the coordinator's VRF input.
///
/// ```text
/// seed = SHA256(requester || request_id_le || slot_le)
/// ```
pub fn request_seed(requester: &Pubkey, request_id: u64, slot: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(requester.as_ref());
    hasher.update(request_id.to_le_bytes());
    hasher.update(slot.to_le_bytes());
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&hasher.finalize());
    seed
}

/// Borsh view of the coordinator's `CoordinatorConfig` account.
#[derive(AnchorDeserialize, Clone, Debug)]
pub struct CoordinatorConfigView {
    pub admin: Pubkey,
    pub authority: Pubkey,
    pub fee_per_word: u64,
    pub max_num_words: u32,
    /// Handle the next request will receive.
    pub request_counter: u64,
    pub subscription_counter: u64,
    pub bump: u8,
}

impl CoordinatorConfigView {
    /// Decode raw account data, discriminator included.
    pub fn decode(data: &[u8]) -> Result<Self> {
        require!(
            data.len() >= 8 && data[..8] == account_discriminator("CoordinatorConfig"),
            MintError::InvalidCoordinatorAccount
        );
        Self::deserialize(&mut &data[8..]).map_err(|_| error!(MintError::InvalidCoordinatorAccount))
    }

    /// Load the config account, checking it is owned by `coordinator_program`.
    pub fn load(info: &AccountInfo, coordinator_program: &Pubkey) -> Result<Self> {
        require_keys_eq!(
            *info.owner,
            *coordinator_program,
            MintError::InvalidCoordinatorAccount
        );
        let data = info.try_borrow_data()?;
        Self::decode(&data)
    }
}

/// Instruction data of `request_random_words`.
pub fn request_random_words_data(seed: &[u8; 32]) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + 4 + 32 + 4);
    data.extend_from_slice(&instruction_discriminator("request_random_words"));
    data.extend_from_slice(&NUM_WORDS.to_le_bytes());
    data.extend_from_slice(seed);
    data.extend_from_slice(&CALLBACK_COMPUTE_LIMIT.to_le_bytes());
    data
}

/// Accounts of the coordinator's `request_random_words`, in its order.
pub struct RandomWordsRequest<'info> {
    pub requester: AccountInfo<'info>,
    pub config: AccountInfo<'info>,
    pub subscription: AccountInfo<'info>,
    pub consumer_registration: AccountInfo<'info>,
    pub consumer_program: AccountInfo<'info>,
    pub request: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
}

impl<'info> RandomWordsRequest<'info> {
    fn metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(*self.requester.key, true),
            AccountMeta::new(*self.config.key, false),
            AccountMeta::new(*self.subscription.key, false),
            AccountMeta::new_readonly(*self.consumer_registration.key, false),
            AccountMeta::new_readonly(*self.consumer_program.key, false),
            AccountMeta::new(*self.request.key, false),
            AccountMeta::new_readonly(*self.system_program.key, false),
        ]
    }

    /// CPI into the coordinator. The requester's signature carries over from
    /// the outer transaction.
    pub fn invoke(&self, coordinator_program: &AccountInfo<'info>, seed: &[u8; 32]) -> Result<()> {
        let ix = Instruction {
            program_id: *coordinator_program.key,
            accounts: self.metas(),
            data: request_random_words_data(seed),
        };
        invoke(
            &ix,
            &[
                self.requester.clone(),
                self.config.clone(),
                self.subscription.clone(),
                self.consumer_registration.clone(),
                self.consumer_program.clone(),
                self.request.clone(),
                self.system_program.clone(),
                coordinator_program.clone(),
            ],
        )
        .map_err(Into::into)
    }
}
