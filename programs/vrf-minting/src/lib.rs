use anchor_lang::prelude::*;

pub mod allocator;
pub mod coordinator;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod ownership;
pub mod sale;
pub mod state;

use instructions::*;
use ledger::RandomnessRequestState;
use sale::SaleAction;

declare_id!("HD7pVAxMXRTmV3DmieogQn7SgS5EEXEUmz7yG1aoWESS");

/// Random token id minting backed by a VRF coordinator.
///
/// Token ids come from a fixed pool `[0, N)`. Each id is derived from
/// randomness the minter requested beforehand, so nobody can pick which id
/// they receive.
///
/// ## Mint lifecycle
///
/// 1. **Request**: the minter calls `request_randomness`; the program CPIs
///    `request_random_words` into the coordinator and records the handle.
/// 2. **Fulfill**: the coordinator calls back `fulfill_random_words` with the
///    VRF output; the program stores it for the minter.
/// 3. **Mint**: the minter calls `mint`; the sale checks run, one id per unit
///    is allocated by linear probing from `randomness mod N`, and the
///    randomness is marked consumed. A token record per id stores its owner.
#[program]
pub mod vrf_minting {
    use super::*;

    /// Create the collection configuration and the empty token pool.
    ///
    /// Must be called exactly once. The sale starts paused.
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Update mint limits, treasury or admin (admin-only).
    ///
    /// All parameters are optional; only provided fields are updated.
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        new_max_mint_per_tx: Option<u8>,
        new_max_mint_per_wallet: Option<u8>,
        new_treasury: Option<Pubkey>,
        new_admin: Option<Pubkey>,
    ) -> Result<()> {
        instructions::update_config::handler(
            ctx,
            new_max_mint_per_tx,
            new_max_mint_per_wallet,
            new_treasury,
            new_admin,
        )
    }

    /// Open the public sale (admin-only).
    pub fn set_public_mint_enabled(ctx: Context<SetSaleState>) -> Result<()> {
        instructions::set_sale_state::handler(ctx, SaleAction::EnablePublicSale)
    }

    /// Pause the sale (admin-only).
    pub fn set_sale_paused(ctx: Context<SetSaleState>) -> Result<()> {
        instructions::set_sale_state::handler(ctx, SaleAction::Pause)
    }

    /// Request randomness for the signer's next mint.
    ///
    /// `request_id` is the coordinator's current request counter. Any earlier
    /// request of the signer is replaced.
    pub fn request_randomness(ctx: Context<RequestRandomness>, request_id: u64) -> Result<()> {
        instructions::request_randomness::handler(ctx, request_id)
    }

    /// Coordinator callback delivering the random words for `request_id`.
    ///
    /// Only callable through the coordinator, whose config PDA signs.
    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::fulfill_random_words::handler(ctx, request_id, random_words)
    }

    /// Mint `quantity` tokens, paying `payment` lamports.
    ///
    /// Returns the allocated token ids.
    /// Remaining accounts: the token record PDA of every id the mint will
    /// allocate, in allocation order.
    pub fn mint<'info>(
        ctx: Context<'_, '_, 'info, 'info, MintTokens<'info>>,
        quantity: u8,
        payment: u64,
    ) -> Result<Vec<u32>> {
        instructions::mint::handler(ctx, quantity, payment)
    }

    /// Close a fulfilled handle record, refunding its rent to the requester.
    pub fn close_request_record(ctx: Context<CloseRequestRecord>, request_id: u64) -> Result<()> {
        instructions::close_request_record::handler(ctx, request_id)
    }

    /// View: `(fulfilled, exists, value)` of a requester's latest request.
    pub fn get_randomness_request_state(
        ctx: Context<GetRandomnessRequestState>,
    ) -> Result<RandomnessRequestState> {
        instructions::get_randomness_request_state::handler(ctx)
    }

    /// View: token ids owned by a wallet, in mint order.
    pub fn wallet_of_owner(ctx: Context<WalletOfOwner>) -> Result<Vec<u32>> {
        instructions::wallet_of_owner::handler(ctx)
    }

    /// View: number of tokens minted by a wallet.
    pub fn balance_of(ctx: Context<WalletOfOwner>) -> Result<u8> {
        instructions::wallet_of_owner::balance_of(ctx)
    }

    /// View: owner of a minted token id.
    pub fn owner_of(ctx: Context<OwnerOf>, token_id: u32) -> Result<Pubkey> {
        instructions::owner_of::handler(ctx, token_id)
    }

    /// View: number of tokens minted so far.
    pub fn total_supply(ctx: Context<TotalSupply>) -> Result<u32> {
        instructions::owner_of::total_supply(ctx)
    }
}
