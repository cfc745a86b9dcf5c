use anchor_lang::prelude::*;

use crate::coordinator::coordinator_signer;
use crate::errors::MintError;
use crate::sale::validate_limits;
use crate::state::{CollectionConfig, SaleState, TokenPool, MAX_POOL_SIZE};

/// Collection parameters fixed at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeParams {
    /// Number of token ids (`N`); ids are `0..pool_size`.
    pub pool_size: u32,
    /// Price per token in lamports.
    pub price: u64,
    pub max_mint_per_tx: u8,
    pub max_mint_per_wallet: u8,
    /// Coordinator subscription that pays for randomness requests.
    pub subscription_id: u64,
}

/// Accounts required to initialize the collection.
#[derive(Accounts)]
#[instruction(params: InitializeParams)]
pub struct Initialize<'info> {
    /// The initial admin who pays for account creation.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Receives mint payments.
    /// CHECK: Stored as configuration; validated to be non-zero.
    pub treasury: UncheckedAccount<'info>,

    /// The VRF coordinator program serving this collection.
    /// CHECK: Must be an executable program; stored as configuration.
    #[account(executable)]
    pub coordinator_program: UncheckedAccount<'info>,

    /// Singleton configuration PDA. Seeds: `["collection"]`.
    #[account(
        init,
        payer = admin,
        space = 8 + CollectionConfig::INIT_SPACE,
        seeds = [b"collection"],
        bump,
    )]
    pub config: Account<'info, CollectionConfig>,

    /// Occupancy bitmap PDA. Seeds: `["token-pool"]`.
    #[account(
        init,
        payer = admin,
        space = TokenPool::space(params.pool_size),
        seeds = [b"token-pool"],
        bump,
    )]
    pub token_pool: Account<'info, TokenPool>,

    pub system_program: Program<'info, System>,
}

/// Initialize the collection configuration and an empty token pool.
///
/// The sale starts `Paused`.
pub fn handler(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    require!(
        params.pool_size > 0 && params.pool_size <= MAX_POOL_SIZE,
        MintError::InvalidPoolSize
    );
    validate_limits(params.max_mint_per_tx, params.max_mint_per_wallet)?;
    require!(
        ctx.accounts.treasury.key() != Pubkey::default(),
        MintError::ZeroAddressNotAllowed
    );

    let coordinator_program = ctx.accounts.coordinator_program.key();

    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.treasury = ctx.accounts.treasury.key();
    config.coordinator_program = coordinator_program;
    config.coordinator_signer = coordinator_signer(&coordinator_program);
    config.subscription_id = params.subscription_id;
    config.sale_state = SaleState::Paused;
    config.price = params.price;
    config.max_mint_per_tx = params.max_mint_per_tx;
    config.max_mint_per_wallet = params.max_mint_per_wallet;
    config.bump = ctx.bumps.config;

    ctx.accounts
        .token_pool
        .set_inner(TokenPool::with_size(params.pool_size, ctx.bumps.token_pool));

    msg!(
        "Collection initialized: pool_size={}, price={}, coordinator={}",
        params.pool_size,
        params.price,
        coordinator_program
    );
    Ok(())
}
