use anchor_lang::prelude::*;

use crate::errors::MintError;
use crate::events::ConfigUpdated;
use crate::sale::validate_limits;
use crate::state::CollectionConfig;

/// Accounts required to update the collection configuration.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Current admin; must sign.
    pub admin: Signer<'info>,

    /// Collection configuration PDA to update.
    #[account(
        mut,
        seeds = [b"collection"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ MintError::Unauthorized,
    )]
    pub config: Account<'info, CollectionConfig>,
}

/// Update one or more collection configuration fields.
///
/// The price is fixed at initialization and cannot be changed here.
pub fn handler(
    ctx: Context<UpdateConfig>,
    new_max_mint_per_tx: Option<u8>,
    new_max_mint_per_wallet: Option<u8>,
    new_treasury: Option<Pubkey>,
    new_admin: Option<Pubkey>,
) -> Result<()> {
    let config = &mut ctx.accounts.config;

    let max_mint_per_tx = new_max_mint_per_tx.unwrap_or(config.max_mint_per_tx);
    let max_mint_per_wallet = new_max_mint_per_wallet.unwrap_or(config.max_mint_per_wallet);
    validate_limits(max_mint_per_tx, max_mint_per_wallet)?;
    config.max_mint_per_tx = max_mint_per_tx;
    config.max_mint_per_wallet = max_mint_per_wallet;

    if let Some(treasury) = new_treasury {
        require!(
            treasury != Pubkey::default(),
            MintError::ZeroAddressNotAllowed
        );
        config.treasury = treasury;
    }
    if let Some(admin) = new_admin {
        require!(
            admin != Pubkey::default(),
            MintError::ZeroAddressNotAllowed
        );
        config.admin = admin;
    }

    emit!(ConfigUpdated {
        admin: config.admin,
        treasury: config.treasury,
        max_mint_per_tx: config.max_mint_per_tx,
        max_mint_per_wallet: config.max_mint_per_wallet,
    });

    Ok(())
}
