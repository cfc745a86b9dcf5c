use anchor_lang::prelude::*;

use crate::errors::MintError;
use crate::events::SaleStateChanged;
use crate::sale::SaleAction;
use crate::state::CollectionConfig;

/// Accounts required to move the sale between `Paused` and `PublicSale`.
#[derive(Accounts)]
pub struct SetSaleState<'info> {
    /// Current admin; must sign.
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [b"collection"],
        bump = config.bump,
        constraint = config.admin == admin.key() @ MintError::Unauthorized,
    )]
    pub config: Account<'info, CollectionConfig>,
}

/// Apply an admin sale action. Emits [`SaleStateChanged`] only when the state
/// actually changes.
pub fn handler(ctx: Context<SetSaleState>, action: SaleAction) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let previous = config.sale_state;
    let current = previous.apply(action);
    if current == previous {
        return Ok(());
    }

    config.sale_state = current;
    emit!(SaleStateChanged { previous, current });
    msg!("Sale state: {:?} -> {:?}", previous, current);
    Ok(())
}
