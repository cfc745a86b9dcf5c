use anchor_lang::prelude::*;

use crate::ownership::token_owner;
use crate::state::TokenPool;

/// Accounts for the token owner view.
#[derive(Accounts)]
#[instruction(token_id: u32)]
pub struct OwnerOf<'info> {
    /// CHECK: Address checked by seeds; missing for unminted ids.
    #[account(
        seeds = [b"token", token_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub token_record: UncheckedAccount<'info>,
}

/// Owner of `token_id`; fails `TokenNotMinted` for ids never allocated.
pub fn handler(ctx: Context<OwnerOf>, _token_id: u32) -> Result<Pubkey> {
    token_owner(&ctx.accounts.token_record.to_account_info(), ctx.program_id)
}

/// Accounts for the supply view.
#[derive(Accounts)]
pub struct TotalSupply<'info> {
    #[account(
        seeds = [b"token-pool"],
        bump = token_pool.bump,
    )]
    pub token_pool: Account<'info, TokenPool>,
}

/// Number of tokens minted so far.
pub fn total_supply(ctx: Context<TotalSupply>) -> Result<u32> {
    Ok(ctx.accounts.token_pool.allocated)
}
