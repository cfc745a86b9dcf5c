use anchor_lang::prelude::*;

use crate::ledger::load_record;
use crate::state::WalletRecord;

/// Accounts for the wallet view.
#[derive(Accounts)]
pub struct WalletOfOwner<'info> {
    /// CHECK: Any account; only its key is used.
    pub owner: UncheckedAccount<'info>,

    /// CHECK: Address checked by seeds; may not exist yet.
    #[account(
        seeds = [b"wallet", owner.key().as_ref()],
        bump,
    )]
    pub wallet_record: UncheckedAccount<'info>,
}

/// Token ids owned by `owner`, in mint order. Empty for unknown wallets.
pub fn handler(ctx: Context<WalletOfOwner>) -> Result<Vec<u32>> {
    let wallet = load_record::<WalletRecord>(
        &ctx.accounts.wallet_record.to_account_info(),
        ctx.program_id,
    )?;
    Ok(wallet.map(|wallet| wallet.tokens).unwrap_or_default())
}

/// Number of tokens minted by `owner`. Zero for unknown wallets.
pub fn balance_of(ctx: Context<WalletOfOwner>) -> Result<u8> {
    let wallet = load_record::<WalletRecord>(
        &ctx.accounts.wallet_record.to_account_info(),
        ctx.program_id,
    )?;
    Ok(wallet.map(|wallet| wallet.minted).unwrap_or_default())
}
