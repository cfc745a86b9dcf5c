use anchor_lang::prelude::*;

use crate::ledger::{load_record, RandomnessRequestState};
use crate::state::RequesterRecord;

/// Accounts for the randomness state view.
#[derive(Accounts)]
pub struct GetRandomnessRequestState<'info> {
    /// CHECK: Any account; only its key is used.
    pub requester: UncheckedAccount<'info>,

    /// CHECK: Address checked by seeds; may not exist yet.
    #[account(
        seeds = [b"randomness", requester.key().as_ref()],
        bump,
    )]
    pub requester_record: UncheckedAccount<'info>,
}

/// Report `(fulfilled, exists, value)` for a requester's latest request.
pub fn handler(ctx: Context<GetRandomnessRequestState>) -> Result<RandomnessRequestState> {
    let record = load_record::<RequesterRecord>(
        &ctx.accounts.requester_record.to_account_info(),
        ctx.program_id,
    )?;
    Ok(record
        .map(|record| record.state())
        .unwrap_or_else(RandomnessRequestState::missing))
}
