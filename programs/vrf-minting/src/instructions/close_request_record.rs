use anchor_lang::prelude::*;

use crate::events::RequestRecordClosed;
use crate::state::RequestRecord;

/// Accounts required to close a fulfilled handle record and reclaim rent.
///
/// Handle ids come from the coordinator's monotonic counter, so a closed
/// record can never be re-created by `request_randomness`. A late replay of
/// the handle then fails as an unknown request.
#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct CloseRequestRecord<'info> {
    /// The original requester; receives reclaimed rent.
    #[account(mut)]
    pub requester: Signer<'info>,

    /// Anchor's `close` zeroes the account and refunds `requester`.
    #[account(
        mut,
        seeds = [b"request", request_id.to_le_bytes().as_ref()],
        bump = request_record.bump,
        close = requester,
    )]
    pub request_record: Account<'info, RequestRecord>,
}

/// Close a fulfilled handle record. Emits [`RequestRecordClosed`].
pub fn handler(ctx: Context<CloseRequestRecord>, request_id: u64) -> Result<()> {
    let requester = ctx.accounts.requester.key();
    ctx.accounts.request_record.check_closable(&requester)?;

    emit!(RequestRecordClosed {
        requester,
        request_id,
    });

    Ok(())
}
