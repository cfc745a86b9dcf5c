use anchor_lang::prelude::*;

use crate::errors::MintError;
use crate::events::RandomnessRequestFulfilled;
use crate::ledger::{first_word, load_record, store_record};
use crate::state::{CollectionConfig, RequestRecord, RequesterRecord};

/// Accounts of the coordinator callback.
///
/// The coordinator always passes its config PDA first, as signer, followed by
/// the remaining accounts supplied by the oracle, in this order:
/// `collection config`, `request record`, `requester record`.
#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct FulfillRandomWords<'info> {
    /// Coordinator config PDA, signing through `invoke_signed`.
    #[account(
        constraint = coordinator_signer.key() == config.coordinator_signer @ MintError::Unauthorized,
    )]
    pub coordinator_signer: Signer<'info>,

    #[account(
        seeds = [b"collection"],
        bump = config.bump,
    )]
    pub config: Account<'info, CollectionConfig>,

    /// Handle record. Seeds: `["request", request_id.to_le_bytes()]`.
    /// CHECK: Address checked by seeds; decoded in the handler so a missing
    /// record is reported as `UnknownRequest`.
    #[account(
        mut,
        seeds = [b"request", request_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub request_record: UncheckedAccount<'info>,

    /// Requester record of the handle's requester.
    #[account(
        mut,
        seeds = [b"randomness", requester_record.requester.as_ref()],
        bump = requester_record.bump,
    )]
    pub requester_record: Account<'info, RequesterRecord>,
}

/// Validate a delivery and apply it to the handle and requester records.
///
/// 1. Takes the first delivered word.
/// 2. Rejects unknown handles, foreign requester records and replays.
/// 3. Stores the word on the handle record.
/// 4. Copies it into the requester record when the handle is still the
///    requester's latest; a superseded handle stops at step 3.
///
/// Returns the updated handle record and whether the requester record changed.
pub(crate) fn apply_delivery(
    record: Option<RequestRecord>,
    requester_record: &mut RequesterRecord,
    request_id: u64,
    random_words: &[[u8; 32]],
    slot: u64,
) -> Result<(RequestRecord, bool)> {
    let randomness = first_word(random_words)?;
    let mut record = record.ok_or_else(|| error!(MintError::UnknownRequest))?;
    require_keys_eq!(
        record.requester,
        requester_record.requester,
        MintError::RequesterMismatch
    );

    record.fulfill(randomness)?;
    let applied = requester_record.apply_fulfillment(request_id, randomness, slot);
    Ok((record, applied))
}

/// Record a coordinator delivery and emit [`RandomnessRequestFulfilled`].
pub fn handler(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    let record_info = ctx.accounts.request_record.to_account_info();
    let record = load_record::<RequestRecord>(&record_info, ctx.program_id)?;
    let slot = Clock::get()?.slot;

    let (record, applied) = apply_delivery(
        record,
        &mut ctx.accounts.requester_record,
        request_id,
        &random_words,
        slot,
    )?;
    store_record(&record, &record_info)?;

    emit!(RandomnessRequestFulfilled {
        requester: record.requester,
        request_id,
        randomness: record.randomness,
        superseded: !applied,
    });

    if applied {
        msg!("Randomness fulfilled, request_id={}", request_id);
    } else {
        msg!(
            "Randomness fulfilled for superseded request_id={}, latest is {}",
            request_id,
            ctx.accounts.requester_record.request_id
        );
    }
    Ok(())
}
