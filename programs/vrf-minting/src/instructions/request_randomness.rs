use anchor_lang::prelude::*;

use crate::coordinator::{request_seed, subscription_address, CoordinatorConfigView, RandomWordsRequest};
use crate::errors::MintError;
use crate::events::RandomnessRequestSent;
use crate::state::{CollectionConfig, RequestRecord, RequesterRecord};

/// Accounts required to request randomness for a future mint.
///
/// `request_id` must equal the coordinator's current `request_counter`; it is
/// the handle the coordinator will assign and seeds the handle record PDA.
#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct RequestRandomness<'info> {
    /// The future minter; pays rent for the ledger records and the coordinator request.
    #[account(mut)]
    pub requester: Signer<'info>,

    #[account(
        seeds = [b"collection"],
        bump = config.bump,
    )]
    pub config: Account<'info, CollectionConfig>,

    /// Latest request of this requester. Seeds: `["randomness", requester]`.
    #[account(
        init_if_needed,
        payer = requester,
        space = 8 + RequesterRecord::INIT_SPACE,
        seeds = [b"randomness", requester.key().as_ref()],
        bump,
    )]
    pub requester_record: Account<'info, RequesterRecord>,

    /// Handle record. Seeds: `["request", request_id.to_le_bytes()]`.
    #[account(
        init,
        payer = requester,
        space = 8 + RequestRecord::INIT_SPACE,
        seeds = [b"request", request_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub request_record: Account<'info, RequestRecord>,

    /// CHECK: Validated against `config.coordinator_program`.
    #[account(
        address = config.coordinator_program @ MintError::InvalidCoordinatorAccount,
    )]
    pub coordinator_program: UncheckedAccount<'info>,

    /// Coordinator config (mutated by the coordinator to bump its counter).
    /// CHECK: Owner and discriminator checked when decoded.
    #[account(mut)]
    pub coordinator_config: UncheckedAccount<'info>,

    /// Coordinator subscription paying the request fee.
    /// CHECK: Address checked against `config.subscription_id`; contents validated by the coordinator.
    #[account(mut)]
    pub subscription: UncheckedAccount<'info>,

    /// Registration of this program under the subscription.
    /// CHECK: Validated by the coordinator during CPI.
    pub consumer_registration: UncheckedAccount<'info>,

    /// This program, registered as the coordinator consumer.
    /// CHECK: Address constraint.
    #[account(address = crate::ID)]
    pub minting_program: UncheckedAccount<'info>,

    /// Coordinator request PDA (created by the coordinator CPI).
    /// CHECK: Created and validated by the coordinator during CPI.
    #[account(mut)]
    pub coordinator_request: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Request randomness from the coordinator.
///
/// 1. Checks `request_id` against the coordinator's counter.
/// 2. CPIs `request_random_words` for one word.
/// 3. Points the requester record at the new handle, dropping any previous request.
/// 4. Opens the handle record and emits [`RandomnessRequestSent`].
pub fn handler(ctx: Context<RequestRandomness>, request_id: u64) -> Result<()> {
    let coordinator_program = ctx.accounts.config.coordinator_program;

    let coordinator = CoordinatorConfigView::load(
        &ctx.accounts.coordinator_config.to_account_info(),
        &coordinator_program,
    )?;
    require!(
        coordinator.request_counter == request_id,
        MintError::StaleRequestId
    );
    require_keys_eq!(
        ctx.accounts.subscription.key(),
        subscription_address(&coordinator_program, ctx.accounts.config.subscription_id),
        MintError::InvalidCoordinatorAccount
    );

    let requester = ctx.accounts.requester.key();
    let slot = Clock::get()?.slot;
    let seed = request_seed(&requester, request_id, slot);

    RandomWordsRequest {
        requester: ctx.accounts.requester.to_account_info(),
        config: ctx.accounts.coordinator_config.to_account_info(),
        subscription: ctx.accounts.subscription.to_account_info(),
        consumer_registration: ctx.accounts.consumer_registration.to_account_info(),
        consumer_program: ctx.accounts.minting_program.to_account_info(),
        request: ctx.accounts.coordinator_request.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
    }
    .invoke(&ctx.accounts.coordinator_program.to_account_info(), &seed)?;

    let superseded = ctx.accounts.requester_record.request_id;
    let had_request = ctx.accounts.requester_record.requester != Pubkey::default();

    ctx.accounts
        .requester_record
        .begin(requester, request_id, slot, ctx.bumps.requester_record);
    ctx.accounts
        .request_record
        .open(request_id, requester, ctx.bumps.request_record);

    emit!(RandomnessRequestSent {
        requester,
        request_id,
    });

    if had_request {
        msg!(
            "Randomness requested, request_id={} (replaces {})",
            request_id,
            superseded
        );
    } else {
        msg!("Randomness requested, request_id={}", request_id);
    }
    Ok(())
}
