use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::errors::MintError;
use crate::events::TokensMinted;
use crate::ledger::{load_record, store_record};
use crate::ownership::{create_token_record, match_token_accounts};
use crate::state::{CollectionConfig, RequesterRecord, TokenPool, TokenRecord, WalletRecord};

/// Accounts required to mint tokens with previously fulfilled randomness.
///
/// The token pool is writable, so the runtime serializes every mint against
/// it and the scan-then-mark allocation cannot interleave.
///
/// Remaining accounts: one writable token record PDA
/// (`["token", token_id.to_le_bytes()]`) per unit, in allocation order.
#[derive(Accounts)]
pub struct MintTokens<'info> {
    /// The minter; pays the mint price and rent for the wallet record.
    #[account(mut)]
    pub minter: Signer<'info>,

    #[account(
        seeds = [b"collection"],
        bump = config.bump,
    )]
    pub config: Account<'info, CollectionConfig>,

    #[account(
        mut,
        seeds = [b"token-pool"],
        bump = token_pool.bump,
    )]
    pub token_pool: Account<'info, TokenPool>,

    /// Minter's randomness record. Seeds: `["randomness", minter]`.
    /// CHECK: Address checked by seeds; decoded in the handler so a minter
    /// without a record is reported as `RequestNotFulfilled`.
    #[account(
        mut,
        seeds = [b"randomness", minter.key().as_ref()],
        bump,
    )]
    pub requester_record: UncheckedAccount<'info>,

    /// Minter's wallet record. Seeds: `["wallet", minter]`.
    #[account(
        init_if_needed,
        payer = minter,
        space = 8 + WalletRecord::INIT_SPACE,
        seeds = [b"wallet", minter.key().as_ref()],
        bump,
    )]
    pub wallet_record: Account<'info, WalletRecord>,

    /// Fee recipient; must match `config.treasury`.
    /// CHECK: Validated by the constraint below.
    #[account(
        mut,
        constraint = treasury.key() == config.treasury @ MintError::TreasuryMismatch,
    )]
    pub treasury: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Validate, allocate and record a mint.
///
/// Every check runs before the first mutation, so on error the pool, the
/// randomness record and the wallet record are unchanged.
pub(crate) fn execute(
    config: &CollectionConfig,
    pool: &mut TokenPool,
    record: Option<&mut RequesterRecord>,
    wallet: &mut WalletRecord,
    quantity: u8,
    payment: u64,
) -> Result<Vec<u32>> {
    let seed = match record.as_deref() {
        Some(record) => record.seed(),
        None => Err(error!(MintError::RequestNotFulfilled)),
    };
    let seed = config.check_mint(quantity, seed, wallet.minted, payment)?;
    let minted = wallet
        .minted
        .checked_add(quantity)
        .ok_or(MintError::MathOverflow)?;

    let token_ids = pool.allocate_batch(&seed, u32::from(quantity))?;

    if let Some(record) = record {
        record.consume()?;
    }
    wallet.minted = minted;
    wallet.tokens.extend_from_slice(&token_ids);
    Ok(token_ids)
}

/// Mint `quantity` tokens.
///
/// 1. Loads the minter's randomness and runs the sale checks.
/// 2. Allocates one id per unit with the same seed and records ownership.
/// 3. Marks the randomness consumed; the next mint needs a new request.
/// 4. Creates a token record per allocated id.
/// 5. Transfers `payment` lamports to the treasury (skipped if zero).
/// 6. Emits [`TokensMinted`] and returns the allocated ids.
pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, MintTokens<'info>>,
    quantity: u8,
    payment: u64,
) -> Result<Vec<u32>> {
    let minter = ctx.accounts.minter.key();

    let record_info = ctx.accounts.requester_record.to_account_info();
    let mut record = load_record::<RequesterRecord>(&record_info, ctx.program_id)?;

    let wallet = &mut ctx.accounts.wallet_record;
    if wallet.owner == Pubkey::default() {
        wallet.owner = minter;
        wallet.bump = ctx.bumps.wallet_record;
    }

    let token_ids = execute(
        &ctx.accounts.config,
        &mut ctx.accounts.token_pool,
        record.as_mut(),
        wallet,
        quantity,
        payment,
    )?;

    // execute only succeeds with a record present
    let request_id = match &record {
        Some(record) => {
            store_record(record, &record_info)?;
            record.request_id
        }
        None => return err!(MintError::RequestNotFulfilled),
    };

    let token_accounts: Vec<Pubkey> = ctx.remaining_accounts.iter().map(|a| a.key()).collect();
    let bumps = match_token_accounts(&token_ids, &token_accounts, ctx.program_id)?;
    let payer = ctx.accounts.minter.to_account_info();
    let system = ctx.accounts.system_program.to_account_info();
    for ((token_id, info), bump) in token_ids.iter().zip(ctx.remaining_accounts).zip(bumps) {
        let token = TokenRecord {
            token_id: *token_id,
            owner: minter,
            bump,
        };
        create_token_record(&payer, info, &system, &token)?;
    }

    if payment > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.minter.to_account_info(),
                    to: ctx.accounts.treasury.to_account_info(),
                },
            ),
            payment,
        )?;
    }

    emit!(TokensMinted {
        owner: minter,
        request_id,
        token_ids: token_ids.clone(),
        paid: payment,
    });

    msg!(
        "Minted {:?} (request_id={}, remaining={})",
        token_ids,
        request_id,
        ctx.accounts.token_pool.remaining()
    );
    Ok(token_ids)
}
