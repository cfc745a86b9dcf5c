//! Per-token ownership records.
//!
//! Token ids are only known once the allocator has run, so `mint` cannot
//! declare their records in its accounts struct. The client predicts the ids
//! (the probe is a pure function of the stored randomness and the pool) and
//! passes one writable account per unit as remaining accounts, in allocation
//! order. Each is checked against its PDA and created here.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::errors::MintError;
use crate::ledger::{load_record, store_record};
use crate::state::TokenRecord;

pub const TOKEN_SEED: &[u8] = b"token";

/// Token record PDA and bump for `token_id`.
pub fn token_record_address(token_id: u32, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TOKEN_SEED, token_id.to_le_bytes().as_ref()], program_id)
}

/// Check the supplied accounts against the allocated ids and return their bumps.
pub fn match_token_accounts(
    token_ids: &[u32],
    accounts: &[Pubkey],
    program_id: &Pubkey,
) -> Result<Vec<u8>> {
    require!(
        token_ids.len() == accounts.len(),
        MintError::TokenAccountMismatch
    );
    token_ids
        .iter()
        .zip(accounts)
        .map(|(token_id, account)| {
            let (address, bump) = token_record_address(*token_id, program_id);
            require_keys_eq!(*account, address, MintError::TokenAccountMismatch);
            Ok(bump)
        })
        .collect()
}

/// Create the token record PDA paid by `payer` and write its owner.
///
/// Mirrors Anchor's `init`: an account that already holds lamports is topped
/// up, allocated and assigned instead of created.
pub fn create_token_record<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system: &AccountInfo<'info>,
    record: &TokenRecord,
) -> Result<()> {
    let id_bytes = record.token_id.to_le_bytes();
    let bump = [record.bump];
    let seeds: &[&[u8]] = &[TOKEN_SEED, id_bytes.as_ref(), bump.as_ref()];
    let signer = &[seeds];

    let space = 8 + TokenRecord::INIT_SPACE;
    let rent = Rent::get()?;
    let current = target.lamports();

    if current == 0 {
        system_program::create_account(
            CpiContext::new_with_signer(
                system.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: target.clone(),
                },
                signer,
            ),
            rent.minimum_balance(space),
            space as u64,
            &crate::ID,
        )?;
    } else {
        let required = rent
            .minimum_balance(space)
            .max(1)
            .saturating_sub(current);
        if required > 0 {
            system_program::transfer(
                CpiContext::new(
                    system.clone(),
                    Transfer {
                        from: payer.clone(),
                        to: target.clone(),
                    },
                ),
                required,
            )?;
        }
        system_program::allocate(
            CpiContext::new_with_signer(
                system.clone(),
                Allocate {
                    account_to_allocate: target.clone(),
                },
                signer,
            ),
            space as u64,
        )?;
        system_program::assign(
            CpiContext::new_with_signer(
                system.clone(),
                Assign {
                    account_to_assign: target.clone(),
                },
                signer,
            ),
            &crate::ID,
        )?;
    }

    store_record(record, target)
}

/// Owner of the token whose record lives in `info`.
pub fn token_owner(info: &AccountInfo, program_id: &Pubkey) -> Result<Pubkey> {
    load_record::<TokenRecord>(info, program_id)?
        .map(|record| record.owner)
        .ok_or_else(|| error!(MintError::TokenNotMinted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_account<R>(
        owner: &Pubkey,
        mut data: Vec<u8>,
        f: impl FnOnce(&AccountInfo) -> R,
    ) -> R {
        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000u64;
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, owner, false, 0);
        f(&info)
    }

    fn encoded(record: &TokenRecord) -> Vec<u8> {
        let mut data = Vec::new();
        record.try_serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn token_addresses_match_in_allocation_order() {
        let ids = [1359, 1361, 1362];
        let accounts: Vec<Pubkey> = ids
            .iter()
            .map(|id| token_record_address(*id, &crate::ID).0)
            .collect();

        let bumps = match_token_accounts(&ids, &accounts, &crate::ID).unwrap();
        assert_eq!(bumps.len(), 3);
        assert_eq!(bumps[1], token_record_address(1361, &crate::ID).1);
    }

    #[test]
    fn swapped_or_missing_token_accounts_are_rejected() {
        let ids = [2557, 2559];
        let first = token_record_address(2557, &crate::ID).0;
        let second = token_record_address(2559, &crate::ID).0;

        assert_eq!(
            match_token_accounts(&ids, &[second, first], &crate::ID),
            Err(MintError::TokenAccountMismatch.into())
        );
        assert_eq!(
            match_token_accounts(&ids, &[first], &crate::ID),
            Err(MintError::TokenAccountMismatch.into())
        );
        assert_eq!(
            match_token_accounts(&ids, &[first, Pubkey::new_unique()], &crate::ID),
            Err(MintError::TokenAccountMismatch.into())
        );
    }

    #[test]
    fn owner_of_minted_token() {
        let owner = Pubkey::new_unique();
        let record = TokenRecord {
            token_id: 1359,
            owner,
            bump: token_record_address(1359, &crate::ID).1,
        };
        let found = with_account(&crate::ID, encoded(&record), |info| {
            token_owner(info, &crate::ID)
        });
        assert_eq!(found.unwrap(), owner);
    }

    #[test]
    fn owner_of_unminted_token_fails() {
        let system = Pubkey::default();
        let found = with_account(&system, Vec::new(), |info| token_owner(info, &crate::ID));
        assert_eq!(found, Err(MintError::TokenNotMinted.into()));
    }
}
