//! Sale controller: sale state machine and per-mint policy checks.

use anchor_lang::prelude::*;

use crate::errors::MintError;
use crate::state::{CollectionConfig, SaleState, MAX_WALLET_TOKENS};

/// Admin actions on the sale state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SaleAction {
    EnablePublicSale,
    Pause,
}

impl SaleState {
    /// Transition table. Both states accept both actions; repeating the
    /// action for the current state is a no-op.
    pub fn apply(self, action: SaleAction) -> SaleState {
        match (self, action) {
            (SaleState::Paused, SaleAction::EnablePublicSale) => SaleState::PublicSale,
            (SaleState::PublicSale, SaleAction::EnablePublicSale) => SaleState::PublicSale,
            (SaleState::Paused, SaleAction::Pause) => SaleState::Paused,
            (SaleState::PublicSale, SaleAction::Pause) => SaleState::Paused,
        }
    }

    pub fn is_open(self) -> bool {
        self == SaleState::PublicSale
    }
}

/// Validate a per-tx / per-wallet limit pair.
pub fn validate_limits(max_mint_per_tx: u8, max_mint_per_wallet: u8) -> Result<()> {
    require!(max_mint_per_tx > 0, MintError::InvalidMintLimits);
    require!(
        max_mint_per_tx <= max_mint_per_wallet,
        MintError::InvalidMintLimits
    );
    require!(
        usize::from(max_mint_per_wallet) <= MAX_WALLET_TOKENS,
        MintError::InvalidMintLimits
    );
    Ok(())
}

impl CollectionConfig {
    /// Price of `quantity` tokens in lamports.
    pub fn cost(&self, quantity: u8) -> Result<u64> {
        self.price
            .checked_mul(u64::from(quantity))
            .ok_or_else(|| error!(MintError::MathOverflow))
    }

    /// Sale-side checks of a mint, in the order they are reported.
    ///
    /// `seed` is the outcome of the ledger lookup so that randomness errors
    /// rank after the sale and quantity checks.
    pub fn check_mint(
        &self,
        quantity: u8,
        seed: Result<[u8; 32]>,
        wallet_minted: u8,
        payment: u64,
    ) -> Result<[u8; 32]> {
        require!(self.sale_state.is_open(), MintError::SaleNotActive);
        require!(
            quantity >= 1 && quantity <= self.max_mint_per_tx,
            MintError::InvalidMintAmount
        );
        let seed = seed?;
        let minted = u16::from(wallet_minted) + u16::from(quantity);
        require!(
            minted <= u16::from(self.max_mint_per_wallet),
            MintError::MaxWalletExceeded
        );
        require!(payment >= self.cost(quantity)?, MintError::InsufficientFunds);
        Ok(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE: u64 = 69_000_000;

    fn config(sale_state: SaleState) -> CollectionConfig {
        CollectionConfig {
            admin: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            coordinator_program: Pubkey::new_unique(),
            coordinator_signer: Pubkey::new_unique(),
            subscription_id: 0,
            sale_state,
            price: PRICE,
            max_mint_per_tx: 2,
            max_mint_per_wallet: 5,
            bump: 255,
        }
    }

    #[test]
    fn transition_table() {
        assert_eq!(SaleState::default(), SaleState::Paused);
        assert_eq!(SaleState::Paused.apply(SaleAction::EnablePublicSale), SaleState::PublicSale);
        assert_eq!(SaleState::PublicSale.apply(SaleAction::Pause), SaleState::Paused);
        assert_eq!(SaleState::Paused.apply(SaleAction::Pause), SaleState::Paused);
        assert_eq!(
            SaleState::PublicSale.apply(SaleAction::EnablePublicSale),
            SaleState::PublicSale
        );
    }

    #[test]
    fn paused_sale_rejects_mint() {
        let err = config(SaleState::Paused)
            .check_mint(1, Ok([1u8; 32]), 0, PRICE)
            .unwrap_err();
        assert_eq!(err, MintError::SaleNotActive.into());
    }

    #[test]
    fn quantity_must_be_within_per_tx_limit() {
        let config = config(SaleState::PublicSale);
        assert_eq!(
            config.check_mint(0, Ok([1u8; 32]), 0, 0),
            Err(MintError::InvalidMintAmount.into())
        );
        assert_eq!(
            config.check_mint(3, Ok([1u8; 32]), 0, PRICE * 3),
            Err(MintError::InvalidMintAmount.into())
        );
    }

    #[test]
    fn amount_is_checked_before_randomness() {
        let config = config(SaleState::PublicSale);
        let missing = Err(MintError::RequestNotFulfilled.into());
        assert_eq!(
            config.check_mint(0, missing, 0, 0),
            Err(MintError::InvalidMintAmount.into())
        );
        let missing = Err(MintError::RequestNotFulfilled.into());
        assert_eq!(
            config.check_mint(1, missing, 0, PRICE),
            Err(MintError::RequestNotFulfilled.into())
        );
    }

    #[test]
    fn wallet_cap_is_enforced() {
        let config = config(SaleState::PublicSale);
        assert!(config.check_mint(1, Ok([1u8; 32]), 4, PRICE).is_ok());
        assert_eq!(
            config.check_mint(1, Ok([1u8; 32]), 5, PRICE),
            Err(MintError::MaxWalletExceeded.into())
        );
        assert_eq!(
            config.check_mint(2, Ok([1u8; 32]), 4, PRICE * 2),
            Err(MintError::MaxWalletExceeded.into())
        );
    }

    #[test]
    fn payment_must_cover_price() {
        let config = config(SaleState::PublicSale);
        assert_eq!(
            config.check_mint(1, Ok([1u8; 32]), 0, 0),
            Err(MintError::InsufficientFunds.into())
        );
        assert_eq!(
            config.check_mint(2, Ok([1u8; 32]), 0, PRICE * 2 - 1),
            Err(MintError::InsufficientFunds.into())
        );
        assert_eq!(config.check_mint(2, Ok([7u8; 32]), 0, PRICE * 3).unwrap(), [7u8; 32]);
    }

    #[test]
    fn cost_overflow_is_reported() {
        let mut config = config(SaleState::PublicSale);
        config.price = u64::MAX;
        assert_eq!(
            config.check_mint(2, Ok([1u8; 32]), 0, u64::MAX),
            Err(MintError::MathOverflow.into())
        );
    }

    #[test]
    fn limits_validation() {
        assert!(validate_limits(1, 5).is_ok());
        assert!(validate_limits(0, 5).is_err());
        assert!(validate_limits(6, 5).is_err());
        assert!(validate_limits(1, (MAX_WALLET_TOKENS + 1) as u8).is_err());
    }
}
