use anchor_lang::prelude::*;

/// Error codes for the minting program.
///
/// Anchor encodes these as `6000 + variant index` in on-chain error responses.
#[error_code]
pub enum MintError {
    /// Minting attempted while the sale is paused.
    #[msg("The public sale is not enabled!")]
    SaleNotActive,
    /// Quantity is zero or above `max_mint_per_tx`.
    #[msg("Invalid mint amount!")]
    InvalidMintAmount,
    /// The requester has no fulfilled randomness on record.
    #[msg("Request not fulfilled")]
    RequestNotFulfilled,
    /// The fulfilled randomness was already spent by a previous mint.
    #[msg("Randomness already consumed, request new randomness")]
    RandomnessConsumed,
    /// The wallet would exceed `max_mint_per_wallet`.
    #[msg("Max public mint exceeded!")]
    MaxWalletExceeded,
    /// Offered payment is below `price * quantity`.
    #[msg("Insufficient funds!")]
    InsufficientFunds,
    /// Every slot of the token pool is occupied.
    #[msg("Token pool exhausted")]
    PoolExhausted,
    /// No request record exists for the fulfilled handle.
    #[msg("Unknown randomness request")]
    UnknownRequest,
    /// The handle was already fulfilled once; replays are rejected.
    #[msg("Randomness request already fulfilled")]
    RequestAlreadyFulfilled,
    /// The coordinator delivered an empty word list.
    #[msg("No random words delivered")]
    EmptyRandomWords,
    /// The requester record passed to the callback does not belong to the request.
    #[msg("Requester record does not match request")]
    RequesterMismatch,
    /// Signer does not have permission for this action (wrong admin or coordinator).
    #[msg("Unauthorized")]
    Unauthorized,
    /// A public key argument was the zero address.
    #[msg("Zero address not allowed")]
    ZeroAddressNotAllowed,
    /// Pool size is zero or above `MAX_POOL_SIZE`.
    #[msg("Invalid pool size")]
    InvalidPoolSize,
    /// Mint limits are zero, inverted, or above `MAX_WALLET_TOKENS`.
    #[msg("Invalid mint limits")]
    InvalidMintLimits,
    /// Checked arithmetic overflowed.
    #[msg("Math overflow")]
    MathOverflow,
    /// The supplied request id is not the coordinator's next request id.
    #[msg("Request id does not match coordinator counter")]
    StaleRequestId,
    /// A coordinator account is not owned by the configured coordinator or is malformed.
    #[msg("Invalid coordinator account")]
    InvalidCoordinatorAccount,
    /// The provided treasury account does not match the collection config.
    #[msg("Treasury does not match collection config")]
    TreasuryMismatch,
    /// No token record exists for the queried id.
    #[msg("Token not minted")]
    TokenNotMinted,
    /// The token record accounts passed to `mint` do not match the allocated ids.
    #[msg("Token record accounts do not match allocated ids")]
    TokenAccountMismatch,
}
