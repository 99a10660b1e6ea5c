use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PassError {
    /// Indicates the attached payment is below `price * count`.
    InsufficientPayment = 300,
    /// Indicates a batch larger than `MAX_BATCH_SIZE`.
    BatchLimitExceeded = 301,
    /// Indicates a mint of zero tokens.
    InvalidAmount = 302,
    /// Indicates the mint would push the supply past `max_tokens`.
    MaxSupplyExceeded = 303,
    /// Indicates a mint to the contract itself.
    InvalidRecipient = 304,
    /// Indicates minting while the contract is paused.
    EnforcedPause = 305,
    /// Indicates unpausing a contract that is not paused.
    ExpectedPause = 306,
    /// Indicates a negative price or an empty supply at construction.
    InvalidConfiguration = 307,
    /// Indicates overflow when computing the total price.
    MathOverflow = 308,
}
