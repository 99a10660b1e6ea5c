use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum NonFungibleTokenError {
    /// Indicates a non-existent `token_id`.
    NonExistentToken = 200,
    /// Indicates an error related to the ownership over a particular token.
    /// Used in transfers.
    IncorrectOwner = 201,
    /// Indicates a failure with the `operator`s approval. Used in transfers.
    InsufficientApproval = 202,
    /// Indicates a failure with the `approver` of a token to be approved. Used
    /// in approvals.
    InvalidApprover = 203,
    /// Indicates an invalid value for `live_until_ledger` when setting
    /// approvals.
    InvalidLiveUntilLedger = 204,
    /// Indicates overflow when adding two values
    MathOverflow = 205,
    /// Indicates an `index` past the end of an owner's token list.
    OwnerIndexOutOfBounds = 206,
    /// Indicates the token was already minted.
    TokenAlreadyMinted = 210,
    /// Indicates the length of the base URI exceeds the maximum allowed.
    BaseUriMaxLenExceeded = 211,
    /// Indicates metadata was read before the constructor stored it.
    UnsetMetadata = 212,
}
