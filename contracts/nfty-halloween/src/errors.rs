use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum HalloweenError {
    /// Indicates the claimant is not the current owner of the pass.
    PassNotOwnedBySender = 400,
    /// Indicates the pass already backs a Halloween token.
    PassAlreadyUsed = 401,
    /// Indicates a lookup of a pass that was never claimed.
    PassNotClaimed = 402,
    /// Indicates missing constructor state.
    InvalidConfiguration = 403,
}
