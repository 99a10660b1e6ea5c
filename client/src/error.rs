//! Client error taxonomy.

/// Everything a client flow can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// A contract precondition rejected the call.
    #[error("transaction rejected: {reason} (code {code})")]
    Rejected { code: u32, reason: &'static str },
    /// Transport, RPC or wallet failure.
    #[error("provider error: {0}")]
    Provider(String),
    #[error("no wallet connected")]
    NoWallet,
    /// The faucet only exists on the local network.
    #[error("faucet is not available on this network")]
    FaucetUnavailable,
    #[error("payment amount overflows")]
    Overflow,
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Builds the rejection for a contract error code.
    pub fn rejected(code: u32) -> Self {
        ClientError::Rejected { code, reason: revert_reason(code) }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ClientError::Rejected { .. })
    }
}

/// Human readable reason for a contract error code.
pub fn revert_reason(code: u32) -> &'static str {
    match code {
        // nft-base
        200 => "ERC721: invalid token ID",
        201 => "ERC721: transfer from incorrect owner",
        202 => "ERC721: caller is not token owner or approved",
        203 => "ERC721: approve caller is not token owner or approved for all",
        204 => "ERC721: approval already expired",
        206 => "ERC721Enumerable: owner index out of bounds",
        210 => "ERC721: token already minted",
        211 => "ERC721Metadata: base URI too long",
        212 => "ERC721Metadata: metadata not set",
        // pass
        300 => "ETH amount is not sufficient",
        301 => "Can only mint up to 5 tokens",
        302 => "Must mint at least 1 token",
        303 => "Max supply reached",
        304 => "ERC721: mint to the zero address",
        305 => "Pausable: paused",
        306 => "Pausable: not paused",
        307 | 403 => "Contract is not configured",
        // halloween
        400 => "Pass not owned by sender",
        401 => "Pass already used",
        402 => "Pass not claimed",
        205 | 308 => "Arithmetic overflow",
        _ => "Transaction reverted",
    }
}
