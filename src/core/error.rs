use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Unknown token: {0}")]
    TokenNotFound(String),

    #[error("Invalid pool parameter: {0}")]
    InvalidPoolParameter(String),

    #[error("Invalid tick range: lower {lower} is above upper {upper}")]
    InvalidRange { lower: i64, upper: i64 },

    #[error("Invalid slippage {0}%: must be at least 0 and below 100")]
    InvalidSlippage(Decimal),

    #[error("Invalid withdraw request: {0}")]
    InvalidWithdrawRequest(String),

    #[error(
        "No initialized pool at fee={fee_percent}% tick_spacing={tick_spacing_percent}%; \
         try another fee/tick-spacing tier (e.g. 0.05/0.1, 0.3/0.6, 1/2)"
    )]
    PoolNotFound {
        fee_percent: Decimal,
        tick_spacing_percent: Decimal,
    },

    #[error("No usable quote for this trade: {0}")]
    InsufficientQuote(String),

    #[error("Transaction reverted on-chain: {0}")]
    TransactionFailed(String),

    #[error("Math overflow")]
    MathOverflow,

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("RPC error: {0}")]
    RpcError(String),
}

/// Coarse error taxonomy, mainly used to decide retryability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller mistake (bad percentage, malformed bounds). Never retried.
    Configuration,
    /// Unknown token or no pool for the key. Structural, never retried.
    Resolution,
    /// Dry-run quote failed or returned no route. Structural.
    Quote,
    /// Submitted transaction reverted (includes slippage violations,
    /// which the client can only bound in advance, not detect).
    Execution,
    /// Network/node failure. Opaque; safe for the caller to retry.
    Transport,
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::InvalidPoolParameter(_)
            | SdkError::InvalidRange { .. }
            | SdkError::InvalidSlippage(_)
            | SdkError::InvalidWithdrawRequest(_)
            | SdkError::MathOverflow
            | SdkError::SerializationError(_) => ErrorKind::Configuration,
            SdkError::TokenNotFound(_) | SdkError::PoolNotFound { .. } => ErrorKind::Resolution,
            SdkError::InsufficientQuote(_) => ErrorKind::Quote,
            SdkError::TransactionFailed(_) => ErrorKind::Execution,
            SdkError::RpcError(_) => ErrorKind::Transport,
        }
    }

    /// Only transport failures are retryable; everything else is structural
    /// and will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
