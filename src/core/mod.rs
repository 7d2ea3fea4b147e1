pub mod config;
pub mod error;
pub mod types;

pub use config::ProtocolConfig;
pub use error::{ErrorKind, SdkError, SdkResult};
pub use types::{
    Address, Bounds, Call, CallBatch, Confirmation, Exact, PoolKey, PoolPrice, Quote,
    ResolvedToken, SwapAmount, Tick, TokenDescriptor, TxHash, FIELD_PRIME,
};
