//! Token metadata resolution.

use crate::prelude::*;

use async_trait::async_trait;

use crate::client::base::TokenRegistry;
use crate::core::{ResolvedToken, TokenDescriptor};

/// In-memory registry seeded with the well-known tokens of a deployment.
/// Resolution is symbol- or address-based; anything outside the table
/// fails with `TokenNotFound` (the registry is the source of decimals,
/// so an unknown address cannot be resolved either).
pub struct StaticTokenRegistry {
    tokens: Vec<ResolvedToken>,
}

impl StaticTokenRegistry {
    pub fn new(tokens: Vec<ResolvedToken>) -> Self {
        StaticTokenRegistry { tokens }
    }

    /// Well-known mainnet tokens.
    pub fn mainnet() -> Self {
        let entry = |symbol: &str, hex: &str, decimals: u8| ResolvedToken {
            address: Address::from_hex(hex).expect("well-known token address is a valid felt"),
            symbol: symbol.to_string(),
            decimals,
        };
        StaticTokenRegistry::new(vec![
            entry(
                "ETH",
                "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7",
                18,
            ),
            entry(
                "USDC",
                "0x053c91253bc9682c04929ca02ed00b3e423f6710d2ee7e0d5ebb06f3ecf368a8",
                6,
            ),
            entry(
                "USDT",
                "0x068f5c6a61780768455de69077e07e89787839bf8166decfbf92b645209c0fb8",
                6,
            ),
            entry(
                "DAI",
                "0x00da114221cb83fa859dbdb4c44beeaa0bb37c7537ad5ae66fe5e0efd20e6eb3",
                18,
            ),
            entry(
                "WBTC",
                "0x03fe2b97c1fd336e750087d68b9b867997fd64a2661ff3ca5a7c771641e8e7ac",
                8,
            ),
        ])
    }

    pub fn tokens(&self) -> &[ResolvedToken] {
        &self.tokens
    }
}

#[async_trait]
impl TokenRegistry for StaticTokenRegistry {
    async fn resolve(&self, descriptor: &TokenDescriptor) -> SdkResult<ResolvedToken> {
        match descriptor {
            TokenDescriptor::Symbol(symbol) => self
                .tokens
                .iter()
                .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
                .cloned()
                .ok_or_else(|| SdkError::TokenNotFound(symbol.clone())),
            TokenDescriptor::Address(address) => self
                .tokens
                .iter()
                .find(|t| t.address == *address)
                .cloned()
                .ok_or_else(|| {
                    SdkError::TokenNotFound(format!("no metadata for address {address}"))
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_symbols_case_insensitively() {
        let registry = StaticTokenRegistry::mainnet();
        let eth = registry
            .resolve(&TokenDescriptor::Symbol("eth".into()))
            .await
            .unwrap();
        assert_eq!(eth.symbol, "ETH");
        assert_eq!(eth.decimals, 18);
    }

    #[tokio::test]
    async fn resolves_known_addresses() {
        let registry = StaticTokenRegistry::mainnet();
        let usdc = registry
            .resolve(&TokenDescriptor::Symbol("USDC".into()))
            .await
            .unwrap();
        let again = registry
            .resolve(&TokenDescriptor::Address(usdc.address))
            .await
            .unwrap();
        assert_eq!(usdc, again);
    }

    #[tokio::test]
    async fn unknown_tokens_fail_resolution() {
        let registry = StaticTokenRegistry::mainnet();
        let err = registry
            .resolve(&TokenDescriptor::Symbol("NOPE".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::TokenNotFound(_)));
    }
}
