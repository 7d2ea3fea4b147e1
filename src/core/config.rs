//! Per-deployment protocol configuration.
//!
//! Contract addresses, sqrt-ratio bounds and event selectors differ between
//! deployments, so they live in an injected table instead of module
//! constants. Components receive a `ProtocolConfig` and never assume a
//! particular network.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::core::Address;

/// Everything the SDK needs to know about one deployment of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Human-readable deployment name ("mainnet", "testnet", ...).
    pub deployment: String,
    /// Config schema revision, bumped when fields are added or re-keyed.
    pub revision: u32,
    /// The core AMM contract holding pool state.
    pub core: Address,
    /// The positions periphery contract (also the position NFT).
    pub positions: Address,
    /// The swap router contract.
    pub router: Address,
    /// Smallest representable sqrt ratio; computed limits clamp here.
    pub min_sqrt_ratio: U256,
    /// Largest representable sqrt ratio; computed limits clamp here.
    pub max_sqrt_ratio: U256,
    /// Largest valid tick magnitude.
    pub max_tick: u32,
    /// Largest valid tick spacing, in ticks.
    pub max_tick_spacing: u32,
    /// Selector of the NFT transfer event used to recover minted position
    /// ids from confirmations.
    pub transfer_event_selector: U256,
}

// sqrt-ratio bounds for the current protocol revision, as 64-bit limbs.
const MIN_SQRT_RATIO: U256 = U256::from_limbs([4363438787445, 1, 0, 0]);
const MAX_SQRT_RATIO: U256 = U256::from_limbs([
    17632034473660873000,
    8013356184008655433,
    18446739710271796309,
    0,
]);

// Standard Transfer event selector on this platform.
const TRANSFER_EVENT_SELECTOR: U256 = U256::from_limbs([
    0xebf108d12e6196e9,
    0x3a539b8c9f14bf31,
    0x842a3121e8ddfd43,
    0x0099cd8bde557814,
]);

impl ProtocolConfig {
    /// The canonical mainnet deployment.
    pub fn mainnet() -> Self {
        ProtocolConfig {
            deployment: "mainnet".to_string(),
            revision: 1,
            core: addr("0x05dd83b1c1a3e87fbbc1cbbea9bb1b21cfbd5a1a6a8bb6cfc1bd5b2f4a80e78"),
            positions: addr("0x02a9f3c1bd5e407c8716b17f6d2795eca1b471413fa03fb145a5e337221840b2"),
            router: addr("0x0199741822c2dc722f6f605204f35e56dbc23bceed54818168c4c49e4fb8737e"),
            min_sqrt_ratio: MIN_SQRT_RATIO,
            max_sqrt_ratio: MAX_SQRT_RATIO,
            max_tick: 88_722_883,
            max_tick_spacing: 354_892,
            transfer_event_selector: TRANSFER_EVENT_SELECTOR,
        }
    }

    /// The public testnet deployment. Same numeric bounds as mainnet, only
    /// contract addresses differ.
    pub fn testnet() -> Self {
        ProtocolConfig {
            deployment: "testnet".to_string(),
            core: addr("0x00e6c1b9b6b6e1a5f7d3c5a2eb42fe8af21aaf42e4b257b5ec0a8a7bbbf6b882"),
            positions: addr("0x0423c25ae85f0e2eba5b7a6fc05f26a1a23fbe28a6c5ae1b0c6e4d2b9b86bb15"),
            router: addr("0x045f587d5e8a6d8c34be5b2a29a1e0bbcc5a2ec5cba3bfd36e7e25d1e4b3ab2d"),
            ..Self::mainnet()
        }
    }

    /// Look up a deployment by name.
    pub fn for_deployment(name: &str) -> Option<Self> {
        match name {
            "mainnet" => Some(Self::mainnet()),
            "testnet" => Some(Self::testnet()),
            _ => None,
        }
    }
}

fn addr(hex: &str) -> Address {
    // Only called on the literals above, which are all valid felts.
    Address::from_hex(hex).expect("deployment table address is a valid felt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_ordered_and_nontrivial() {
        let cfg = ProtocolConfig::mainnet();
        assert!(cfg.min_sqrt_ratio < cfg.max_sqrt_ratio);
        assert!(cfg.min_sqrt_ratio > U256::ZERO);
        // One sqrt-ratio unit of 1.0 sits inside the representable range.
        let one = U256::from(1u8) << 128;
        assert!(cfg.min_sqrt_ratio < one && one < cfg.max_sqrt_ratio);
    }

    #[test]
    fn deployments_resolve_by_name() {
        assert!(ProtocolConfig::for_deployment("mainnet").is_some());
        assert!(ProtocolConfig::for_deployment("testnet").is_some());
        assert!(ProtocolConfig::for_deployment("devnet-local").is_none());
        assert_ne!(
            ProtocolConfig::mainnet().router,
            ProtocolConfig::testnet().router
        );
    }
}
