use crate::prelude::*;

use crate::core::Call;
use crate::protocol::abi::{entrypoints, Calldata};

use super::CallBuilder;

/// ERC-20 transfer of `amount` to `recipient`, used to pre-fund a
/// periphery contract before the action call in an atomic batch.
pub fn transfer(token: Address, recipient: Address, amount: u128) -> Call {
    CallBuilder::new(token, entrypoints::TRANSFER)
        .with_calldata(Calldata::new().address(recipient).u256(U256::from(amount)))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_takes_recipient_then_u256_amount() {
        let token = Address::new(U256::from(5u8)).unwrap();
        let recipient = Address::new(U256::from(9u8)).unwrap();
        let call = transfer(token, recipient, 1_000_000);
        assert_eq!(call.to, token);
        assert_eq!(call.entrypoint, "transfer");
        assert_eq!(
            call.calldata,
            vec![U256::from(9u8), U256::from(1_000_000u64), U256::ZERO]
        );
    }
}
