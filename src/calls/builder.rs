use crate::core::{Address, Call};
use crate::protocol::abi::Calldata;

/// Builder for a single contract call.
#[derive(Debug)]
pub struct CallBuilder {
    to: Address,
    entrypoint: &'static str,
    calldata: Calldata,
}

impl CallBuilder {
    pub fn new(to: Address, entrypoint: &'static str) -> Self {
        CallBuilder {
            to,
            entrypoint,
            calldata: Calldata::new(),
        }
    }

    pub fn with_calldata(mut self, calldata: Calldata) -> Self {
        self.calldata = calldata;
        self
    }

    pub fn build(self) -> Call {
        Call {
            to: self.to,
            entrypoint: self.entrypoint.to_string(),
            calldata: self.calldata.into_vec(),
        }
    }
}
