use crate::bindings::ZKarnage::{attackCall, fCall};
use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};
use std::{fmt, str::FromStr};

/// The list of known operations as a string.
const KNOWN_OPERATIONS: &str = "keccak, sha256, modexp, ecrecover";

/// Error type for parsing an [`Operation`] from its name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("operation {0} is not supported. supported operations: {KNOWN_OPERATIONS}")]
pub struct ParseOperationError(String);

/// A precompile-heavy operation the attack contract can loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `KECCAK256` opcode.
    Keccak,
    /// `SHA256` precompile.
    Sha256,
    /// `MODEXP` precompile.
    Modexp,
    /// `ECRECOVER` precompile.
    Ecrecover,
}

impl Operation {
    /// The operation code understood by the contract.
    pub const fn code(self) -> u16 {
        match self {
            Self::Keccak => 0x0003,
            Self::Sha256 => 0x0023,
            Self::Modexp => 0x0027,
            Self::Ecrecover => 0x0021,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Keccak => "keccak",
            Self::Sha256 => "sha256",
            Self::Modexp => "modexp",
            Self::Ecrecover => "ecrecover",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "keccak" => Ok(Self::Keccak),
            "sha256" => Ok(Self::Sha256),
            "modexp" => Ok(Self::Modexp),
            "ecrecover" => Ok(Self::Ecrecover),
            _ => Err(ParseOperationError(s)),
        }
    }
}

/// The contract call an attack transaction makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackCall {
    /// Touch every contract in the list.
    Targets(Vec<Address>),
    /// Loop one operation until the gas threshold is reached.
    Operation {
        /// The operation to loop.
        operation: Operation,
        /// Remaining gas at which the loop stops.
        gas_threshold: u64,
    },
}

impl AttackCall {
    /// Create a call over a target list.
    pub fn targets(targets: impl IntoIterator<Item = Address>) -> Self {
        Self::Targets(targets.into_iter().collect())
    }

    /// Create a single-operation call.
    pub const fn operation(operation: Operation, gas_threshold: u64) -> Self {
        Self::Operation { operation, gas_threshold }
    }

    /// True if the call has nothing to do.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Targets(targets) if targets.is_empty())
    }

    /// The 4-byte selector of the called function.
    pub const fn selector(&self) -> [u8; 4] {
        match self {
            Self::Targets(_) => attackCall::SELECTOR,
            Self::Operation { .. } => fCall::SELECTOR,
        }
    }

    /// ABI-encode the call, selector first.
    ///
    /// The encoding depends only on the call's contents.
    pub fn encode(&self) -> Bytes {
        match self {
            Self::Targets(targets) => {
                attackCall { targets: targets.clone() }.abi_encode().into()
            }
            Self::Operation { operation, gas_threshold } => fCall {
                operation: U256::from(operation.code()),
                gasThreshold: U256::from(*gas_threshold),
                target: U256::ZERO,
            }
            .abi_encode()
            .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::keccak256;
    use proptest::prelude::*;

    #[test]
    fn selectors_match_signatures() {
        assert_eq!(attackCall::SELECTOR, keccak256("attack(address[])")[..4]);
        assert_eq!(fCall::SELECTOR, keccak256("f(uint256,uint256,uint256)")[..4]);
    }

    #[test]
    fn target_list_layout() {
        let targets = vec![Address::repeat_byte(0x11), Address::repeat_byte(0x22)];
        let data = AttackCall::targets(targets.clone()).encode();

        assert_eq!(data[..4], attackCall::SELECTOR);
        // offset, length, then one word per address
        assert_eq!(data.len(), 4 + 32 * 4);
        assert_eq!(U256::from_be_slice(&data[4..36]), U256::from(32));
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(2));
        assert_eq!(&data[80..100], targets[0].as_slice());
        assert_eq!(&data[112..132], targets[1].as_slice());
    }

    #[test]
    fn operation_layout() {
        let data = AttackCall::operation(Operation::Modexp, 50_000).encode();
        assert_eq!(data[..4], fCall::SELECTOR);
        assert_eq!(data.len(), 4 + 32 * 3);
        assert_eq!(U256::from_be_slice(&data[4..36]), U256::from(0x0027));
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(50_000));
        assert_eq!(U256::from_be_slice(&data[68..100]), U256::ZERO);
    }

    #[test]
    fn operation_parsing() {
        assert_eq!("KECCAK".parse::<Operation>().unwrap(), Operation::Keccak);
        assert_eq!(Operation::Ecrecover.code(), 0x0021);
        assert!("blake2f".parse::<Operation>().is_err());
        assert_eq!(Operation::Sha256.to_string(), "sha256");
    }

    #[test]
    fn empty_target_list() {
        assert!(AttackCall::targets([]).is_empty());
        assert!(!AttackCall::operation(Operation::Keccak, 1).is_empty());
    }

    proptest! {
        #[test]
        fn encoding_is_deterministic(raw in proptest::collection::vec(any::<[u8; 20]>(), 0..32)) {
            let targets: Vec<Address> = raw.into_iter().map(Address::from).collect();
            let first = AttackCall::targets(targets.clone()).encode();
            let second = AttackCall::targets(targets).encode();
            prop_assert_eq!(first, second);
        }
    }
}
