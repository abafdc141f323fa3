use alloy::{
    consensus::{TxEip1559, TxType},
    primitives::{Address, Bytes, TxHash, TxKind, U256},
};

/// A fully specified, unsigned attack transaction.
///
/// The fee fields satisfy `max_fee_per_gas >= max_priority_fee_per_gas`;
/// construct one through the transaction builder to have that checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackTransaction {
    /// The attack contract being called.
    pub to: Address,
    /// ABI-encoded call data.
    pub input: Bytes,
    /// Gas limit.
    pub gas_limit: u64,
    /// Maximum fee per unit of gas, in wei.
    pub max_fee_per_gas: u128,
    /// Maximum priority fee per unit of gas, in wei.
    pub max_priority_fee_per_gas: u128,
    /// Sender nonce at build time.
    pub nonce: u64,
    /// Chain ID.
    pub chain_id: u64,
    /// Transaction envelope type.
    pub kind: TxType,
}

impl AttackTransaction {
    /// True if the fee fields are consistent.
    pub const fn fees_are_consistent(&self) -> bool {
        self.max_fee_per_gas >= self.max_priority_fee_per_gas
    }

    /// Convert into an unsigned EIP-1559 transaction.
    pub fn to_eip1559(&self) -> TxEip1559 {
        TxEip1559 {
            chain_id: self.chain_id,
            nonce: self.nonce,
            gas_limit: self.gas_limit,
            max_fee_per_gas: self.max_fee_per_gas,
            max_priority_fee_per_gas: self.max_priority_fee_per_gas,
            to: TxKind::Call(self.to),
            value: U256::ZERO,
            access_list: Default::default(),
            input: self.input.clone(),
        }
    }
}

/// The parts of an on-chain transaction inclusion tracking cares about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObservedTx {
    /// Transaction hash.
    pub hash: TxHash,
    /// Recovered sender.
    pub from: Address,
    /// Recipient, `None` for contract creation.
    pub to: Option<Address>,
}

impl ObservedTx {
    /// True if this transaction is `hash`, or was sent by `account`.
    pub fn matches(&self, hash: TxHash, account: Address) -> bool {
        self.hash == hash || self.from == account
    }
}
