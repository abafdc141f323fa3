use crate::{AttackCall, BuildError, FeePolicy};
use alloy::{
    consensus::{SignableTransaction, TxEnvelope, TxType},
    eips::eip2718::Encodable2718,
    network::TxSignerSync,
    primitives::{Address, Bytes, TxHash},
    signers::local::PrivateKeySigner,
};
use tracing::debug;
use zkarnage_types::AttackTransaction;

/// An attack transaction together with its signed, encoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedAttack {
    transaction: AttackTransaction,
    hash: TxHash,
    raw: Bytes,
}

impl SignedAttack {
    /// The unsigned transaction.
    pub const fn transaction(&self) -> &AttackTransaction {
        &self.transaction
    }

    /// The transaction hash.
    pub const fn hash(&self) -> TxHash {
        self.hash
    }

    /// The EIP-2718 encoded signed transaction.
    pub const fn raw(&self) -> &Bytes {
        &self.raw
    }
}

/// Builds attack transactions against one contract.
///
/// Stateless: every call to [`TransactionBuilder::build`] is given the fee
/// and nonce snapshot it should use.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    contract: Address,
    call: AttackCall,
    gas_limit: u64,
    chain_id: u64,
    fee_policy: FeePolicy,
}

impl TransactionBuilder {
    /// Create a new builder with the default [`FeePolicy`].
    pub fn new(contract: Address, call: AttackCall, gas_limit: u64, chain_id: u64) -> Self {
        Self { contract, call, gas_limit, chain_id, fee_policy: FeePolicy::default() }
    }

    /// Use the given fee policy.
    pub const fn with_fee_policy(mut self, fee_policy: FeePolicy) -> Self {
        self.fee_policy = fee_policy;
        self
    }

    /// Get the attack contract address.
    pub const fn contract(&self) -> Address {
        self.contract
    }

    /// Get the contract call.
    pub const fn call(&self) -> &AttackCall {
        &self.call
    }

    /// Get the gas limit.
    pub const fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Get the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the fee policy.
    pub const fn fee_policy(&self) -> &FeePolicy {
        &self.fee_policy
    }

    /// Build an unsigned transaction for the given base fee and nonce.
    pub fn build(
        &self,
        base_fee: u128,
        nonce: u64,
        high_priority: bool,
    ) -> Result<AttackTransaction, BuildError> {
        if self.call.is_empty() {
            return Err(BuildError::NoTargets);
        }

        let levels = self.fee_policy.levels(base_fee, high_priority)?;
        let tx = AttackTransaction {
            to: self.contract,
            input: self.call.encode(),
            gas_limit: self.gas_limit,
            max_fee_per_gas: levels.max_fee_per_gas,
            max_priority_fee_per_gas: levels.max_priority_fee_per_gas,
            nonce,
            chain_id: self.chain_id,
            kind: TxType::Eip1559,
        };

        if !tx.fees_are_consistent() {
            return Err(BuildError::InvalidFeeConfiguration {
                max_fee: tx.max_fee_per_gas,
                max_priority_fee: tx.max_priority_fee_per_gas,
            });
        }

        debug!(
            nonce,
            base_fee,
            high_priority,
            max_fee = tx.max_fee_per_gas,
            max_priority_fee = tx.max_priority_fee_per_gas,
            "built attack transaction"
        );
        Ok(tx)
    }

    /// Sign a transaction produced by [`TransactionBuilder::build`].
    pub fn sign(
        &self,
        tx: AttackTransaction,
        signer: &PrivateKeySigner,
    ) -> Result<SignedAttack, BuildError> {
        let mut unsigned = tx.to_eip1559();
        let signature = signer.sign_transaction_sync(&mut unsigned)?;
        let envelope = TxEnvelope::from(unsigned.into_signed(signature));

        Ok(SignedAttack {
            transaction: tx,
            hash: *envelope.tx_hash(),
            raw: envelope.encoded_2718().into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Operation;
    use alloy::{
        consensus::{transaction::SignerRecoverable, Transaction},
        eips::eip2718::Decodable2718,
        sol_types::SolCall,
    };
    use zkarnage_constants::GWEI;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn builder() -> TransactionBuilder {
        TransactionBuilder::new(
            Address::repeat_byte(0xcc),
            AttackCall::targets([Address::repeat_byte(0x01), Address::repeat_byte(0x02)]),
            1_000_000,
            1,
        )
    }

    #[test]
    fn builds_with_priority_fees() {
        let tx = builder().build(12 * GWEI, 4, true).unwrap();
        assert_eq!(tx.to, Address::repeat_byte(0xcc));
        assert_eq!(tx.nonce, 4);
        assert_eq!(tx.max_priority_fee_per_gas, 5 * GWEI);
        assert_eq!(tx.max_fee_per_gas, 22 * GWEI);
        assert_eq!(tx.kind, TxType::Eip1559);
        assert_eq!(tx.input, builder().call().encode());
    }

    #[test]
    fn builds_with_standard_fees() {
        let tx = builder().build(12 * GWEI, 4, false).unwrap();
        assert_eq!(tx.max_priority_fee_per_gas, 15 * GWEI);
        assert_eq!(tx.max_fee_per_gas, 32 * GWEI);
    }

    #[test]
    fn empty_target_list_is_rejected() {
        let builder = TransactionBuilder::new(Address::ZERO, AttackCall::targets([]), 21_000, 1);
        assert!(matches!(builder.build(GWEI, 0, true), Err(BuildError::NoTargets)));
    }

    #[test]
    fn operation_calls_build() {
        let builder = TransactionBuilder::new(
            Address::ZERO,
            AttackCall::operation(Operation::Sha256, 50_000),
            5_000_000,
            1,
        );
        let tx = builder.build(GWEI, 0, false).unwrap();
        assert_eq!(tx.input[..4], crate::bindings::ZKarnage::fCall::SELECTOR);
    }

    #[test]
    fn signed_transaction_decodes() {
        let signer: PrivateKeySigner = KEY.parse().unwrap();
        let builder = builder();
        let tx = builder.build(10 * GWEI, 9, false).unwrap();
        let signed = builder.sign(tx.clone(), &signer).unwrap();

        let envelope = TxEnvelope::decode_2718(&mut signed.raw().as_ref()).unwrap();
        assert_eq!(*envelope.tx_hash(), signed.hash());
        assert_eq!(envelope.recover_signer().unwrap(), signer.address());
        assert_eq!(envelope.nonce(), 9);
        assert_eq!(envelope.max_fee_per_gas(), tx.max_fee_per_gas);
        assert_eq!(envelope.chain_id(), Some(1));
        assert_eq!(signed.transaction(), &tx);
    }
}
