//! Flashbots bundle types.
use alloy::{
    consensus::{transaction::SignerRecoverable, TxEnvelope},
    eips::{eip2718::Eip2718Result, Decodable2718},
    primitives::{Address, Bytes},
    rlp::Buf,
    rpc::types::mev::EthSendBundle,
};
use serde::{Deserialize, Serialize};

use crate::SignedAttack;

/// A bundle of signed transactions targeting one block.
///
/// This is a Flashbots `eth_sendBundle` bundle. See [their docs].
///
/// The bundle always carries a replacement UUID, so a later request can
/// cancel this exact submission.
///
/// [their docs]: https://docs.flashbots.net/flashbots-auction/advanced/rpc-endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedBundle {
    /// The bundle as sent to the relay.
    #[serde(flatten)]
    pub bundle: EthSendBundle,
}

impl SignedBundle {
    /// Creates a new [`SignedBundle`] from an existing [`EthSendBundle`].
    pub const fn new(bundle: EthSendBundle) -> Self {
        Self { bundle }
    }

    /// Bundle a single signed attack for `target_block`, valid until
    /// `max_timestamp`. A fresh replacement UUID is generated.
    pub fn single(
        attack: &SignedAttack,
        target_block: u64,
        min_timestamp: Option<u64>,
        max_timestamp: u64,
    ) -> Self {
        Self::new(EthSendBundle {
            txs: vec![attack.raw().clone()],
            block_number: target_block,
            min_timestamp,
            max_timestamp: Some(max_timestamp),
            replacement_uuid: Some(uuid::Uuid::new_v4().to_string()),
            ..Default::default()
        })
    }

    /// Returns the transactions in this bundle.
    pub const fn txs(&self) -> &[Bytes] {
        self.bundle.txs.as_slice()
    }

    /// Returns the block this bundle targets.
    pub const fn target_block(&self) -> u64 {
        self.bundle.block_number
    }

    /// Returns the earliest timestamp the bundle is valid for.
    pub const fn min_timestamp(&self) -> Option<u64> {
        self.bundle.min_timestamp
    }

    /// Returns the latest timestamp the bundle is valid for.
    pub const fn max_timestamp(&self) -> Option<u64> {
        self.bundle.max_timestamp
    }

    /// Returns the replacement UUID, if any.
    pub fn replacement_uuid(&self) -> Option<&str> {
        self.bundle.replacement_uuid.as_deref()
    }

    /// Return an iterator over decoded transactions in this bundle.
    pub fn decode_txs(&self) -> impl Iterator<Item = Eip2718Result<TxEnvelope>> + '_ {
        self.txs().iter().map(|tx| TxEnvelope::decode_2718(&mut tx.chunk()))
    }

    /// Return the senders of the transactions in this bundle, or `None` if
    /// any transaction fails to decode or recover.
    pub fn signers(&self) -> Option<Vec<Address>> {
        self.decode_txs().map(|tx| tx.ok()?.recover_signer().ok()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttackCall, TransactionBuilder};
    use alloy::signers::local::PrivateKeySigner;

    fn signed_bundle() -> (SignedBundle, PrivateKeySigner) {
        let signer = PrivateKeySigner::random();
        let builder = TransactionBuilder::new(
            Address::repeat_byte(0xcc),
            AttackCall::targets([Address::repeat_byte(0x01)]),
            100_000,
            1,
        );
        let tx = builder.build(1_000_000_000, 0, true).unwrap();
        let attack = builder.sign(tx, &signer).unwrap();
        (SignedBundle::single(&attack, 12_400, None, 1_700_000_420), signer)
    }

    #[test]
    fn single_bundle_fields() {
        let (bundle, signer) = signed_bundle();
        assert_eq!(bundle.txs().len(), 1);
        assert_eq!(bundle.target_block(), 12_400);
        assert_eq!(bundle.max_timestamp(), Some(1_700_000_420));
        assert!(bundle.min_timestamp().is_none());
        assert!(bundle.replacement_uuid().is_some());
        assert_eq!(bundle.signers().unwrap(), vec![signer.address()]);
    }

    #[test]
    fn replacement_uuids_are_unique() {
        let (a, _) = signed_bundle();
        let (b, _) = signed_bundle();
        assert_ne!(a.replacement_uuid(), b.replacement_uuid());
    }

    #[test]
    fn serializes_as_send_bundle_params() {
        let (bundle, _) = signed_bundle();
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["blockNumber"], "0x3070");
        assert_eq!(json["maxTimestamp"], 1_700_000_420u64);
        assert!(json["txs"][0].as_str().unwrap().starts_with("0x02"));
        assert_eq!(json["replacementUuid"].as_str(), bundle.replacement_uuid());
    }
}
