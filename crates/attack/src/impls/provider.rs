use crate::ChainReader;
use alloy::{
    consensus::Transaction as _,
    eips::BlockNumberOrTag,
    network::{Ethereum, TransactionResponse},
    primitives::{Address, TxHash},
    providers::Provider,
    transports::{TransportError, TransportErrorKind},
};
use zkarnage_types::ObservedTx;

/// A [`ChainReader`] backed by an alloy [`Provider`].
#[derive(Debug, Clone)]
pub struct RpcChain<P> {
    provider: P,
}

impl<P> RpcChain<P> {
    /// Wrap a provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get the inner provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> ChainReader for RpcChain<P>
where
    P: Provider<Ethereum>,
{
    type Error = TransportError;

    async fn block_number(&self) -> Result<u64, Self::Error> {
        self.provider.get_block_number().await
    }

    async fn base_fee(&self) -> Result<u128, Self::Error> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await?
            .ok_or_else(|| TransportErrorKind::custom_str("latest block not found"))?;
        // Pre-London blocks have no base fee.
        Ok(block.header.base_fee_per_gas.map(u128::from).unwrap_or_default())
    }

    async fn transaction_count(&self, account: Address) -> Result<u64, Self::Error> {
        self.provider.get_transaction_count(account).await
    }

    async fn block_transactions(&self, number: u64) -> Result<Option<Vec<ObservedTx>>, Self::Error> {
        let Some(block) = self.provider.get_block_by_number(number.into()).full().await? else {
            return Ok(None);
        };

        Ok(Some(
            block
                .transactions
                .txns()
                .map(|tx| ObservedTx { hash: tx.tx_hash(), from: tx.from(), to: tx.to() })
                .collect(),
        ))
    }

    async fn receipt_status(&self, hash: TxHash) -> Result<Option<bool>, Self::Error> {
        Ok(self.provider.get_transaction_receipt(hash).await?.map(|receipt| receipt.status()))
    }
}
