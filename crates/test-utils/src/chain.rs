//! An in-memory [`ChainReader`].
use alloy::primitives::{Address, TxHash, B256};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::time::Instant;
use zkarnage_attack::ChainReader;
use zkarnage_constants::GWEI;
use zkarnage_types::ObservedTx;

/// Error returned by [`MockChain`] when a failure is injected.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("mock chain unavailable")]
pub struct MockChainError;

/// Produces blocks on a fixed schedule of tokio time.
#[derive(Debug, Clone, Copy)]
struct Clock {
    genesis: u64,
    started: Instant,
    block_time: Duration,
}

impl Clock {
    fn head(&self) -> u64 {
        let elapsed = self.started.elapsed().as_millis();
        let blocks = elapsed / self.block_time.as_millis().max(1);
        self.genesis + u64::try_from(blocks).unwrap_or(u64::MAX - self.genesis)
    }
}

#[derive(Debug)]
struct ChainState {
    head: u64,
    step: u64,
    clock: Option<Clock>,
    base_fee: u128,
    nonce: u64,
    blocks: HashMap<u64, Vec<ObservedTx>>,
    receipts: HashMap<TxHash, bool>,
    failures: usize,
    head_queries: usize,
}

/// A mock chain whose head advances by `step` blocks every time it is
/// queried, or on a fixed block time with [`MockChain::with_block_time`].
///
/// Blocks at or below the head that were never populated are empty. Blocks
/// above the head are unknown.
#[derive(Debug, Clone)]
pub struct MockChain {
    state: Arc<Mutex<ChainState>>,
}

impl MockChain {
    /// Create a chain at `head` advancing one block per head query, with a
    /// 10 gwei base fee.
    pub fn new(head: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(ChainState {
                head,
                step: 1,
                clock: None,
                base_fee: 10 * GWEI,
                nonce: 0,
                blocks: HashMap::new(),
                receipts: HashMap::new(),
                failures: 0,
                head_queries: 0,
            })),
        }
    }

    /// Advance by `step` blocks per head query. Zero freezes the chain.
    pub fn with_step(self, step: u64) -> Self {
        self.state.lock().unwrap().step = step;
        self
    }

    /// Produce one block every `block_time` of tokio time, starting now,
    /// instead of advancing on queries. Pair with paused time in tests.
    pub fn with_block_time(self, block_time: Duration) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let genesis = state.head;
            state.clock = Some(Clock { genesis, started: Instant::now(), block_time });
        }
        self
    }

    /// Set the base fee.
    pub fn with_base_fee(self, base_fee: u128) -> Self {
        self.state.lock().unwrap().base_fee = base_fee;
        self
    }

    /// Set the nonce reported for every account.
    pub fn with_nonce(self, nonce: u64) -> Self {
        self.state.lock().unwrap().nonce = nonce;
        self
    }

    /// Put a transaction from `from` in block `number`, with a receipt
    /// reporting `success`. Returns the transaction's hash.
    pub fn include_from(&self, number: u64, from: Address, success: bool) -> TxHash {
        let mut state = self.state.lock().unwrap();
        let hash = B256::with_last_byte(state.receipts.len() as u8 + 1);
        state.blocks.entry(number).or_default().push(ObservedTx {
            hash,
            from,
            to: Some(crate::TEST_CONTRACT),
        });
        state.receipts.insert(hash, success);
        hash
    }

    /// Fail the next `count` queries of any kind.
    pub fn fail_next(&self, count: usize) {
        self.state.lock().unwrap().failures = count;
    }

    /// Current head, without advancing it.
    pub fn head(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        Self::tick(&mut state);
        state.head
    }

    /// How many times the head was queried.
    pub fn head_queries(&self) -> usize {
        self.state.lock().unwrap().head_queries
    }

    fn tick(state: &mut ChainState) {
        if let Some(clock) = state.clock {
            state.head = clock.head();
        }
    }

    fn check(state: &mut ChainState) -> Result<(), MockChainError> {
        if state.failures > 0 {
            state.failures -= 1;
            return Err(MockChainError);
        }
        Ok(())
    }
}

impl ChainReader for MockChain {
    type Error = MockChainError;

    async fn block_number(&self) -> Result<u64, Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.head_queries += 1;
        Self::check(&mut state)?;
        if state.clock.is_some() {
            Self::tick(&mut state);
            return Ok(state.head);
        }
        let head = state.head;
        state.head += state.step;
        Ok(head)
    }

    async fn base_fee(&self) -> Result<u128, Self::Error> {
        let mut state = self.state.lock().unwrap();
        Self::check(&mut state)?;
        Ok(state.base_fee)
    }

    async fn transaction_count(&self, _account: Address) -> Result<u64, Self::Error> {
        let mut state = self.state.lock().unwrap();
        Self::check(&mut state)?;
        Ok(state.nonce)
    }

    async fn block_transactions(&self, number: u64) -> Result<Option<Vec<ObservedTx>>, Self::Error> {
        let mut state = self.state.lock().unwrap();
        Self::check(&mut state)?;
        Self::tick(&mut state);
        if number > state.head {
            return Ok(None);
        }
        Ok(Some(state.blocks.get(&number).cloned().unwrap_or_default()))
    }

    async fn receipt_status(&self, hash: TxHash) -> Result<Option<bool>, Self::Error> {
        let mut state = self.state.lock().unwrap();
        Self::check(&mut state)?;
        Ok(state.receipts.get(&hash).copied())
    }
}
