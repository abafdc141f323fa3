use crate::{
    AttackError, AttackOptions, BundleRelay, ChainReader, InclusionTracker, Resolution,
    TrackedBundle,
};
use alloy::{
    primitives::{TxHash, B256},
    signers::local::PrivateKeySigner,
};
use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use zkarnage_bundle::{SignedBundle, TransactionBuilder};
use zkarnage_types::{AccountReputation, AttackTransaction};

/// What happened to one attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The bundle landed.
    Included(Resolution),
    /// The bundle was submitted and tracked, but did not land.
    NotIncluded(Resolution),
    /// The attempt stopped before or during submission.
    Failed(AttackError),
}

/// A record of one attempt.
#[derive(Debug)]
pub struct AttackAttempt {
    /// 1-based attempt number within its window.
    pub number: usize,
    /// The window the attempt belongs to, starting at 0.
    pub window: usize,
    /// The block the attempt targeted.
    pub target_block: u64,
    /// The transaction built for the attempt, if it got that far.
    pub transaction: Option<AttackTransaction>,
    /// The signed transaction's hash.
    pub tx_hash: Option<TxHash>,
    /// The bundle sent to the relay.
    pub bundle: Option<SignedBundle>,
    /// The relay-assigned bundle hash.
    pub bundle_hash: Option<B256>,
    /// The outcome.
    pub outcome: AttemptOutcome,
}

impl AttackAttempt {
    const fn new(window: usize, number: usize, target_block: u64) -> Self {
        Self {
            number,
            window,
            target_block,
            transaction: None,
            tx_hash: None,
            bundle: None,
            bundle_hash: None,
            outcome: AttemptOutcome::NotIncluded(Resolution::Missing),
        }
    }

    /// True if this attempt's bundle landed.
    pub const fn is_included(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Included(_))
    }
}

/// The result of a run.
#[derive(Debug)]
pub struct AttackReport {
    run_id: Uuid,
    attempts: Vec<AttackAttempt>,
}

impl AttackReport {
    const fn new(run_id: Uuid) -> Self {
        Self { run_id, attempts: Vec::new() }
    }

    /// The run identifier attached to every log record of the run.
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Every attempt, in order.
    pub fn attempts(&self) -> &[AttackAttempt] {
        &self.attempts
    }

    /// The attempt that landed, if any.
    pub fn included(&self) -> Option<&AttackAttempt> {
        self.attempts.iter().find(|attempt| attempt.is_included())
    }

    /// True if any attempt landed.
    pub fn is_success(&self) -> bool {
        self.included().is_some()
    }
}

/// Drives bundle attempts until one lands or the attempt budget runs out.
///
/// Attempts are strictly sequential: each draws a fresh nonce and fee
/// snapshot, so two live attempts would collide on the nonce. A bundle that
/// does not land is assumed outbid, and the next attempt targets the
/// following block.
#[derive(Debug)]
pub struct AttackOrchestrator<C, R> {
    chain: C,
    relay: R,
    builder: TransactionBuilder,
    signer: PrivateKeySigner,
    options: AttackOptions,
}

impl<C, R> AttackOrchestrator<C, R>
where
    C: ChainReader,
    R: BundleRelay,
{
    /// Create a new orchestrator.
    pub const fn new(
        chain: C,
        relay: R,
        builder: TransactionBuilder,
        signer: PrivateKeySigner,
        options: AttackOptions,
    ) -> Self {
        Self { chain, relay, builder, signer, options }
    }

    /// Get the chain reader.
    pub const fn chain(&self) -> &C {
        &self.chain
    }

    /// Get the relay.
    pub const fn relay(&self) -> &R {
        &self.relay
    }

    /// Get the options.
    pub const fn options(&self) -> &AttackOptions {
        &self.options
    }

    /// Run until a bundle lands or attempts are exhausted.
    ///
    /// Fatal errors end the run immediately, as does failing to read the
    /// chain head at the start of a window. Every other failure is recorded
    /// in the report and consumes one attempt.
    pub async fn run(&self) -> Result<AttackReport, AttackError> {
        self.run_with_id(Uuid::new_v4()).await
    }

    #[instrument(skip_all, fields(run_id = %run_id))]
    async fn run_with_id(&self, run_id: Uuid) -> Result<AttackReport, AttackError> {
        let mut report = AttackReport::new(run_id);
        let mut window = 0;

        loop {
            if self.run_window(window, &mut report).await? {
                return Ok(report);
            }
            window += 1;

            if !self.options.continuous() {
                break;
            }
            if self.options.max_windows().is_some_and(|max| window >= max) {
                info!(windows = window, "window limit reached");
                break;
            }
            self.wait_for_window().await;
        }

        warn!(attempts = report.attempts.len(), "all attempts exhausted");
        Ok(report)
    }

    /// Run one window of attempts. Returns `true` if a bundle landed.
    async fn run_window(
        &self,
        window: usize,
        report: &mut AttackReport,
    ) -> Result<bool, AttackError> {
        let head = self.chain.block_number().await.map_err(AttackError::chain)?;
        let mut target_block = self.options.policy().target_after(head);
        info!(window, head, target_block, "starting attack window");

        for number in 1..=self.options.max_attempts() {
            let attempt = self.attempt(window, number, target_block).await?;
            let included = attempt.is_included();
            report.attempts.push(attempt);
            if included {
                return Ok(true);
            }
            target_block += 1;
        }
        Ok(false)
    }

    async fn wait_for_window(&self) {
        let wait = match self.chain.block_number().await {
            Ok(head) => self.options.window_wait(head),
            Err(e) => {
                warn!(%e, "failed to fetch chain head");
                self.options.block_time()
            }
        };
        info!(wait_secs = wait.as_secs(), "waiting for the next window");
        tokio::time::sleep(wait).await;
    }

    /// Make one attempt. Only fatal errors are returned; anything else is
    /// recorded as a failed outcome.
    #[instrument(skip_all, fields(window = window, attempt = number, target_block = target_block))]
    async fn attempt(
        &self,
        window: usize,
        number: usize,
        target_block: u64,
    ) -> Result<AttackAttempt, AttackError> {
        let mut attempt = AttackAttempt::new(window, number, target_block);
        match self.execute(&mut attempt).await {
            Ok(outcome) => attempt.outcome = outcome,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(%e, "attempt failed");
                attempt.outcome = AttemptOutcome::Failed(e);
            }
        }
        Ok(attempt)
    }

    async fn execute(&self, attempt: &mut AttackAttempt) -> Result<AttemptOutcome, AttackError> {
        let target_block = attempt.target_block;

        let head = self.chain.block_number().await.map_err(AttackError::chain)?;
        let reputation = self.reputation(head).await?;
        let base_fee = self.chain.base_fee().await.map_err(AttackError::chain)?;
        let nonce = self
            .chain
            .transaction_count(self.signer.address())
            .await
            .map_err(AttackError::chain)?;

        let tx = self.builder.build(base_fee, nonce, reputation.high_priority)?;
        attempt.transaction = Some(tx.clone());
        let signed = self.builder.sign(tx, &self.signer)?;
        attempt.tx_hash = Some(signed.hash());

        let valid_for = self.options.bundle_lifetime(head, target_block);
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        let bundle = SignedBundle::single(&signed, target_block, None, now + valid_for.as_secs());
        attempt.bundle = Some(bundle.clone());

        let simulation = self.relay.simulate(&bundle).await?;
        if !simulation.success {
            let error = simulation.error.unwrap_or_default();
            match simulation.bundle_hash {
                Some(bundle_hash) if self.options.tolerate_simulation_errors() => {
                    warn!(%bundle_hash, %error, "simulation reported errors, submitting anyway")
                }
                _ => return Err(AttackError::SimulationFailure(error)),
            }
        }

        let bundle_hash = self.relay.submit(&bundle).await?;
        attempt.bundle_hash = Some(bundle_hash);
        info!(
            %bundle_hash,
            tx_hash = %signed.hash(),
            head,
            valid_for_secs = valid_for.as_secs(),
            "bundle submitted"
        );

        let tracked = TrackedBundle {
            bundle_hash,
            tx_hash: signed.hash(),
            sender: self.signer.address(),
            target_block,
            valid_for,
        };
        let resolution =
            InclusionTracker::new(&self.chain, &self.relay, &self.options).track(&tracked).await;

        if resolution.is_included() {
            info!(?resolution, "attack landed");
            return Ok(AttemptOutcome::Included(resolution));
        }

        info!(?resolution, "bundle not included");
        if self.options.cancel_abandoned() {
            self.cancel(&bundle).await;
        }
        Ok(AttemptOutcome::NotIncluded(resolution))
    }

    /// Fetch the account's reputation, assuming no priority if the relay
    /// cannot say. Only a failure to sign the request is returned.
    async fn reputation(&self, head: u64) -> Result<AccountReputation, AttackError> {
        match self.relay.user_stats(head).await {
            Ok(reputation) => {
                info!(
                    high_priority = reputation.high_priority,
                    validator_payments = %reputation.validator_payments,
                    "fetched account reputation"
                );
                Ok(reputation)
            }
            Err(e) if e.is_signing() => Err(e.into()),
            Err(e) => {
                warn!(%e, "failed to fetch account reputation, assuming low priority");
                Ok(AccountReputation::default())
            }
        }
    }

    async fn cancel(&self, bundle: &SignedBundle) {
        let Some(uuid) = bundle.replacement_uuid() else { return };
        match self.relay.cancel(uuid).await {
            Ok(()) => info!(replacement_uuid = uuid, "cancelled bundle"),
            Err(e) => warn!(%e, replacement_uuid = uuid, "failed to cancel bundle"),
        }
    }
}
