//! `run-attack`: build, sign and submit an attack bundle through the
//! Flashbots relay, then follow it until it lands.

mod args;

use alloy::providers::ProviderBuilder;
use args::Args;
use clap::Parser;
use eyre::WrapErr;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use zkarnage_attack::{AttackOrchestrator, AttackReport, AttemptOutcome, RpcChain};
use zkarnage_bundle::TransactionBuilder;
use zkarnage_relay::RelayClient;
use zkarnage_types::AttackConfig;

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .wrap_err_with(|| format!("invalid log level {}", args.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AttackConfig::from_env(args.network).wrap_err("failed to load config")?;
    info!(
        network = %config.network(),
        relay = %config.relay_url(),
        contract = %config.attack_contract(),
        sender = %config.signer().address(),
        "loaded config"
    );

    let provider = ProviderBuilder::new().connect_http(config.rpc_url().clone());
    let chain = RpcChain::new(provider);
    let relay = RelayClient::from_config(&config);
    let builder = TransactionBuilder::new(
        config.attack_contract(),
        args.call(),
        args.gas_limit,
        config.network().chain_id(),
    );

    let orchestrator =
        AttackOrchestrator::new(chain, relay, builder, config.signer().clone(), args.options());
    let report = orchestrator.run().await.wrap_err("attack aborted")?;

    print_report(&report);
    Ok(if report.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn print_report(report: &AttackReport) {
    for attempt in report.attempts() {
        let tx_hash = attempt.tx_hash.map(|hash| hash.to_string()).unwrap_or_default();
        match &attempt.outcome {
            AttemptOutcome::Included(resolution) => info!(
                window = attempt.window,
                attempt = attempt.number,
                target_block = attempt.target_block,
                %tx_hash,
                ?resolution,
                "included"
            ),
            AttemptOutcome::NotIncluded(resolution) => info!(
                window = attempt.window,
                attempt = attempt.number,
                target_block = attempt.target_block,
                %tx_hash,
                ?resolution,
                "not included"
            ),
            AttemptOutcome::Failed(e) => error!(
                window = attempt.window,
                attempt = attempt.number,
                target_block = attempt.target_block,
                %e,
                "failed"
            ),
        }
    }

    match report.included() {
        Some(attempt) => println!(
            "run {}: included in block {} after {} attempt(s), tx {}",
            report.run_id(),
            attempt.target_block,
            report.attempts().len(),
            attempt.tx_hash.map(|hash| hash.to_string()).unwrap_or_default(),
        ),
        None => println!(
            "run {}: not included after {} attempt(s)",
            report.run_id(),
            report.attempts().len()
        ),
    }
}
