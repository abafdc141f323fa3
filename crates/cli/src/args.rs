use alloy::primitives::Address;
use clap::{ArgGroup, Parser};
use std::time::Duration;
use zkarnage_attack::AttackOptions;
use zkarnage_bundle::{AttackCall, Operation};
use zkarnage_constants::Network;
use zkarnage_types::TargetPolicy;

/// Submit an attack bundle through the Flashbots relay and follow it until
/// it lands or every attempt is spent.
///
/// Reads ETH_RPC_URL, PRIVATE_KEY and ATTACK_CONTRACT from the environment
/// (or `.env`). FLASHBOTS_RELAY_URL, FLASHBOTS_STATUS_URL and
/// FLASHBOTS_AUTH_KEY are optional.
#[derive(Debug, Clone, Parser)]
#[command(name = "run-attack", version, about)]
#[command(group(ArgGroup::new("call").required(true).args(["targets", "operation"])))]
pub(crate) struct Args {
    /// Network to attack.
    #[arg(long, default_value_t = Network::Mainnet)]
    pub(crate) network: Network,

    /// Log level, used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub(crate) log_level: String,

    /// Target the next block number divisible by 100.
    #[arg(long, conflicts_with = "target_ahead")]
    pub(crate) target_hundred: bool,

    /// Target the block this many blocks past the head.
    #[arg(long, value_name = "K", value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) target_ahead: Option<u64>,

    /// Keep going across hundred-block windows until a bundle lands.
    #[arg(long, conflicts_with = "target_ahead")]
    pub(crate) continuous: bool,

    /// Attempts per window.
    #[arg(long, default_value_t = 3)]
    pub(crate) max_attempts: usize,

    /// Gas limit of the attack transaction.
    #[arg(long, default_value_t = 1_000_000)]
    pub(crate) gas_limit: u64,

    /// Contract for the attack to touch. Repeat for more.
    #[arg(long = "target", value_name = "ADDR")]
    pub(crate) targets: Vec<Address>,

    /// Loop a single precompile operation instead of touching targets.
    #[arg(long, conflicts_with = "targets")]
    pub(crate) operation: Option<Operation>,

    /// Remaining gas at which the operation loop stops.
    #[arg(long, default_value_t = 50_000, requires = "operation")]
    pub(crate) gas_threshold: u64,

    /// Never submit a bundle whose simulation reported errors.
    #[arg(long)]
    pub(crate) strict_simulation: bool,

    /// Cancel bundles that did not land before retrying.
    #[arg(long)]
    pub(crate) cancel_abandoned: bool,
}

impl Args {
    /// The target block policy selected by the flags.
    pub(crate) fn policy(&self) -> TargetPolicy {
        if self.target_hundred || self.continuous {
            return TargetPolicy::HundredBoundary;
        }
        self.target_ahead.and_then(TargetPolicy::ahead).unwrap_or_default()
    }

    /// The contract call selected by the flags.
    pub(crate) fn call(&self) -> AttackCall {
        match self.operation {
            Some(operation) => AttackCall::operation(operation, self.gas_threshold),
            None => AttackCall::targets(self.targets.iter().copied()),
        }
    }

    /// Orchestrator options for the selected network.
    pub(crate) fn options(&self) -> AttackOptions {
        AttackOptions::new()
            .with_policy(self.policy())
            .with_max_attempts(self.max_attempts)
            .with_continuous(self.continuous)
            .with_tolerate_simulation_errors(!self.strict_simulation)
            .with_cancel_abandoned(self.cancel_abandoned)
            .with_block_time(Duration::from_secs(self.network.constants().block_time()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("run-attack").chain(args.iter().copied()))
    }

    const TARGET: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn defaults() {
        let args = parse(&["--target", TARGET]).unwrap();
        assert_eq!(args.network, Network::Mainnet);
        assert_eq!(args.policy(), TargetPolicy::Next);
        assert_eq!(args.call(), AttackCall::targets([Address::repeat_byte(0x11)]));

        let options = args.options();
        assert_eq!(options.max_attempts(), 3);
        assert!(options.tolerate_simulation_errors());
        assert!(!options.cancel_abandoned());
    }

    #[test]
    fn a_call_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn targeting_flags() {
        let args = parse(&["--target", TARGET, "--target-hundred"]).unwrap();
        assert_eq!(args.policy(), TargetPolicy::HundredBoundary);

        let args = parse(&["--target", TARGET, "--target-ahead", "3"]).unwrap();
        assert_eq!(args.policy(), TargetPolicy::ahead(3).unwrap());

        assert!(parse(&["--target", TARGET, "--target-ahead", "0"]).is_err());
        assert!(parse(&["--target", TARGET, "--target-hundred", "--target-ahead", "2"]).is_err());

        let args = parse(&["--target", TARGET, "--continuous"]).unwrap();
        assert_eq!(args.policy(), TargetPolicy::HundredBoundary);
        assert!(args.options().continuous());
        assert!(parse(&["--target", TARGET, "--continuous", "--target-ahead", "3"]).is_err());
    }

    #[test]
    fn operation_call() {
        let args =
            parse(&["--operation", "modexp", "--gas-threshold", "70000", "--network", "sepolia"])
                .unwrap();
        assert_eq!(args.call(), AttackCall::operation(Operation::Modexp, 70_000));
        assert_eq!(args.network, Network::Sepolia);

        assert!(parse(&["--operation", "modexp", "--target", TARGET]).is_err());
        assert!(parse(&["--operation", "blake2f"]).is_err());
    }

    #[test]
    fn policy_switches() {
        let options =
            parse(&["--target", TARGET, "--strict-simulation", "--cancel-abandoned"])
                .unwrap()
                .options();
        assert!(!options.tolerate_simulation_errors());
        assert!(options.cancel_abandoned());
    }
}
