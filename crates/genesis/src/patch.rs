use crate::{BlockZeroFields, GenesisSnapshot, GenesisTemplate};
use alloy_genesis::{Genesis, GenesisAccount};
use alloy_primitives::{Address, Bytes, U256};
use hive_forks::{ForkSchedule, Hardfork, UpgradeTimestamps};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, trace};

/// Source of the upgrade-agnostic genesis a fixture is derived from.
pub trait BaseGenesisProvider {
    /// Returns a fresh copy of the base genesis.
    fn base_genesis(&self) -> Genesis;
}

impl BaseGenesisProvider for Genesis {
    fn base_genesis(&self) -> Genesis {
        self.clone()
    }
}

impl<T: BaseGenesisProvider + ?Sized> BaseGenesisProvider for Arc<T> {
    fn base_genesis(&self) -> Genesis {
        (**self).base_genesis()
    }
}

/// A [`BaseGenesisProvider`] backed by a closure.
#[derive(Debug, Clone)]
pub struct GenesisFn<F>(pub F);

impl<F: Fn() -> Genesis> BaseGenesisProvider for GenesisFn<F> {
    fn base_genesis(&self) -> Genesis {
        (self.0)()
    }
}

/// The changes applied to a base genesis for a fork conformance test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisPatch {
    timestamp: u64,
    block_zero: BlockZeroFields,
    accounts: BTreeMap<Address, GenesisAccount>,
    fork_timestamps: Option<UpgradeTimestamps>,
}

impl GenesisPatch {
    /// Computes the patch for a fork scheduled by `schedule`, injecting the accounts of
    /// `template`.
    ///
    /// System accounts take precedence over probe accounts at the same address.
    pub fn new(schedule: &ForkSchedule, template: &GenesisTemplate) -> Self {
        let probe = template.probes.account();
        let mut accounts: BTreeMap<_, _> =
            template.probes.addresses().map(|address| (address, probe.clone())).collect();

        for system in &template.system_accounts {
            trace!(
                target: "hive::genesis",
                address = %system.address,
                balance = %system.balance,
                "Funding system account"
            );
            accounts.insert(system.address, system.account());
        }

        Self {
            timestamp: schedule.genesis_timestamp,
            block_zero: BlockZeroFields::for_schedule(schedule),
            accounts,
            fork_timestamps: None,
        }
    }

    /// Also writes the activation timestamps of `timestamps` into the chain config.
    pub fn with_fork_timestamps(mut self, timestamps: UpgradeTimestamps) -> Self {
        self.fork_timestamps = Some(timestamps);
        self
    }

    /// The genesis timestamp the patch writes.
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// The block zero fields the patch writes.
    pub const fn block_zero(&self) -> &BlockZeroFields {
        &self.block_zero
    }

    /// The accounts the patch injects.
    pub const fn accounts(&self) -> &BTreeMap<Address, GenesisAccount> {
        &self.accounts
    }

    /// Applies the patch to `base`, consuming it.
    ///
    /// The genesis timestamp of the schedule replaces the one of `base`, so the fork activation
    /// is measured from the genesis block the client actually starts from. Proof-of-work and
    /// clique are disabled, the block zero fields are written, and the injected accounts replace
    /// any account of `base` at the same address.
    pub fn apply(self, mut base: Genesis) -> GenesisSnapshot {
        if base.timestamp != self.timestamp {
            debug!(
                target: "hive::genesis",
                base = base.timestamp,
                genesis = self.timestamp,
                "Overriding base genesis timestamp"
            );
        }
        base.timestamp = self.timestamp;
        base.difficulty = U256::ZERO;
        base.extra_data = Bytes::new();
        base.config.terminal_total_difficulty = Some(U256::ZERO);
        base.config.clique = None;

        if let Some(timestamps) = &self.fork_timestamps {
            base.config.shanghai_time = timestamps.activation_timestamp(Hardfork::Shanghai);
            base.config.cancun_time = timestamps.activation_timestamp(Hardfork::Cancun);
            base.config.prague_time = timestamps.activation_timestamp(Hardfork::Prague);
        }

        base.alloc.extend(self.accounts);

        GenesisSnapshot::new(base, self.block_zero)
    }
}

/// Derives the genesis of a fork conformance test from the genesis of `provider`.
pub fn derive_genesis<P>(
    provider: &P,
    schedule: &ForkSchedule,
    template: &GenesisTemplate,
) -> GenesisSnapshot
where
    P: BaseGenesisProvider + ?Sized,
{
    let patch = GenesisPatch::new(schedule, template);
    debug!(
        target: "hive::genesis",
        fork = %template.fork,
        fork_height = schedule.fork_height,
        active_at_genesis = patch.block_zero().is_active(),
        accounts = patch.accounts().len(),
        "Deriving genesis"
    );
    patch.apply(provider.base_genesis())
}
