use core::num::NonZeroU64;
use hive_clmock::{configure, ConsensusMock};
use hive_forks::{
    ForkSchedule, Hardfork, UpgradeTimestamps, DEFAULT_BLOCK_TIME_INCREMENT, GENESIS_TIMESTAMP,
};
use hive_genesis::{
    derive_genesis, BaseGenesisProvider, GenesisPatch, GenesisSnapshot, GenesisTemplate,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters shared by every Cancun conformance test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CancunBaseSpec {
    /// Number of blocks produced before Cancun activates.
    pub cancun_fork_height: u64,
    /// Timestamp increment between consecutive blocks.
    pub block_time_increment: NonZeroU64,
    /// Timestamp of the genesis block.
    pub genesis_timestamp: u64,
    /// Absolute activations of the forks after Cancun, e.g. to schedule Prague.
    ///
    /// Shanghai and Cancun are derived from the fields above; entries for them are rejected by
    /// [`CancunBaseSpec::validate`] and ignored by [`CancunBaseSpec::fork_config`].
    #[serde(skip_serializing_if = "UpgradeTimestamps::is_empty")]
    pub extra_forks: UpgradeTimestamps,
    /// Accounts injected into the genesis.
    pub template: GenesisTemplate,
}

impl CancunBaseSpec {
    /// Creates a spec that activates Cancun after `cancun_fork_height` blocks.
    pub fn new(cancun_fork_height: u64) -> Self {
        Self { cancun_fork_height, ..Default::default() }
    }

    /// Sets the timestamp increment between consecutive blocks.
    pub const fn with_block_time_increment(mut self, increment: NonZeroU64) -> Self {
        self.block_time_increment = increment;
        self
    }

    /// Schedules `fork` at the absolute `timestamp`.
    pub fn with_extra_fork(mut self, fork: Hardfork, timestamp: u64) -> Self {
        self.extra_forks.insert(fork, timestamp);
        self
    }

    /// Get the per-block timestamp increments configured for this test.
    pub const fn block_time_increment(&self) -> NonZeroU64 {
        self.block_time_increment
    }

    /// The height-relative activation of Cancun.
    pub const fn schedule(&self) -> ForkSchedule {
        ForkSchedule::new(
            self.cancun_fork_height,
            self.block_time_increment,
            self.genesis_timestamp,
        )
    }

    /// Timestamp delta between genesis and the Cancun fork.
    pub const fn cancun_genesis_time_delta(&self) -> u64 {
        self.schedule().genesis_time_delta()
    }

    /// Calculates the Cancun fork timestamp given the amount of blocks that need to be produced
    /// beforehand.
    pub const fn cancun_fork_time(&self) -> u64 {
        self.schedule().activation_timestamp()
    }

    /// Generates the fork config: Shanghai is active from genesis, Cancun activates at
    /// [`Self::cancun_fork_time`], later forks at their [`Self::extra_forks`] timestamps.
    pub fn fork_config(&self) -> UpgradeTimestamps {
        let mut forks = UpgradeTimestamps::new()
            .with_fork(Hardfork::Shanghai, self.genesis_timestamp)
            .with_fork(Hardfork::Cancun, self.cancun_fork_time());
        for (fork, condition) in self.extra_forks.forks_iter() {
            if let Some(timestamp) = condition.as_timestamp().filter(|_| !is_derived(fork)) {
                forks.insert(fork, timestamp);
            }
        }
        forks
    }

    /// Returns the first [`Self::extra_forks`] entry that redefines a derived fork.
    pub(crate) fn derived_fork_override(&self) -> Option<Hardfork> {
        self.extra_forks.forks_iter().map(|(fork, _)| fork).find(|fork| is_derived(*fork))
    }

    /// Returns the activation timestamp of `fork`, or `None` if the test never activates it.
    pub fn activation_timestamp(&self, fork: Hardfork) -> Option<u64> {
        self.fork_config().activation_timestamp(fork)
    }

    /// Derives the genesis of the test from the base genesis of `provider`.
    pub fn genesis<P>(&self, provider: &P) -> GenesisSnapshot
    where
        P: BaseGenesisProvider + ?Sized,
    {
        derive_genesis(provider, &self.schedule(), &self.template)
    }

    /// Derives the genesis of the test and writes the fork config into its chain config.
    pub fn genesis_with_fork_timestamps<P>(&self, provider: &P) -> GenesisSnapshot
    where
        P: BaseGenesisProvider + ?Sized,
    {
        let forks = self.fork_config();
        debug!(target: "hive::cancun", ?forks, "Embedding fork timestamps in genesis");
        GenesisPatch::new(&self.schedule(), &self.template)
            .with_fork_timestamps(forks)
            .apply(provider.base_genesis())
    }

    /// Changes the CL mock's default time increments of 1 to the value specified in the test
    /// spec.
    pub fn configure_cl_mock<M>(&self, cl: &mut M)
    where
        M: ConsensusMock + ?Sized,
    {
        configure(cl, &self.schedule());
    }
}

/// Forks whose activation follows from the genesis timestamp and the Cancun fork height.
const fn is_derived(fork: Hardfork) -> bool {
    matches!(fork, Hardfork::Shanghai | Hardfork::Cancun)
}

impl Default for CancunBaseSpec {
    fn default() -> Self {
        Self {
            cancun_fork_height: 0,
            block_time_increment: DEFAULT_BLOCK_TIME_INCREMENT,
            genesis_timestamp: GENESIS_TIMESTAMP,
            extra_forks: UpgradeTimestamps::default(),
            template: GenesisTemplate::cancun(),
        }
    }
}
