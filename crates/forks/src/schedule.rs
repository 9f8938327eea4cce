use crate::{ForkCondition, GENESIS_TIMESTAMP};
use core::num::NonZeroU64;

/// Timestamp increment between consecutive blocks used unless a test case overrides it.
pub const DEFAULT_BLOCK_TIME_INCREMENT: NonZeroU64 = NonZeroU64::MIN;

/// Calculates the timestamp at which a fork activates given the amount of blocks that need to be
/// produced beforehand.
///
/// A `fork_height` of zero activates the fork at `genesis_timestamp`. The arithmetic saturates at
/// [`u64::MAX`].
pub const fn activation_timestamp(
    fork_height: u64,
    block_time_increment: NonZeroU64,
    genesis_timestamp: u64,
) -> u64 {
    genesis_timestamp.saturating_add(fork_height.saturating_mul(block_time_increment.get()))
}

/// The height-relative activation of a single fork.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkSchedule {
    /// Number of blocks produced before the fork activates.
    pub fork_height: u64,
    /// Timestamp increment between consecutive blocks.
    pub block_time_increment: NonZeroU64,
    /// Timestamp of the genesis block.
    pub genesis_timestamp: u64,
}

impl ForkSchedule {
    /// Creates a new schedule.
    pub const fn new(
        fork_height: u64,
        block_time_increment: NonZeroU64,
        genesis_timestamp: u64,
    ) -> Self {
        Self { fork_height, block_time_increment, genesis_timestamp }
    }

    /// Creates a schedule with the default block time increment and [`GENESIS_TIMESTAMP`].
    pub const fn at_height(fork_height: u64) -> Self {
        Self::new(fork_height, DEFAULT_BLOCK_TIME_INCREMENT, GENESIS_TIMESTAMP)
    }

    /// Timestamp delta between genesis and the fork.
    pub const fn genesis_time_delta(&self) -> u64 {
        self.fork_height.saturating_mul(self.block_time_increment.get())
    }

    /// Absolute timestamp at which the fork activates.
    pub const fn activation_timestamp(&self) -> u64 {
        activation_timestamp(self.fork_height, self.block_time_increment, self.genesis_timestamp)
    }

    /// Returns true if the fork is active from the genesis block on.
    pub const fn is_active_at_genesis(&self) -> bool {
        self.fork_height == 0
    }

    /// Timestamp of the block at `block_number` when every block advances the clock by exactly
    /// the configured increment.
    pub const fn block_timestamp(&self, block_number: u64) -> u64 {
        activation_timestamp(block_number, self.block_time_increment, self.genesis_timestamp)
    }

    /// The activation condition of the fork.
    pub const fn condition(&self) -> ForkCondition {
        ForkCondition::Timestamp(self.activation_timestamp())
    }
}

impl Default for ForkSchedule {
    fn default() -> Self {
        Self::at_height(0)
    }
}
