//! Consensus layer mock configuration.
//!
//! The block producer that drives a client under test advances the timestamp of every block it
//! produces by a fixed increment. [`configure`] writes the increment of a [`ForkSchedule`] into
//! such a producer so the blocks it builds agree with the activation timestamps derived from the
//! same schedule.

#![doc(issue_tracker_base_url = "https://github.com/ethereum/hive/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use core::num::NonZeroU64;
use hive_forks::{ForkSchedule, DEFAULT_BLOCK_TIME_INCREMENT, GENESIS_TIMESTAMP};
use tracing::{debug, warn};

/// A block producer whose block timestamp increment can be configured.
pub trait ConsensusMock {
    /// Returns the increment added to the timestamp of every produced block.
    fn block_timestamp_increment(&self) -> NonZeroU64;

    /// Sets the increment added to the timestamp of every produced block.
    fn set_block_timestamp_increment(&mut self, increment: NonZeroU64);

    /// Returns the number of blocks produced so far.
    fn produced_blocks(&self) -> u64;
}

/// Writes the block time increment of `schedule` into `mock`.
///
/// Must be called before `mock` produces its first block. Blocks that were already produced keep
/// the timestamps of the previous increment; this is logged but not prevented.
pub fn configure<M>(mock: &mut M, schedule: &ForkSchedule)
where
    M: ConsensusMock + ?Sized,
{
    let produced = mock.produced_blocks();
    if produced > 0 {
        warn!(
            target: "hive::clmock",
            produced,
            "Configuring block timestamp increment after blocks were produced"
        );
    }

    debug!(
        target: "hive::clmock",
        previous = mock.block_timestamp_increment().get(),
        increment = schedule.block_time_increment.get(),
        "Setting block timestamp increment"
    );
    mock.set_block_timestamp_increment(schedule.block_time_increment);
}

/// Number and timestamp of a produced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Number of the block
    pub number: u64,
    /// Timestamp of the block
    pub timestamp: u64,
}

/// In-process block producer that only tracks the chain head.
#[derive(Debug, Clone)]
pub struct ClMock {
    /// Defines the increment for block timestamps (default: 1 second)
    block_timestamp_increment: NonZeroU64,
    /// The latest produced block, or the genesis block
    latest: BlockInfo,
}

impl ClMock {
    /// Creates a mock whose chain starts at a genesis block produced at `genesis_timestamp`.
    pub const fn new(genesis_timestamp: u64) -> Self {
        Self {
            block_timestamp_increment: DEFAULT_BLOCK_TIME_INCREMENT,
            latest: BlockInfo { number: 0, timestamp: genesis_timestamp },
        }
    }

    /// Returns the latest block, or the genesis block if none was produced.
    pub const fn latest(&self) -> BlockInfo {
        self.latest
    }

    /// Produces the next block, advancing the timestamp by the configured increment.
    pub fn produce_block(&mut self) -> BlockInfo {
        self.latest = BlockInfo {
            number: self.latest.number + 1,
            timestamp: self.latest.timestamp.saturating_add(self.block_timestamp_increment.get()),
        };
        debug!(
            target: "hive::clmock",
            number = self.latest.number,
            timestamp = self.latest.timestamp,
            "Produced block"
        );
        self.latest
    }

    /// Produces `count` blocks and returns the last one.
    pub fn produce_blocks(&mut self, count: u64) -> BlockInfo {
        for _ in 0..count {
            self.produce_block();
        }
        self.latest
    }
}

impl Default for ClMock {
    fn default() -> Self {
        Self::new(GENESIS_TIMESTAMP)
    }
}

impl ConsensusMock for ClMock {
    fn block_timestamp_increment(&self) -> NonZeroU64 {
        self.block_timestamp_increment
    }

    fn set_block_timestamp_increment(&mut self, increment: NonZeroU64) {
        self.block_timestamp_increment = increment;
    }

    fn produced_blocks(&self) -> u64 {
        self.latest.number
    }
}
