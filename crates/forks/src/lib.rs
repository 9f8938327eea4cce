//! Fork activation types used by the hive fixture crates.
//!
//! This crate translates a configured fork height (the number of blocks produced before an
//! upgrade takes effect) into an absolute activation timestamp, and collects the activation
//! conditions of the upgrades a test case runs with.
//!
//! ## Feature Flags
//!
//! - `serde`: Adds `serde` support for the schedule and fork types.

#![doc(issue_tracker_base_url = "https://github.com/ethereum/hive/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod forkcondition;
mod hardfork;
mod schedule;
mod timestamps;

pub use forkcondition::ForkCondition;
pub use hardfork::{Hardfork, ParseHardforkError};
pub use schedule::{activation_timestamp, ForkSchedule, DEFAULT_BLOCK_TIME_INCREMENT};
pub use timestamps::{ForkOrderingError, UpgradeTimestamps};

/// Timestamp of the genesis block shared by every test case of a run.
pub const GENESIS_TIMESTAMP: u64 = 0x1234;
