use crate::{ForkCondition, Hardfork};
use std::collections::BTreeMap;

/// Activation timestamps of the upgrades a test case runs with, keyed in activation order.
///
/// Forks that are not part of the record are never activated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UpgradeTimestamps {
    forks: BTreeMap<Hardfork, u64>,
}

impl UpgradeTimestamps {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `fork` at `timestamp`, replacing any previous activation.
    pub fn with_fork(mut self, fork: Hardfork, timestamp: u64) -> Self {
        self.insert(fork, timestamp);
        self
    }

    /// Schedules `fork` at `timestamp`, returning the previous activation if any.
    pub fn insert(&mut self, fork: Hardfork, timestamp: u64) -> Option<u64> {
        self.forks.insert(fork, timestamp)
    }

    /// Retrieves the activation condition of `fork`.
    pub fn fork(&self, fork: Hardfork) -> ForkCondition {
        self.activation_timestamp(fork).map_or(ForkCondition::Never, ForkCondition::Timestamp)
    }

    /// Returns the activation timestamp of `fork`, or `None` if it is not scheduled.
    pub fn activation_timestamp(&self, fork: Hardfork) -> Option<u64> {
        self.forks.get(&fork).copied()
    }

    /// Convenience method to check if a fork is active at a given timestamp.
    pub fn is_fork_active_at_timestamp(&self, fork: Hardfork, timestamp: u64) -> bool {
        self.fork(fork).active_at_timestamp(timestamp)
    }

    /// Returns the scheduled forks in activation order.
    pub fn forks_iter(&self) -> impl Iterator<Item = (Hardfork, ForkCondition)> + '_ {
        self.forks.iter().map(|(fork, timestamp)| (*fork, ForkCondition::Timestamp(*timestamp)))
    }

    /// Returns the number of scheduled forks.
    pub fn len(&self) -> usize {
        self.forks.len()
    }

    /// Returns true if no fork is scheduled.
    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// Checks that every fork activates at or before the forks that follow it.
    ///
    /// Returns the first adjacent pair that is out of order.
    pub fn validate_ordering(&self) -> Result<(), ForkOrderingError> {
        let mut scheduled = self.forks.iter();
        let Some(mut previous) = scheduled.next() else { return Ok(()) };

        for current in scheduled {
            if previous.1 > current.1 {
                return Err(ForkOrderingError {
                    earlier: *previous.0,
                    earlier_timestamp: *previous.1,
                    later: *current.0,
                    later_timestamp: *current.1,
                })
            }
            previous = current;
        }

        Ok(())
    }
}

/// A fork activates after a fork that must follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "{earlier} activates at {earlier_timestamp}, after {later} which activates at {later_timestamp}"
)]
pub struct ForkOrderingError {
    /// The fork that must activate first.
    pub earlier: Hardfork,
    /// Activation timestamp of the earlier fork.
    pub earlier_timestamp: u64,
    /// The fork that must activate last.
    pub later: Hardfork,
    /// Activation timestamp of the later fork.
    pub later_timestamp: u64,
}
