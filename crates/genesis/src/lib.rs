//! Genesis derivation for fork conformance fixtures.
//!
//! A [`GenesisPatch`] is computed from a [`ForkSchedule`](hive_forks::ForkSchedule) and a
//! [`GenesisTemplate`], then applied to an upgrade-agnostic base genesis. The result is a new
//! [`GenesisSnapshot`] with legacy consensus disabled, the block zero fields of the fork under
//! test set when the fork is active at genesis, and the template's probe and system accounts
//! injected.
//!
//! # Example
//!
//! ```
//! use alloy_genesis::Genesis;
//! use hive_forks::ForkSchedule;
//! use hive_genesis::{derive_genesis, GenesisTemplate};
//!
//! let schedule = ForkSchedule::at_height(0);
//! let snapshot = derive_genesis(&Genesis::default(), &schedule, &GenesisTemplate::cancun());
//! assert!(snapshot.block_zero().is_active());
//! ```

#![doc(issue_tracker_base_url = "https://github.com/ethereum/hive/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod patch;
mod snapshot;
pub mod template;

pub use patch::{derive_genesis, BaseGenesisProvider, GenesisFn, GenesisPatch};
pub use snapshot::{BlockZeroFields, CancunHeaderFields, GenesisSnapshot};
pub use template::{GenesisTemplate, ProbeTemplate, SystemAccount};
