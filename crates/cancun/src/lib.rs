//! Cancun fork conformance test parameters.
//!
//! [`CancunBaseSpec`] holds the configuration every Cancun test case shares and derives from it
//! the fork activation timestamps, the genesis the client under test starts from, and the block
//! timestamp increment of the CL mock.
//!
//! # Example
//!
//! ```
//! use alloy_genesis::Genesis;
//! use hive_cancun::CancunBaseSpec;
//! use hive_clmock::ClMock;
//! use hive_forks::Hardfork;
//!
//! let spec = CancunBaseSpec::new(5);
//! let genesis = spec.genesis(&Genesis::default());
//! assert!(!genesis.block_zero().is_active());
//!
//! let mut cl = ClMock::new(spec.genesis_timestamp);
//! spec.configure_cl_mock(&mut cl);
//! assert_eq!(
//!     cl.produce_blocks(5).timestamp,
//!     spec.activation_timestamp(Hardfork::Cancun).unwrap()
//! );
//! ```

#![doc(issue_tracker_base_url = "https://github.com/ethereum/hive/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod config;
mod spec;

pub use config::ConfigError;
pub use spec::CancunBaseSpec;
