//! Genesis derivation against a geth-style base genesis.

use alloy_genesis::Genesis;
use alloy_primitives::{address, bytes, B256, U256};
use assert_matches::assert_matches;
use hive_cancun::{CancunBaseSpec, ConfigError};
use hive_clmock::ClMock;
use hive_forks::{Hardfork, UpgradeTimestamps};
use hive_genesis::{
    template::{BLOBHASH_ADDRESS_COUNT, BLOBHASH_START_ADDRESS},
    BlockZeroFields, CancunHeaderFields, GenesisFn, SystemAccount,
};
use std::{io::Write, num::NonZeroU64, sync::Arc};

const BASE_GENESIS: &str = include_str!("assets/base_genesis.json");

fn base_genesis() -> Genesis {
    serde_json::from_str(BASE_GENESIS).unwrap()
}

fn spec(height: u64, genesis_timestamp: u64) -> CancunBaseSpec {
    CancunBaseSpec { cancun_fork_height: height, genesis_timestamp, ..Default::default() }
}

#[test]
fn cancun_after_five_blocks() {
    hive_tracing::init_test_tracing();

    let spec = spec(5, 1000);
    assert_eq!(spec.cancun_fork_time(), 1005);
    assert_eq!(
        spec.fork_config(),
        UpgradeTimestamps::new()
            .with_fork(Hardfork::Shanghai, 1000)
            .with_fork(Hardfork::Cancun, 1005)
    );

    let snapshot = spec.genesis(&base_genesis());
    assert_matches!(snapshot.block_zero(), BlockZeroFields::Inactive);
    assert_eq!(snapshot.genesis().blob_gas_used, None);
    assert_eq!(snapshot.genesis().excess_blob_gas, None);
    assert_eq!(snapshot.parent_beacon_block_root(), None);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert!(json.get("blobGasUsed").is_none());
    assert!(json.get("parentBeaconBlockRoot").is_none());
}

#[test]
fn cancun_at_genesis() {
    hive_tracing::init_test_tracing();

    let spec = spec(0, 1000);
    assert_eq!(spec.cancun_fork_time(), 1000);

    let snapshot = spec.genesis(&base_genesis());
    assert_eq!(*snapshot.block_zero(), BlockZeroFields::Active(CancunHeaderFields::ZERO));
    assert_eq!(snapshot.genesis().blob_gas_used, Some(0));
    assert_eq!(snapshot.genesis().excess_blob_gas, Some(0));
    assert_eq!(snapshot.parent_beacon_block_root(), Some(B256::ZERO));

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["parentBeaconBlockRoot"], serde_json::json!(B256::ZERO));
}

#[test]
fn genesis_timestamp_matches_fork_config() {
    let base = base_genesis();
    let spec = CancunBaseSpec::default();
    assert_ne!(base.timestamp, spec.genesis_timestamp);

    let snapshot = spec.genesis_with_fork_timestamps(&base);
    let genesis = snapshot.genesis();
    assert_eq!(genesis.timestamp, spec.genesis_timestamp);
    assert!(snapshot.block_zero().is_active());

    let forks = spec.fork_config();
    assert!(forks.is_fork_active_at_timestamp(Hardfork::Shanghai, genesis.timestamp));
    assert!(forks.is_fork_active_at_timestamp(Hardfork::Cancun, genesis.timestamp));
    assert_eq!(genesis.config.cancun_time, Some(genesis.timestamp));
}

#[test]
fn legacy_consensus_is_disabled() {
    let base = base_genesis();
    assert!(base.config.clique.is_some());

    let snapshot = spec(3, 1000).genesis(&base);
    let genesis = snapshot.genesis();
    assert_eq!(genesis.difficulty, U256::ZERO);
    assert_eq!(genesis.config.terminal_total_difficulty, Some(U256::ZERO));
    assert!(genesis.config.clique.is_none());
    assert!(genesis.extra_data.is_empty());

    // untouched fields survive
    assert_eq!(genesis.config.chain_id, base.config.chain_id);
    assert_eq!(genesis.gas_limit, base.gas_limit);
    assert_eq!(genesis.base_fee_per_gas, base.base_fee_per_gas);
}

#[test]
fn base_genesis_is_not_mutated() {
    let base = Arc::new(base_genesis());
    let _ = spec(0, 1000).genesis(&base);
    assert_eq!(base.difficulty, U256::from(0x20000));
    assert!(base.config.clique.is_some());
}

#[test]
fn injects_blobhash_probes_and_beacon_roots() {
    let snapshot = spec(1, 1000).genesis(&GenesisFn(base_genesis));
    let code = bytes!("5f804955600180495560028049556003804955");

    let first = snapshot.account(&BLOBHASH_START_ADDRESS).unwrap();
    assert_eq!(first.code, Some(code.clone()));
    assert_eq!(first.balance, U256::ZERO);

    let last = snapshot.account(&address!("00000000000000000000000000000000000203e7")).unwrap();
    assert_eq!(last.code, Some(code));
    assert!(snapshot.account(&address!("00000000000000000000000000000000000203e8")).is_none());

    let beacon_roots = SystemAccount::beacon_roots();
    assert_eq!(snapshot.account(&beacon_roots.address).unwrap().balance, U256::from(1));

    // base accounts, probes, beacon roots
    assert_eq!(snapshot.genesis().alloc.len(), 2 + BLOBHASH_ADDRESS_COUNT as usize + 1);
    assert!(snapshot.account(&address!("a94f5374fce5edbc8e2a8697c15331677e6ebf0b")).is_some());
}

#[test]
fn fork_timestamps_are_embedded_on_request() {
    let spec = spec(5, 1000).with_extra_fork(Hardfork::Prague, 1020);

    let plain = spec.genesis(&base_genesis());
    assert_eq!(plain.genesis().config.cancun_time, None);

    let embedded = spec.genesis_with_fork_timestamps(&base_genesis());
    let config = &embedded.genesis().config;
    assert_eq!(config.shanghai_time, Some(1000));
    assert_eq!(config.cancun_time, Some(1005));
    assert_eq!(config.prague_time, Some(1020));
}

#[test]
fn cl_mock_lands_on_cancun_activation() {
    hive_tracing::init_test_tracing();

    for (height, increment) in [(0, 1), (1, 1), (5, 1), (4, 12), (10, 3)] {
        let spec =
            spec(height, 1000).with_block_time_increment(NonZeroU64::new(increment).unwrap());
        let mut cl = ClMock::new(spec.genesis_timestamp);
        spec.configure_cl_mock(&mut cl);

        let forks = spec.fork_config();
        let head = cl.produce_blocks(height);
        assert_eq!(head.timestamp, spec.cancun_fork_time());
        assert!(forks.is_fork_active_at_timestamp(Hardfork::Cancun, head.timestamp));
        if height > 0 {
            let parent = head.timestamp - increment;
            assert!(!forks.is_fork_active_at_timestamp(Hardfork::Cancun, parent));
        }
    }
}

#[test]
fn loads_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
cancun_fork_height = 2
block_time_increment = 6
genesis_timestamp = 4660
"#
    )
    .unwrap();

    let spec = CancunBaseSpec::from_path(file.path()).unwrap();
    assert_eq!(spec.cancun_fork_time(), 4660 + 12);
    assert_eq!(spec.template.fork, Hardfork::Cancun);
}

#[test]
fn rejects_misordered_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
cancun_fork_height = 10
genesis_timestamp = 100

[extra_forks]
prague = 105
"#
    )
    .unwrap();

    let err = CancunBaseSpec::from_path(file.path()).unwrap_err();
    assert_matches!(err, ConfigError::Ordering(_));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[extra_forks]\ncancun = 5000\n").unwrap();
    let err = CancunBaseSpec::from_path(file.path()).unwrap_err();
    assert_matches!(err, ConfigError::DerivedFork(Hardfork::Cancun));
}
