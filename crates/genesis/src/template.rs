//! Versioned description of the accounts injected into a derived genesis.

use alloy_eips::eip4788::BEACON_ROOTS_ADDRESS;
use alloy_genesis::GenesisAccount;
use alloy_primitives::{address, Address, Bytes, B256, U256};
use hive_forks::Hardfork;
use serde::{Deserialize, Serialize};

/// EVM opcodes used by the probe bytecode.
pub mod opcode {
    /// `PUSH0`
    pub const PUSH0: u8 = 0x5f;
    /// `PUSH1`
    pub const PUSH1: u8 = 0x60;
    /// `DUP1`
    pub const DUP1: u8 = 0x80;
    /// `BLOBHASH`, introduced as `DATAHASH` by EIP-4844.
    pub const BLOBHASH: u8 = 0x49;
    /// `SSTORE`
    pub const SSTORE: u8 = 0x55;
}

/// First address of the Cancun `BLOBHASH` probe range.
pub const BLOBHASH_START_ADDRESS: Address = address!("0000000000000000000000000000000000020000");

/// Number of Cancun `BLOBHASH` probe accounts.
pub const BLOBHASH_ADDRESS_COUNT: u64 = 1000;

/// Blob indices read by the Cancun probe bytecode.
pub const BLOBHASH_PROBE_INDICES: [u8; 4] = [0, 1, 2, 3];

/// Builds bytecode that, for every index, stores `BLOBHASH(index)` in the storage slot `index`.
///
/// Index zero is pushed with `PUSH0`, every other index with `PUSH1`.
pub fn blobhash_probe_code(indices: &[u8]) -> Bytes {
    let mut code = Vec::with_capacity(indices.len() * 5);
    for &index in indices {
        if index == 0 {
            code.push(opcode::PUSH0);
        } else {
            code.extend([opcode::PUSH1, index]);
        }
        code.extend([opcode::DUP1, opcode::BLOBHASH, opcode::SSTORE]);
    }
    code.into()
}

/// A contiguous range of accounts that share the same bytecode and hold no balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeTemplate {
    /// First address of the range.
    pub start: Address,
    /// Number of consecutive addresses in the range.
    pub count: u64,
    /// Bytecode deployed at every address of the range.
    pub code: Bytes,
}

impl ProbeTemplate {
    /// The Cancun `BLOBHASH` probes.
    pub fn cancun() -> Self {
        Self {
            start: BLOBHASH_START_ADDRESS,
            count: BLOBHASH_ADDRESS_COUNT,
            code: blobhash_probe_code(&BLOBHASH_PROBE_INDICES),
        }
    }

    /// Returns the addresses of the range, starting at [`ProbeTemplate::start`].
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        let start = U256::from_be_slice(self.start.as_slice());
        (0..self.count).map(move |offset| {
            let word = start.wrapping_add(U256::from(offset)).to_be_bytes::<32>();
            Address::from_word(B256::from(word))
        })
    }

    /// The genesis account deployed at every address of the range.
    pub fn account(&self) -> GenesisAccount {
        GenesisAccount::default().with_code(Some(self.code.clone())).with_balance(U256::ZERO)
    }
}

/// A system contract account that must not be cleared as empty after block execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemAccount {
    /// Address of the system contract.
    pub address: Address,
    /// Balance assigned at genesis.
    pub balance: U256,
}

/// Precompile address of the beacon roots history storage in early EIP-4788 drafts.
pub const HISTORY_STORAGE_ADDRESS: Address = address!("000000000000000000000000000000000000000b");

impl SystemAccount {
    /// The EIP-4788 beacon roots contract, funded with 1 wei.
    ///
    /// This is the account of [`GenesisTemplate::cancun`].
    pub const fn beacon_roots() -> Self {
        Self { address: BEACON_ROOTS_ADDRESS, balance: U256::from_limbs([1, 0, 0, 0]) }
    }

    /// The history storage precompile of early EIP-4788 drafts, funded with 1 wei.
    ///
    /// Clients built against those drafts expect the beacon roots at [`HISTORY_STORAGE_ADDRESS`]
    /// rather than at the deployed contract.
    pub const fn history_storage() -> Self {
        Self { address: HISTORY_STORAGE_ADDRESS, balance: U256::from_limbs([1, 0, 0, 0]) }
    }

    /// The genesis account for this system contract.
    pub fn account(&self) -> GenesisAccount {
        GenesisAccount::default().with_balance(self.balance)
    }
}

/// Accounts injected into the genesis of a fork conformance test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisTemplate {
    /// The fork whose semantics the accounts probe.
    pub fork: Hardfork,
    /// Probe account range.
    pub probes: ProbeTemplate,
    /// System accounts kept alive with a balance.
    #[serde(default)]
    pub system_accounts: Vec<SystemAccount>,
}

impl GenesisTemplate {
    /// Accounts for Cancun tests: `BLOBHASH` probes and the beacon roots contract.
    pub fn cancun() -> Self {
        Self {
            fork: Hardfork::Cancun,
            probes: ProbeTemplate::cancun(),
            system_accounts: vec![SystemAccount::beacon_roots()],
        }
    }

    /// Accounts for Cancun tests against clients that implement an early EIP-4788 draft: the
    /// `BLOBHASH` probes and the history storage precompile.
    pub fn cancun_history_storage() -> Self {
        Self { system_accounts: vec![SystemAccount::history_storage()], ..Self::cancun() }
    }
}

impl Default for GenesisTemplate {
    fn default() -> Self {
        Self::cancun()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::bytes;

    #[test]
    fn cancun_probe_code() {
        assert_eq!(
            ProbeTemplate::cancun().code,
            bytes!("5f804955600180495560028049556003804955")
        );
    }

    #[test]
    fn probe_code_layout() {
        assert_eq!(blobhash_probe_code(&[]), Bytes::new());
        assert_eq!(
            blobhash_probe_code(&[0]),
            Bytes::from_static(&[opcode::PUSH0, opcode::DUP1, opcode::BLOBHASH, opcode::SSTORE])
        );
        assert_eq!(
            blobhash_probe_code(&[7]),
            Bytes::from_static(&[
                opcode::PUSH1,
                7,
                opcode::DUP1,
                opcode::BLOBHASH,
                opcode::SSTORE
            ])
        );
    }

    #[test]
    fn probe_addresses_are_consecutive() {
        let probes = ProbeTemplate { count: 3, ..ProbeTemplate::cancun() };
        let addresses: Vec<_> = probes.addresses().collect();
        assert_eq!(
            addresses,
            vec![
                address!("0000000000000000000000000000000000020000"),
                address!("0000000000000000000000000000000000020001"),
                address!("0000000000000000000000000000000000020002"),
            ]
        );
    }

    #[test]
    fn probe_addresses_carry_into_next_byte() {
        let probes = ProbeTemplate {
            start: address!("00000000000000000000000000000000000000ff"),
            count: 2,
            code: Bytes::new(),
        };
        let addresses: Vec<_> = probes.addresses().collect();
        assert_eq!(addresses[1], address!("0000000000000000000000000000000000000100"));
    }

    #[test]
    fn beacon_roots_holds_one_wei() {
        let account = SystemAccount::beacon_roots();
        assert_eq!(account.address, BEACON_ROOTS_ADDRESS);
        assert_eq!(account.balance, U256::from(1));
        assert_eq!(account.account().code, None);
    }

    #[test]
    fn history_storage_holds_one_wei() {
        let account = SystemAccount::history_storage();
        assert_eq!(account.address, address!("000000000000000000000000000000000000000b"));
        assert_eq!(account.balance, U256::from(1));

        let template = GenesisTemplate::cancun_history_storage();
        assert_eq!(template.system_accounts, vec![account]);
        assert_eq!(template.probes, ProbeTemplate::cancun());
    }

    #[test]
    fn default_template_is_cancun() {
        assert_eq!(GenesisTemplate::default(), GenesisTemplate::cancun());
        assert_eq!(GenesisTemplate::default().fork, Hardfork::Cancun);
    }
}
