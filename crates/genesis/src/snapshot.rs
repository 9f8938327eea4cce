use alloy_genesis::{Genesis, GenesisAccount};
use alloy_primitives::{Address, B256};
use hive_forks::ForkSchedule;
use serde::{Serialize, Serializer};

/// Header fields that only exist once Cancun is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CancunHeaderFields {
    /// Blob gas used by the block.
    pub blob_gas_used: u64,
    /// Blob gas in excess of the target, carried over to the next block.
    pub excess_blob_gas: u64,
    /// Root of the parent beacon block.
    pub parent_beacon_block_root: B256,
}

impl CancunHeaderFields {
    /// All fields at their zero value.
    pub const ZERO: Self =
        Self { blob_gas_used: 0, excess_blob_gas: 0, parent_beacon_block_root: B256::ZERO };
}

/// Whether the genesis block carries the fields of the fork under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockZeroFields {
    /// The fork is active at block zero and the genesis header carries its fields.
    Active(CancunHeaderFields),
    /// The fork activates after genesis; the fields are absent.
    #[default]
    Inactive,
}

impl BlockZeroFields {
    /// Returns the block zero fields for a fork scheduled by `schedule`.
    pub const fn for_schedule(schedule: &ForkSchedule) -> Self {
        if schedule.is_active_at_genesis() {
            Self::Active(CancunHeaderFields::ZERO)
        } else {
            Self::Inactive
        }
    }

    /// Returns true if the fork is active at block zero.
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Returns the header fields if the fork is active at block zero.
    pub const fn as_active(&self) -> Option<&CancunHeaderFields> {
        match self {
            Self::Active(fields) => Some(fields),
            Self::Inactive => None,
        }
    }
}

/// A derived genesis, ready to bootstrap a client under test.
///
/// Serializes to geth-style genesis JSON. The Cancun header fields are only written when they are
/// active at block zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisSnapshot {
    genesis: Genesis,
    block_zero: BlockZeroFields,
}

impl GenesisSnapshot {
    /// Creates a snapshot, writing the blob gas fields of `genesis` from `block_zero`.
    pub fn new(mut genesis: Genesis, block_zero: BlockZeroFields) -> Self {
        let fields = block_zero.as_active();
        genesis.blob_gas_used = fields.map(|fields| fields.blob_gas_used);
        genesis.excess_blob_gas = fields.map(|fields| fields.excess_blob_gas);
        Self { genesis, block_zero }
    }

    /// The underlying genesis.
    pub const fn genesis(&self) -> &Genesis {
        &self.genesis
    }

    /// The block zero fields of the fork under test.
    pub const fn block_zero(&self) -> &BlockZeroFields {
        &self.block_zero
    }

    /// Root of the parent beacon block, if Cancun is active at block zero.
    pub fn parent_beacon_block_root(&self) -> Option<B256> {
        self.block_zero.as_active().map(|fields| fields.parent_beacon_block_root)
    }

    /// Returns the genesis account at `address`.
    pub fn account(&self, address: &Address) -> Option<&GenesisAccount> {
        self.genesis.alloc.get(address)
    }
}

impl Serialize for GenesisSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Repr<'a> {
            #[serde(flatten)]
            genesis: &'a Genesis,
            #[serde(skip_serializing_if = "Option::is_none")]
            parent_beacon_block_root: Option<B256>,
        }

        Repr { genesis: &self.genesis, parent_beacon_block_root: self.parent_beacon_block_root() }
            .serialize(serializer)
    }
}
