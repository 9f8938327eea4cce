use core::{
    fmt,
    fmt::{Display, Formatter},
    str::FromStr,
};

/// The name of an Ethereum hardfork a fixture can schedule.
///
/// Variants are declared in activation order, so the derived [`Ord`] is the order in which the
/// upgrades must activate.
///
/// With the `serde` feature, a hardfork (de)serializes as its lower-case name, so it can be used
/// as a map key in both JSON and TOML.
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Hardfork {
    /// Shanghai: <https://github.com/ethereum/execution-specs/blob/master/network-upgrades/mainnet-upgrades/shanghai.md>.
    Shanghai,
    /// Cancun: <https://github.com/ethereum/execution-specs/blob/master/network-upgrades/mainnet-upgrades/cancun.md>.
    Cancun,
    /// Prague.
    Prague,
}

impl Hardfork {
    /// All hardforks, in activation order.
    pub const VARIANTS: &'static [Self] = &[Self::Shanghai, Self::Cancun, Self::Prague];

    /// Returns the lower-case name of the hardfork.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Shanghai => "shanghai",
            Self::Cancun => "cancun",
            Self::Prague => "prague",
        }
    }
}

impl Display for Hardfork {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a known [`Hardfork`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hardfork: {0}")]
pub struct ParseHardforkError(String);

impl FromStr for Hardfork {
    type Err = ParseHardforkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "shanghai" => Self::Shanghai,
            "cancun" => Self::Cancun,
            "prague" => Self::Prague,
            _ => return Err(ParseHardforkError(s.to_string())),
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Hardfork {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Hardfork {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <String as serde::Deserialize>::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
