use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::EncodingError;

/// 32-byte account address or object ID.
///
/// Parsing accepts the short hex form (`0x6`) and left-pads it with zeros,
/// both forms render as the full 64-digit lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(derive_more::Debug, derive_more::Display)]
#[debug("0x{}", hex::encode(_0))]
#[display("0x{}", hex::encode(_0))]
pub struct Address([u8; Address::LENGTH]);

/// ID of an on-chain object, shares the address space with accounts.
pub type ObjectId = Address;

impl Address {
    pub const LENGTH: usize = 32;

    pub const ZERO: Self = Self([0; Self::LENGTH]);

    /// Shared system clock object.
    pub const CLOCK: Self = Self::from_low_u8(6);

    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    const fn from_low_u8(value: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[Self::LENGTH - 1] = value;
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    /// Hex form without `0x` prefix, as used inside Move type names.
    pub fn to_canonical_string(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Address {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EncodingError::InvalidAddress(s.to_string());
        let digits = s.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        if digits.is_empty() || digits.len() > Self::LENGTH * 2 {
            return Err(invalid());
        }
        let padded = format!("{:0>width$}", digits, width = Self::LENGTH * 2);
        let mut bytes = [0; Self::LENGTH];
        hex::decode_to_slice(padded, &mut bytes).map_err(|_| invalid())?;
        Ok(Self(bytes))
    }
}

impl From<[u8; Address::LENGTH]> for Address {
    fn from(value: [u8; Address::LENGTH]) -> Self {
        Self(value)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
