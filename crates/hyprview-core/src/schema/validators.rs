//! String validators shared by the record schemas

use std::fmt;
use std::num::ParseIntError;
use std::ops::Deref;

use serde::Serialize;

use crate::error::ValidationReason;

const HEX_PREFIX: &str = "0x";

/// Whether `value` matches `^(0x)?[0-9a-fA-F]+$`
pub fn is_hex(value: &str) -> bool {
    let digits = value.strip_prefix(HEX_PREFIX).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A validated hexadecimal address such as `0x55d1c0a3f2b0`
///
/// The original spelling is kept; equality of two addresses in the sense of
/// "same window" should go through [`HexAddress::to_u64`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexAddress(String);

impl HexAddress {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationReason> {
        let value = value.into();
        if is_hex(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationReason::NotHex { value })
        }
    }

    /// Parse an optional address where the empty string means "none"
    pub fn parse_optional(value: impl Into<String>) -> Result<Option<Self>, ValidationReason> {
        let value = value.into();
        if value.is_empty() {
            return Ok(None);
        }
        Self::parse(value).map(Some)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hex digits without the `0x` prefix
    pub fn digits(&self) -> &str {
        self.0.strip_prefix(HEX_PREFIX).unwrap_or(&self.0)
    }

    /// Integer value of the address, computed on every call
    pub fn to_u64(&self) -> Result<u64, ParseIntError> {
        u64::from_str_radix(self.digits(), 16)
    }
}

impl fmt::Display for HexAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A string that is guaranteed not to be empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationReason> {
        let value = value.into();
        if value.is_empty() {
            Err(ValidationReason::Empty)
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
