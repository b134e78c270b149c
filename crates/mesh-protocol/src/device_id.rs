//! Device identity
//!
//! A device is identified by the SHA-256 digest of its certificate. The
//! textual form is base32 with a Luhn mod 32 check character after every
//! thirteen characters, printed in dash-separated chunks of seven:
//!
//! ```text
//! 7777777-777777N-7777777-777777N-7777777-777777N-7777777-77777Q4
//! ```

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::luhn;
use crate::{Error, Result};

/// Length of a device identity in bytes.
pub const DEVICE_ID_LEN: usize = 32;

/// Fixed-length device identity.
///
/// Equality, hashing and ordering all operate on the raw bytes, so sorting by
/// `DeviceId` is the same total order wherever it is used.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DeviceId([u8; DEVICE_ID_LEN]);

impl DeviceId {
    /// Wrap raw identity bytes.
    pub const fn from_bytes(bytes: [u8; DEVICE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Derive the identity of the device presenting this certificate.
    pub fn from_certificate(der: &[u8]) -> Self {
        let digest = Sha256::digest(der);
        let mut bytes = [0u8; DEVICE_ID_LEN];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DEVICE_ID_LEN] {
        &self.0
    }

    /// First chunk of the textual form, for log lines.
    pub fn short(&self) -> String {
        let plain = BASE32_NOPAD.encode(&self.0);
        plain[..7].to_string()
    }
}

impl TryFrom<&[u8]> for DeviceId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; DEVICE_ID_LEN] =
            bytes.try_into().map_err(|_| Error::InvalidByteLength {
                len: bytes.len(),
                expected: DEVICE_ID_LEN,
            })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = BASE32_NOPAD.encode(&self.0);
        let checked = luhn::luhnify(&plain).map_err(|_| fmt::Error)?;
        f.write_str(&luhn::chunkify(&checked))
    }
}

impl fmt::Debug for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceId({self})")
    }
}

/// Characters commonly mistyped for base32 letters.
fn untypeo(ch: char) -> char {
    match ch {
        '0' => 'O',
        '1' => 'I',
        '8' => 'B',
        other => other,
    }
}

impl FromStr for DeviceId {
    type Err = Error;

    /// Accepts the checked 56-character form and the unchecked 52-character
    /// form written by early releases, with or without dashes and spaces, in
    /// either case.
    fn from_str(s: &str) -> Result<Self> {
        let cleaned: String = s
            .chars()
            .filter(|c| *c != '-' && *c != ' ')
            .map(|c| untypeo(c.to_ascii_uppercase()))
            .collect();

        if let Some(ch) = cleaned.chars().find(|c| !c.is_ascii()) {
            return Err(Error::InvalidCharacter { ch });
        }

        let plain = match cleaned.len() {
            56 => luhn::unluhnify(&cleaned)?,
            52 => cleaned,
            len => return Err(Error::InvalidLength { len }),
        };

        let bytes = BASE32_NOPAD
            .decode(plain.as_bytes())
            .map_err(|e| Error::Base32 {
                message: e.to_string(),
            })?;
        Self::try_from(bytes.as_slice())
    }
}

impl Serialize for DeviceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeviceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
