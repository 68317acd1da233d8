use crate::auth::constants::ADDRESS_HEX_LEN;
use crate::error::AuthError;
use alloy_primitives::Address;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical wallet address: `0x` followed by 40 lowercase hex digits.
///
/// Every store and comparison keys on this form, so two spellings of the
/// same account can never hold separate challenges or watchlists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Accepts surrounding whitespace, either prefix case, and all-lower or
    /// all-upper digits. Mixed case must be a valid EIP-55 checksum.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, AuthError> {
        let trimmed = raw.as_ref().trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| invalid(trimmed, "missing 0x prefix"))?;

        if digits.len() != ADDRESS_HEX_LEN {
            return Err(invalid(trimmed, "expected 40 hex digits"));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid(trimmed, "non-hex character"));
        }

        let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            Address::parse_checksummed(format!("0x{digits}"), None)
                .map_err(|_| invalid(trimmed, "checksum mismatch"))?;
        }

        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn invalid(raw: &str, reason: &str) -> AuthError {
    AuthError::InvalidAddress(format!("{raw}: {reason}"))
}

impl From<Address> for WalletAddress {
    fn from(addr: Address) -> Self {
        Self(crypto::hex::encode_hex(addr.as_slice()))
    }
}

impl FromStr for WalletAddress {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const LOWER: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

    #[test]
    fn canonical_form_is_lowercase() {
        assert_eq!(WalletAddress::parse(CHECKSUMMED).unwrap().as_str(), LOWER);
        assert_eq!(WalletAddress::parse(LOWER).unwrap().as_str(), LOWER);
        assert_eq!(
            WalletAddress::parse(LOWER.to_ascii_uppercase().replacen("0X", "0x", 1))
                .unwrap()
                .as_str(),
            LOWER
        );
    }

    #[test]
    fn trims_and_accepts_upper_prefix() {
        let raw = format!("  0X{}\n", &LOWER[2..]);
        assert_eq!(WalletAddress::parse(raw).unwrap().as_str(), LOWER);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = WalletAddress::parse(CHECKSUMMED).unwrap();
        let twice = WalletAddress::parse(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rejects_bad_checksum() {
        // flip the case of a single letter
        let broken = CHECKSUMMED.replacen("aAeb", "aaeb", 1);
        let err = WalletAddress::parse(broken).unwrap_err();
        assert!(matches!(err, AuthError::InvalidAddress(_)));
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in [
            "",
            "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1bea",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed00",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaez",
            "0x",
        ] {
            assert!(
                matches!(WalletAddress::parse(raw), Err(AuthError::InvalidAddress(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn from_alloy_address_matches_parse() {
        let addr: Address = CHECKSUMMED.parse().unwrap();
        assert_eq!(WalletAddress::from(addr), WalletAddress::parse(LOWER).unwrap());
    }

    #[test]
    fn deserialize_normalizes() {
        let parsed: WalletAddress = serde_json::from_str(&format!("\"{CHECKSUMMED}\"")).unwrap();
        assert_eq!(parsed.as_str(), LOWER);
        assert!(serde_json::from_str::<WalletAddress>("\"0x1234\"").is_err());
    }
}
