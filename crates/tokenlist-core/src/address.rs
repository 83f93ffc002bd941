//! # EIP-55 Checksummed Addresses
//!
//! An EVM account address is 20 bytes, written as 40 hex digits after `0x`.
//! EIP-55 encodes a checksum in the letter case: hash the lowercase hex
//! digits with Keccak-256, then uppercase every letter whose corresponding
//! hash nibble is 8 or higher.
//!
//! ## Invariant
//!
//! A `ChecksumAddress` always holds the canonical `0x`-prefixed EIP-55 form.
//! The only constructors compute that form, so any value of this type can be
//! compared byte-for-byte against a curator-supplied string to decide
//! whether the string was checksummed.

use std::fmt;

use sha3::{Digest, Keccak256};

use crate::error::AddressError;

/// Number of hex digits in an address, excluding the `0x` prefix.
pub const ADDRESS_HEX_LEN: usize = 40;

/// A 20-byte account address rendered in EIP-55 checksum form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChecksumAddress(String);

impl ChecksumAddress {
    /// Parse an address in any letter case and compute its checksum form.
    ///
    /// Accepts 40 hex digits with or without a `0x` prefix. Mixed-case input
    /// is accepted even when its case is wrong; callers that require the
    /// input to already be checksummed compare it against [`as_str`].
    ///
    /// [`as_str`]: ChecksumAddress::as_str
    ///
    /// # Errors
    ///
    /// Returns `AddressError::InvalidLength` or `AddressError::InvalidHex`
    /// for malformed input.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        if digits.len() != ADDRESS_HEX_LEN {
            return Err(AddressError::InvalidLength {
                input: input.to_string(),
                len: digits.len(),
            });
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| AddressError::InvalidHex {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self::from_bytes(&bytes))
    }

    /// Render raw address bytes in checksum form.
    pub fn from_bytes(bytes: &[u8; 20]) -> Self {
        let lower = hex::encode(bytes);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(ADDRESS_HEX_LEN + 2);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        Self(out)
    }

    /// The `0x`-prefixed checksum string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `raw` is exactly this address's checksum form.
    pub fn is_exactly(&self, raw: &str) -> bool {
        self.0 == raw
    }
}

impl fmt::Display for ChecksumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChecksumAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Convenience wrapper returning the checksum form as a `String`.
pub fn to_checksum_address(input: &str) -> Result<String, AddressError> {
    ChecksumAddress::parse(input).map(|a| a.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test vectors published with EIP-55.
    const EIP55_VECTORS: &[&str] = &[
        "0x52908400098527886E0F7030069857D2E4169EE7",
        "0x8617E340B3D01FA5F11F306F4090FD50E238070D",
        "0xde709f2102306220921060314715629080e2fb77",
        "0x27b1fdb04752bbc536007a920d24acb045561c26",
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn eip55_vectors_are_fixed_points() {
        for v in EIP55_VECTORS {
            let parsed = ChecksumAddress::parse(v).unwrap();
            assert_eq!(parsed.as_str(), *v);
            assert!(parsed.is_exactly(v));
        }
    }

    #[test]
    fn lowercase_input_is_checksummed() {
        let lower = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
        assert_eq!(
            to_checksum_address(lower).unwrap(),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }

    #[test]
    fn missing_prefix_is_accepted_and_added() {
        let parsed = ChecksumAddress::parse("fb6916095ca1df60bb79ce92ce3ea74c37c5d359").unwrap();
        assert_eq!(parsed.as_str(), "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359");
    }

    #[test]
    fn wrong_case_is_not_exact() {
        let raw = "0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED";
        let parsed = ChecksumAddress::parse(raw).unwrap();
        assert!(!parsed.is_exactly(raw));
    }

    #[test]
    fn short_address_rejected() {
        let err = ChecksumAddress::parse("0x1234").unwrap_err();
        assert!(matches!(err, AddressError::InvalidLength { len: 4, .. }));
    }

    #[test]
    fn non_hex_rejected() {
        let err = ChecksumAddress::parse("0xg2908400098527886E0F7030069857D2E4169EE7").unwrap_err();
        assert!(matches!(err, AddressError::InvalidHex { .. }));
    }

    #[test]
    fn display_matches_as_str() {
        let parsed = ChecksumAddress::parse(EIP55_VECTORS[4]).unwrap();
        assert_eq!(parsed.to_string(), parsed.as_str());
    }
}
