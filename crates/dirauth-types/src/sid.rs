//! Binary codec for directory security identifiers.
//!
//! Active-Directory-style servers return `objectSid` and `tokenGroups`
//! values in a fixed binary layout:
//!
//! ```text
//! [ revision u8 ][ sub-authority count u8 ][ 2 reserved bytes ]
//! [ identifier authority u32, big-endian ]
//! [ count x sub-authority u32, little-endian ]
//! ```
//!
//! The canonical text form is `S-<revision>-<authority>-<sub1>-<sub2>-...`.

use crate::error::{Result, SidError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed header: revision, count, reserved pair, authority word.
const HEADER_LEN: usize = 8;

/// A decoded security identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityIdentifier {
    pub revision: u8,
    pub identifier_authority: u32,
    pub sub_authorities: Vec<u32>,
}

impl SecurityIdentifier {
    /// Decode a SID from its binary wire form.
    ///
    /// The sub-authority loop reads exactly the count declared in the
    /// header; trailing bytes beyond `8 + 4 * count` are ignored, since
    /// directory servers occasionally pad responses. A buffer too short
    /// for the header or for the declared sub-authorities is rejected.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(SidError::TruncatedHeader(bytes.len()));
        }

        let revision = bytes[0];
        let count = bytes[1];
        // bytes[2..4] are reserved
        let identifier_authority = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        let available = (bytes.len() - HEADER_LEN) / 4;
        if available < count as usize {
            return Err(SidError::TruncatedSubAuthorities {
                expected: count,
                actual: available,
            });
        }

        let mut sub_authorities = Vec::with_capacity(count as usize);
        for i in 0..count as usize {
            let offset = HEADER_LEN + i * 4;
            sub_authorities.push(u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]));
        }

        Ok(Self {
            revision,
            identifier_authority,
            sub_authorities,
        })
    }

    /// Encode back to the binary wire form. Structural inverse of
    /// [`SecurityIdentifier::parse`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.sub_authorities.len() * 4);
        bytes.push(self.revision);
        bytes.push(self.sub_authorities.len() as u8);
        bytes.extend_from_slice(&[0, 0]);
        bytes.extend_from_slice(&self.identifier_authority.to_be_bytes());
        for sub in &self.sub_authorities {
            bytes.extend_from_slice(&sub.to_le_bytes());
        }
        bytes
    }
}

impl fmt::Display for SecurityIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-{}", self.revision, self.identifier_authority)?;
        for sub in &self.sub_authorities {
            write!(f, "-{}", sub)?;
        }
        Ok(())
    }
}

impl FromStr for SecurityIdentifier {
    type Err = SidError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SidError::InvalidString(s.to_string());

        let rest = s.strip_prefix("S-").ok_or_else(invalid)?;
        let mut parts = rest.split('-');

        let revision = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        let identifier_authority = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;

        let sub_authorities = parts
            .map(|p| p.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<u32>>>()?;

        Ok(Self {
            revision,
            identifier_authority,
            sub_authorities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Binary form of S-1-5-21-1-2.
    fn sample_bytes() -> Vec<u8> {
        vec![
            1, 3, 0, 0, // revision, count, reserved
            0, 0, 0, 5, // authority 5, big-endian
            21, 0, 0, 0, // sub-authority 21, little-endian
            1, 0, 0, 0, // sub-authority 1
            2, 0, 0, 0, // sub-authority 2
        ]
    }

    #[test]
    fn test_parse_well_known_sid() {
        let mut bytes = sample_bytes();
        bytes[1] = 4;
        bytes.extend_from_slice(&[3, 0, 0, 0]);
        // now S-1-5-21-1-2-3
        let sid = SecurityIdentifier::parse(&bytes).unwrap();
        assert_eq!(sid.revision, 1);
        assert_eq!(sid.identifier_authority, 5);
        assert_eq!(sid.sub_authorities, vec![21, 1, 2, 3]);
        assert_eq!(sid.to_string(), "S-1-5-21-1-2-3");
    }

    #[test]
    fn test_parse_rejects_short_header() {
        for len in 0..8 {
            let bytes = vec![1u8; len];
            assert_eq!(
                SecurityIdentifier::parse(&bytes),
                Err(SidError::TruncatedHeader(len)),
                "len {len} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_missing_sub_authorities() {
        // Header declares 3 sub-authorities but only 2 are present.
        let mut bytes = sample_bytes();
        bytes.truncate(16);
        let err = SecurityIdentifier::parse(&bytes).unwrap_err();
        assert_eq!(
            err,
            SidError::TruncatedSubAuthorities {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_parse_ignores_trailing_bytes() {
        let bytes = sample_bytes();
        let sid = SecurityIdentifier::parse(&bytes).unwrap();

        let mut padded = bytes;
        padded.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef, 0x42]);
        let sid_padded = SecurityIdentifier::parse(&padded).unwrap();

        assert_eq!(sid, sid_padded);
        assert_eq!(sid_padded.sub_authorities.len(), 3);
    }

    #[test]
    fn test_parse_zero_sub_authorities() {
        let bytes = vec![1, 0, 0, 0, 0, 0, 0, 1];
        let sid = SecurityIdentifier::parse(&bytes).unwrap();
        assert!(sid.sub_authorities.is_empty());
        assert_eq!(sid.to_string(), "S-1-1");
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("".parse::<SecurityIdentifier>().is_err());
        assert!("S-".parse::<SecurityIdentifier>().is_err());
        assert!("X-1-5-21".parse::<SecurityIdentifier>().is_err());
        assert!("S-1-5-borked".parse::<SecurityIdentifier>().is_err());
    }

    fn arb_sid() -> impl Strategy<Value = SecurityIdentifier> {
        (
            any::<u8>(),
            any::<u32>(),
            prop::collection::vec(any::<u32>(), 0..=15),
        )
            .prop_map(|(revision, identifier_authority, sub_authorities)| {
                SecurityIdentifier {
                    revision,
                    identifier_authority,
                    sub_authorities,
                }
            })
    }

    proptest! {
        #[test]
        fn prop_binary_round_trip(sid in arb_sid()) {
            let decoded = SecurityIdentifier::parse(&sid.to_bytes()).unwrap();
            prop_assert_eq!(decoded, sid);
        }

        #[test]
        fn prop_string_round_trip(sid in arb_sid()) {
            let reparsed: SecurityIdentifier = sid.to_string().parse().unwrap();
            prop_assert_eq!(reparsed, sid);
        }

        #[test]
        fn prop_trailing_bytes_never_change_result(sid in arb_sid(), tail in prop::collection::vec(any::<u8>(), 0..32)) {
            let mut bytes = sid.to_bytes();
            bytes.extend_from_slice(&tail);
            let decoded = SecurityIdentifier::parse(&bytes).unwrap();
            prop_assert_eq!(decoded, sid);
        }
    }
}
