//! Classic address and family seed syntax.
//!
//! Both are Ripple-alphabet base58 strings carrying a version prefix, a
//! payload and a 4-byte double SHA-256 checksum.

use sha2::{Digest, Sha256};

use crate::xrpl::types::{XrplError, XrplResult};

const ACCOUNT_ID_PREFIX: &[u8] = &[0x00];
const SECP256K1_SEED_PREFIX: &[u8] = &[0x21];
const ED25519_SEED_PREFIX: &[u8] = &[0x01, 0xE1, 0x4B];

const ACCOUNT_ID_LEN: usize = 20;
const SEED_ENTROPY_LEN: usize = 16;
const CHECKSUM_LEN: usize = 4;

/// Key algorithm a family seed was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedKind {
    Secp256k1,
    Ed25519,
}

/// Check that `address` is a well-formed classic address (`r...`).
pub fn validate_classic_address(address: &str) -> XrplResult<()> {
    let invalid = || XrplError::InvalidAddress {
        field: "address".to_string(),
        value: address.to_string(),
    };

    if !address.starts_with('r') || !(25..=35).contains(&address.len()) {
        return Err(invalid());
    }

    let payload = decode_checked(address).ok_or_else(invalid)?;
    if payload.len() != ACCOUNT_ID_PREFIX.len() + ACCOUNT_ID_LEN
        || !payload.starts_with(ACCOUNT_ID_PREFIX)
    {
        return Err(invalid());
    }
    Ok(())
}

/// Boolean form of [`validate_classic_address`].
pub fn is_valid_classic_address(address: &str) -> bool {
    validate_classic_address(address).is_ok()
}

/// Check that `seed` is a well-formed family seed and report its key type.
pub fn validate_seed(seed: &str) -> XrplResult<SeedKind> {
    let invalid = || XrplError::InvalidSeed {
        field: "seed".to_string(),
    };

    if !seed.starts_with('s') {
        return Err(invalid());
    }

    let payload = decode_checked(seed).ok_or_else(invalid)?;
    if payload.len() == ED25519_SEED_PREFIX.len() + SEED_ENTROPY_LEN
        && payload.starts_with(ED25519_SEED_PREFIX)
    {
        return Ok(SeedKind::Ed25519);
    }
    if payload.len() == SECP256K1_SEED_PREFIX.len() + SEED_ENTROPY_LEN
        && payload.starts_with(SECP256K1_SEED_PREFIX)
    {
        return Ok(SeedKind::Secp256k1);
    }
    Err(invalid())
}

/// Decode a base58check string, returning the payload without checksum.
fn decode_checked(encoded: &str) -> Option<Vec<u8>> {
    let bytes = bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_vec()
        .ok()?;
    if bytes.len() <= CHECKSUM_LEN {
        return None;
    }

    let (payload, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if checksum != &double_sha256(payload)[..CHECKSUM_LEN] {
        return None;
    }
    Some(payload.to_vec())
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

#[cfg(test)]
pub(crate) fn encode_checked(payload: &[u8]) -> String {
    let mut bytes = payload.to_vec();
    bytes.extend_from_slice(&double_sha256(payload)[..CHECKSUM_LEN]);
    bs58::encode(bytes)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const GENESIS_SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";

    #[test]
    fn test_valid_addresses() {
        assert!(validate_classic_address(GENESIS).is_ok());
        assert!(validate_classic_address("rrrrrrrrrrrrrrrrrrrrrhoLvTp").is_ok());

        let mut payload = vec![0x00];
        payload.extend_from_slice(&[0xAB; 20]);
        assert!(is_valid_classic_address(&encode_checked(&payload)));
    }

    #[test]
    fn test_rejects_bad_checksum() {
        assert!(!is_valid_classic_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTi"));
    }

    #[test]
    fn test_rejects_wrong_shape() {
        assert!(!is_valid_classic_address(""));
        assert!(!is_valid_classic_address("xHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        assert!(!is_valid_classic_address("r0OIl"));
        // A valid seed is not an address.
        assert!(!is_valid_classic_address(GENESIS_SEED));
    }

    #[test]
    fn test_seed_kinds() {
        assert_eq!(validate_seed(GENESIS_SEED).unwrap(), SeedKind::Secp256k1);

        let mut ed = ED25519_SEED_PREFIX.to_vec();
        ed.extend_from_slice(&[7u8; 16]);
        let encoded = encode_checked(&ed);
        assert!(encoded.starts_with("sEd"));
        assert_eq!(validate_seed(&encoded).unwrap(), SeedKind::Ed25519);
    }

    #[test]
    fn test_rejects_invalid_seeds() {
        assert!(validate_seed(GENESIS).is_err());
        assert!(validate_seed("snoPBrXtMeMyMHUVTgbuqAfg1SUTc").is_err());
        assert!(validate_seed("not-a-seed").is_err());

        let err = validate_seed("sBogus").unwrap_err();
        assert!(!err.to_string().contains("sBogus"));
    }
}
