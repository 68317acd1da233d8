//! EIP-191 `personal_sign` signer recovery.
//!
//! Wallets sign `"\x19Ethereum Signed Message:\n" || len(message) || message`
//! hashed with keccak-256. Recovery yields the signer address without any
//! separate public key input.

use alloy_primitives::{Address, Signature, eip191_hash_message};
use thiserror::Error;

/// Length of an `r || s || v` secp256k1 signature.
pub const SIGNATURE_LEN: usize = 65;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature must be {SIGNATURE_LEN} bytes, got {0}")]
    InvalidLength(usize),

    #[error("signature could not be parsed: {0}")]
    Unparseable(String),

    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),
}

/// Recover the address that produced `signature` over `message` with
/// `personal_sign`.
pub fn recover_signer(message: &[u8], signature: &[u8]) -> Result<Address, SignatureError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(SignatureError::InvalidLength(signature.len()));
    }

    let signature = Signature::try_from(signature)
        .map_err(|err| SignatureError::Unparseable(err.to_string()))?;

    let digest = eip191_hash_message(message);
    signature
        .recover_address_from_prehash(&digest)
        .map_err(|err| SignatureError::RecoveryFailed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_signer::Signer;
    use alloy_signer_local::PrivateKeySigner;

    async fn sign(signer: &PrivateKeySigner, message: &[u8]) -> Vec<u8> {
        let signature = signer.sign_message(message).await.expect("sign message");
        signature.as_bytes().to_vec()
    }

    #[tokio::test]
    async fn recovers_the_signing_address() {
        let signer = PrivateKeySigner::random();
        let message = b"Sign this message to verify your wallet. Nonce: 482913";
        let signature = sign(&signer, message).await;

        let recovered = recover_signer(message, &signature).expect("recover");
        assert_eq!(recovered, signer.address());
    }

    #[tokio::test]
    async fn altered_message_recovers_someone_else() {
        let signer = PrivateKeySigner::random();
        let signature = sign(&signer, b"Nonce: 1").await;

        if let Ok(recovered) = recover_signer(b"Nonce: 2", &signature) {
            assert_ne!(recovered, signer.address());
        }
    }

    #[tokio::test]
    async fn any_single_byte_change_loses_the_signer() {
        let signer = PrivateKeySigner::random();
        let message = b"Sign this message to verify your wallet. Nonce: 77";
        let signature = sign(&signer, message).await;

        for index in 0..SIGNATURE_LEN {
            let mut altered = signature.clone();
            altered[index] ^= 0x01;
            if let Ok(recovered) = recover_signer(message, &altered) {
                assert_ne!(recovered, signer.address(), "byte {index}");
            }
        }
    }

    #[test]
    fn short_signature_is_rejected() {
        let err = recover_signer(b"hello", &[0u8; 64]).unwrap_err();
        assert_eq!(err, SignatureError::InvalidLength(64));
    }

    #[test]
    fn zeroed_signature_does_not_recover() {
        let mut signature = [0u8; SIGNATURE_LEN];
        signature[64] = 27;
        assert!(recover_signer(b"hello", &signature).is_err());
    }
}
