use crate::auth::address::WalletAddress;
use crate::auth::constants::SIGN_IN_MESSAGE_PREFIX;
use crate::error::AuthError;
use crypto::personal_sign::recover_signer;

/// The exact text a wallet signs for a given challenge value.
pub fn sign_in_message(nonce: &str) -> String {
    format!("{SIGN_IN_MESSAGE_PREFIX}{nonce}")
}

/// Decode a hex signature as submitted by a wallet (`0x` optional).
pub fn decode_signature(raw: &str) -> Result<Vec<u8>, AuthError> {
    crypto::hex::decode_hex(raw).map_err(|e| AuthError::MalformedSignature(e.to_string()))
}

/// Recover the canonical address that signed `message`.
///
/// A signature that parses and recovers to some key is never an error here;
/// whether that key is the claimed one is the caller's decision.
pub fn recover_address(message: &[u8], signature: &[u8]) -> Result<WalletAddress, AuthError> {
    recover_signer(message, signature)
        .map(WalletAddress::from)
        .map_err(|e| AuthError::MalformedSignature(e.to_string()))
}
