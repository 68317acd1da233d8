pub const SIGN_IN_MESSAGE_PREFIX: &str = "Sign this message to verify your wallet. Nonce: ";

/// Random bytes behind every challenge value (hex-encoded on the wire).
pub const CHALLENGE_ENTROPY_BYTES: usize = 32;

pub const ADDRESS_HEX_LEN: usize = 40;

pub const BEARER_PREFIX: &str = "Bearer ";
