use hex::FromHexError;

/// Decode a hex string, accepting an optional `0x`/`0X` prefix.
pub fn decode_hex(raw: &str) -> Result<Vec<u8>, FromHexError> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(body)
}

/// Lowercase hex with a `0x` prefix.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accepts_both_prefixes_and_none() {
        assert_eq!(decode_hex("0xdeadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode_hex("0XDEADBEEF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode_hex(" deadbeef ").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn decode_rejects_odd_length_and_garbage() {
        assert!(decode_hex("0xabc").is_err());
        assert!(decode_hex("0xzz").is_err());
    }

    #[test]
    fn encode_is_lowercase_with_prefix() {
        assert_eq!(encode_hex(&[0xAB, 0x01]), "0xab01");
    }
}
