//! Key and vector file handling, PKCS#7 padding and hex output.

use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use rijndael_core::{CipherKey, BLOCK_LEN};

/// Parses a hex key, ignoring any ASCII whitespace between digits.
pub fn parse_key_hex(text: &str) -> Result<CipherKey> {
    let digits: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        bail!("invalid character {bad:?} in key");
    }
    ensure!(
        digits.len() % 2 == 0,
        "key has an odd number of hex digits ({})",
        digits.len()
    );
    let bytes = hex::decode(&digits).context("decode key hex")?;
    Ok(CipherKey::new(&bytes)?)
}

/// Reads a whitespace-tolerant ASCII hex key file.
pub fn read_key_file(path: &Path) -> Result<CipherKey> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_key_hex(&text).with_context(|| format!("parse key file {}", path.display()))
}

/// Reads a raw binary vector file.
pub fn read_vector(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

/// Appends PKCS#7 padding: 1 to 16 bytes, each holding the pad length.
pub fn pad(data: &mut Vec<u8>) -> usize {
    let pad_len = BLOCK_LEN - data.len() % BLOCK_LEN;
    data.resize(data.len() + pad_len, pad_len as u8);
    pad_len
}

/// Validates and strips PKCS#7 padding, returning the number of bytes removed.
pub fn unpad(data: &mut Vec<u8>) -> Result<usize> {
    ensure!(
        !data.is_empty() && data.len() % BLOCK_LEN == 0,
        "padded input must be a non-empty multiple of {BLOCK_LEN} bytes, got {}",
        data.len()
    );
    let pad_len = data[data.len() - 1] as usize;
    ensure!(
        (1..=BLOCK_LEN).contains(&pad_len),
        "invalid padding length {pad_len}"
    );
    let body = data.len() - pad_len;
    if data[body..].iter().any(|&b| b as usize != pad_len) {
        bail!("inconsistent padding bytes");
    }
    data.truncate(body);
    Ok(pad_len)
}

/// Formats bytes as lowercase hex in space-separated 4-byte groups.
pub fn format_words(bytes: &[u8]) -> String {
    bytes
        .chunks(4)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rijndael_core::KeySize;

    #[test]
    fn key_hex_tolerates_whitespace_and_case() {
        let key = parse_key_hex("00010203 04050607\n08090A0B\t0c0d0e0f\n").expect("valid key");
        assert_eq!(key.size(), KeySize::Aes128);
        assert_eq!(key.as_bytes(), (0u8..16).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn key_hex_accepts_all_sizes() {
        assert_eq!(
            parse_key_hex(&"01".repeat(24)).expect("24 bytes").size(),
            KeySize::Aes192
        );
        let key = parse_key_hex(&"01".repeat(32)).expect("32 bytes");
        assert_eq!(key.size(), KeySize::Aes256);
        assert_eq!(key.as_bytes()[0], 0x01);
    }

    #[test]
    fn key_hex_rejects_bad_input() {
        assert!(parse_key_hex("zz").is_err());
        assert!(parse_key_hex(&"0".repeat(31)).is_err());
        let err = parse_key_hex(&"00".repeat(20)).expect_err("20-byte key");
        assert!(err.to_string().contains("invalid key length of 20"));
    }

    #[test]
    fn pad_always_adds_at_least_one_byte() {
        let mut data = vec![0xaa; 16];
        assert_eq!(pad(&mut data), 16);
        assert_eq!(data.len(), 32);
        assert!(data[16..].iter().all(|&b| b == 16));

        let mut data = vec![0xaa; 13];
        assert_eq!(pad(&mut data), 3);
        assert_eq!(&data[13..], &[3, 3, 3]);

        let mut data = Vec::new();
        assert_eq!(pad(&mut data), 16);
    }

    #[test]
    fn unpad_reverses_pad() {
        for len in 0..40 {
            let original: Vec<u8> = (0..len as u8).collect();
            let mut data = original.clone();
            let added = pad(&mut data);
            assert_eq!(unpad(&mut data).expect("valid padding"), added);
            assert_eq!(data, original);
        }
    }

    #[test]
    fn unpad_rejects_corrupt_padding() {
        let mut zero_pad = vec![0u8; 16];
        assert!(unpad(&mut zero_pad).is_err());

        let mut too_long = vec![17u8; 16];
        assert!(unpad(&mut too_long).is_err());

        let mut mixed = vec![0u8; 16];
        mixed[14] = 1;
        mixed[15] = 2;
        assert!(unpad(&mut mixed).is_err());

        let mut unaligned = vec![1u8; 15];
        assert!(unpad(&mut unaligned).is_err());
    }

    #[test]
    fn words_are_grouped_by_four() {
        assert_eq!(format_words(&[]), "");
        assert_eq!(
            format_words(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
            "00112233 4455"
        );
    }
}
