//! Cipher key and expanded round-key types for AES-128/192/256.

use crate::block::{Block, BLOCK_LEN};
use crate::error::Error;

/// Largest round count (AES-256).
pub const MAX_ROUNDS: usize = 14;

/// Supported key lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 16-byte key, 10 rounds.
    Aes128,
    /// 24-byte key, 12 rounds.
    Aes192,
    /// 32-byte key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// All key sizes, shortest first.
    pub const ALL: [KeySize; 3] = [KeySize::Aes128, KeySize::Aes192, KeySize::Aes256];

    /// Maps a key length in bytes to its size, if supported.
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(KeySize::Aes128),
            24 => Some(KeySize::Aes192),
            32 => Some(KeySize::Aes256),
            _ => None,
        }
    }

    /// Key length in bytes.
    pub const fn key_bytes(self) -> usize {
        match self {
            KeySize::Aes128 => 16,
            KeySize::Aes192 => 24,
            KeySize::Aes256 => 32,
        }
    }

    /// Key length in 32-bit words (`Nk`).
    pub const fn key_words(self) -> usize {
        self.key_bytes() / 4
    }

    /// Number of cipher rounds (`Nr = Nk + 6`).
    pub const fn rounds(self) -> usize {
        self.key_words() + 6
    }

    /// Number of 32-bit words in the expanded schedule, `4 * (Nr + 1)`.
    pub const fn schedule_words(self) -> usize {
        4 * (self.rounds() + 1)
    }

    /// Key length in bits.
    pub const fn bits(self) -> usize {
        self.key_bytes() * 8
    }
}

/// A validated cipher key of 16, 24 or 32 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CipherKey {
    bytes: [u8; 32],
    size: KeySize,
}

impl CipherKey {
    /// Validates the key length and copies the key bytes.
    pub fn new(bytes: &[u8]) -> Result<Self, Error> {
        let size = KeySize::from_len(bytes.len()).ok_or(Error::InvalidKeyLength(bytes.len()))?;
        let mut buf = [0u8; 32];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self { bytes: buf, size })
    }

    /// Size class of this key.
    #[inline]
    pub fn size(&self) -> KeySize {
        self.size
    }

    /// The raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.size.key_bytes()]
    }
}

impl TryFrom<&[u8]> for CipherKey {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

macro_rules! impl_from_array {
    ($($len:literal => $size:ident),*) => {$(
        impl From<[u8; $len]> for CipherKey {
            fn from(value: [u8; $len]) -> Self {
                let mut bytes = [0u8; 32];
                bytes[..$len].copy_from_slice(&value);
                Self { bytes, size: KeySize::$size }
            }
        }
    )*};
}

impl_from_array!(16 => Aes128, 24 => Aes192, 32 => Aes256);

/// Expanded round keys: `Nr + 1` blocks, round key `r` applied in round `r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys {
    keys: [Block; MAX_ROUNDS + 1],
    size: KeySize,
}

impl RoundKeys {
    pub(crate) fn from_blocks(keys: [Block; MAX_ROUNDS + 1], size: KeySize) -> Self {
        Self { keys, size }
    }

    /// Number of rounds (`Nr`) this schedule drives.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.size.rounds()
    }

    /// Size class of the key this schedule was expanded from.
    #[inline]
    pub fn key_size(&self) -> KeySize {
        self.size
    }

    /// Returns the round key for `round` (0..=Nr).
    ///
    /// # Panics
    ///
    /// Panics if `round` is past the end of the schedule.
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        assert!(
            round <= self.rounds(),
            "round key {round} requested from a {}-round schedule",
            self.rounds()
        );
        &self.keys[round]
    }

    /// Iterates over the round keys in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> + '_ {
        self.keys[..=self.rounds()].iter()
    }

    /// Flattens the schedule into `16 * (Nr + 1)` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(BLOCK_LEN * (self.rounds() + 1));
        for key in self.iter() {
            out.extend_from_slice(key);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_counts_follow_key_words() {
        assert_eq!(KeySize::Aes128.rounds(), 10);
        assert_eq!(KeySize::Aes192.rounds(), 12);
        assert_eq!(KeySize::Aes256.rounds(), 14);
        assert_eq!(KeySize::Aes128.schedule_words(), 44);
        assert_eq!(KeySize::Aes192.schedule_words(), 52);
        assert_eq!(KeySize::Aes256.schedule_words(), 60);
        for size in KeySize::ALL {
            assert_eq!(KeySize::from_len(size.key_bytes()), Some(size));
        }
    }

    #[test]
    fn rejects_unsupported_lengths() {
        for len in [0usize, 1, 15, 17, 20, 23, 25, 31, 33, 64] {
            let bytes = vec![0u8; len];
            assert_eq!(CipherKey::new(&bytes), Err(Error::InvalidKeyLength(len)));
        }
    }

    #[test]
    fn keeps_only_the_supplied_bytes() {
        let raw: Vec<u8> = (0..24).collect();
        let key = CipherKey::try_from(raw.as_slice()).expect("24-byte key");
        assert_eq!(key.size(), KeySize::Aes192);
        assert_eq!(key.as_bytes(), raw.as_slice());
        assert_eq!(CipherKey::from([7u8; 16]).as_bytes(), &[7u8; 16]);
    }

    #[test]
    #[should_panic(expected = "round key 11")]
    fn out_of_range_round_key_panics() {
        let keys = RoundKeys::from_blocks([[0u8; 16]; MAX_ROUNDS + 1], KeySize::Aes128);
        keys.get(11);
    }
}
