//! Round driver and single-block encryption/decryption.

use crate::block::Block;
use crate::ecb;
use crate::error::Error;
use crate::key::{CipherKey, KeySize, RoundKeys};
use crate::round::{add_round_key, byte_sub, mix_column, shift_row};
use crate::schedule::expand_key;

/// Which way the round pipeline runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

/// Runs the full round pipeline over one block in place.
///
/// Encryption: `AddRoundKey(0)`, then rounds `1..Nr` of
/// `ByteSub, ShiftRow, MixColumn, AddRoundKey`, then a final round without
/// `MixColumn`. Decryption walks the round keys backwards with the inverse
/// primitives in `InvShiftRow, InvByteSub, AddRoundKey, InvMixColumn` order.
pub fn aes(state: &mut Block, round_keys: &RoundKeys, direction: Direction) {
    let nr = round_keys.rounds();
    match direction {
        Direction::Encrypt => {
            add_round_key(state, round_keys.get(0));
            for round in 1..nr {
                byte_sub(state, direction);
                shift_row(state, direction);
                mix_column(state, direction);
                add_round_key(state, round_keys.get(round));
            }
            byte_sub(state, direction);
            shift_row(state, direction);
            add_round_key(state, round_keys.get(nr));
        }
        Direction::Decrypt => {
            add_round_key(state, round_keys.get(nr));
            for round in (1..nr).rev() {
                shift_row(state, direction);
                byte_sub(state, direction);
                add_round_key(state, round_keys.get(round));
                mix_column(state, direction);
            }
            shift_row(state, direction);
            byte_sub(state, direction);
            add_round_key(state, round_keys.get(0));
        }
    }
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    aes(&mut state, round_keys, Direction::Encrypt);
    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    aes(&mut state, round_keys, Direction::Decrypt);
    state
}

/// A cipher instance holding the expanded schedule for one key.
///
/// The schedule is read-only after construction, so a shared reference can
/// drive any number of blocks from any number of threads.
#[derive(Clone, Debug)]
pub struct Rijndael {
    round_keys: RoundKeys,
}

impl Rijndael {
    /// Validates `key` and expands its schedule.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_key(&CipherKey::new(key)?))
    }

    /// Expands the schedule of an already validated key.
    pub fn from_key(key: &CipherKey) -> Self {
        Self {
            round_keys: expand_key(key),
        }
    }

    /// Key size this instance was built for.
    pub fn key_size(&self) -> KeySize {
        self.round_keys.key_size()
    }

    /// The expanded schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Transforms one block in place.
    #[inline]
    pub fn apply(&self, block: &mut Block, direction: Direction) {
        aes(block, &self.round_keys, direction);
    }

    /// Encrypts one block in place.
    #[inline]
    pub fn encrypt_block(&self, block: &mut Block) {
        self.apply(block, Direction::Encrypt);
    }

    /// Decrypts one block in place.
    #[inline]
    pub fn decrypt_block(&self, block: &mut Block) {
        self.apply(block, Direction::Decrypt);
    }

    /// Encrypts every 16-byte block of `data` independently.
    pub fn encrypt_ecb(&self, data: &mut [u8]) -> Result<usize, Error> {
        ecb::apply_blocks(data, &self.round_keys, Direction::Encrypt)
    }

    /// Decrypts every 16-byte block of `data` independently.
    pub fn decrypt_ecb(&self, data: &mut [u8]) -> Result<usize, Error> {
        ecb::apply_blocks(data, &self.round_keys, Direction::Decrypt)
    }
}
