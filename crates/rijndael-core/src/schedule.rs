//! Key expansion for 4, 6 and 8-word cipher keys.

use core::convert::TryInto;

use tracing::debug;

use crate::key::{CipherKey, RoundKeys, MAX_ROUNDS};
use crate::sbox::sbox;

const MAX_SCHEDULE_WORDS: usize = 4 * (MAX_ROUNDS + 1);

/// Round constants, top byte only, indexed by schedule iteration minus one.
/// AES-128 reads the first ten entries; longer keys read fewer.
pub const RCON: [u32; 15] = [
    0x0100_0000,
    0x0200_0000,
    0x0400_0000,
    0x0800_0000,
    0x1000_0000,
    0x2000_0000,
    0x4000_0000,
    0x8000_0000,
    0x1b00_0000,
    0x3600_0000,
    0x6c00_0000,
    0xd800_0000,
    0xab00_0000,
    0x4d00_0000,
    0x9a00_0000,
];

/// Rotates a big-endian word left by one byte: `[b0,b1,b2,b3] -> [b1,b2,b3,b0]`.
#[inline]
pub fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

/// Applies the forward S-box to each byte of the word.
#[inline]
pub fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Round constant for key-schedule iteration `index + 1`.
///
/// # Panics
///
/// Panics if `index` is 15 or more.
#[inline]
pub fn rcon(index: usize) -> u32 {
    RCON[index]
}

/// Expands a cipher key into `Nr + 1` round keys.
pub fn expand_key(key: &CipherKey) -> RoundKeys {
    let size = key.size();
    let nk = size.key_words();
    let total = size.schedule_words();

    let mut w = [0u32; MAX_SCHEDULE_WORDS];
    for (i, chunk) in key.as_bytes().chunks_exact(4).enumerate() {
        let bytes: [u8; 4] = chunk.try_into().expect("chunk length is four");
        w[i] = u32::from_be_bytes(bytes);
    }

    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ rcon(i / nk - 1);
        } else if nk == 8 && i % 4 == 0 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }

    let mut round_keys = [[0u8; 16]; MAX_ROUNDS + 1];
    for (round, block) in round_keys.iter_mut().enumerate().take(size.rounds() + 1) {
        for (word_idx, dst) in block.chunks_exact_mut(4).enumerate() {
            dst.copy_from_slice(&w[round * 4 + word_idx].to_be_bytes());
        }
    }

    debug!(
        key_bits = size.bits(),
        rounds = size.rounds(),
        "expanded key schedule"
    );
    RoundKeys::from_blocks(round_keys, size)
}
