//! Rijndael/AES block cipher engine for 128, 192 and 256-bit keys.
//!
//! This crate follows FIPS-197 and provides:
//! - GF(2^8) multiplication over constant log/antilog tables.
//! - Key schedule expansion for 16, 24 and 32-byte keys.
//! - The four round transformations and their inverses.
//! - A single round driver parameterized by [`Direction`].
//! - Independent per-block (ECB) processing of aligned buffers, optionally
//!   parallel with the `parallel` feature.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
pub mod ecb;
mod error;
mod gf;
mod key;
pub mod round;
mod sbox;
mod schedule;

pub use crate::block::{xor_in_place, Block, BLOCK_LEN};
pub use crate::cipher::{aes, decrypt_block, encrypt_block, Direction, Rijndael};
pub use crate::error::Error;
pub use crate::gf::gf_mul;
pub use crate::key::{CipherKey, KeySize, RoundKeys, MAX_ROUNDS};
pub use crate::sbox::{inv_sbox, sbox};
pub use crate::schedule::{expand_key, rcon, rot_word, sub_word, RCON};
