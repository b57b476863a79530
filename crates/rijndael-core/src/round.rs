//! AES round transformations.
//!
//! Each primitive comes as a forward/inverse pair operating in place on a
//! column-major state (byte `i` is row `i % 4`, column `i / 4`).
//! `byte_sub`, `shift_row` and `mix_column` pick the half of the pair that
//! matches a [`Direction`].

use crate::block::{xor_in_place, Block};
use crate::cipher::Direction;
use crate::gf::gf_mul;
use crate::sbox::{inv_sbox, sbox};

/// MixColumns coefficient matrix.
pub const MIX_COLUMNS: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

/// InvMixColumns coefficient matrix.
pub const INV_MIX_COLUMNS: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

// Output byte `i` of ShiftRows takes input byte `SHIFT_ROWS[i]`.
const SHIFT_ROWS: [usize; 16] = [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11];
const INV_SHIFT_ROWS: [usize; 16] = [0, 13, 10, 7, 4, 1, 14, 11, 8, 5, 2, 15, 12, 9, 6, 3];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

#[inline]
fn permute(state: &mut Block, map: &[usize; 16]) {
    let src = *state;
    for (dst, &from) in state.iter_mut().zip(map.iter()) {
        *dst = src[from];
    }
}

/// Performs ShiftRows in place: row `r` rotates left by `r`.
#[inline]
pub fn shift_rows(state: &mut Block) {
    permute(state, &SHIFT_ROWS);
}

/// Performs the inverse of ShiftRows in place: row `r` rotates right by `r`.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    permute(state, &INV_SHIFT_ROWS);
}

fn multiply_columns(state: &mut Block, matrix: &[[u8; 4]; 4]) {
    let mut out = [0u8; 16];
    for col in 0..4 {
        let column = &state[col * 4..col * 4 + 4];
        for (row, coeffs) in matrix.iter().enumerate() {
            out[col * 4 + row] = coeffs
                .iter()
                .zip(column)
                .fold(0u8, |acc, (&c, &s)| acc ^ gf_mul(s, c));
        }
    }
    *state = out;
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    multiply_columns(state, &MIX_COLUMNS);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    multiply_columns(state, &INV_MIX_COLUMNS);
}

/// Adds (XORs) a round key into the state. Self-inverse.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

/// SubBytes or its inverse, by direction.
#[inline]
pub fn byte_sub(state: &mut Block, direction: Direction) {
    match direction {
        Direction::Encrypt => sub_bytes(state),
        Direction::Decrypt => inv_sub_bytes(state),
    }
}

/// ShiftRows or its inverse, by direction.
#[inline]
pub fn shift_row(state: &mut Block, direction: Direction) {
    match direction {
        Direction::Encrypt => shift_rows(state),
        Direction::Decrypt => inv_shift_rows(state),
    }
}

/// MixColumns or its inverse, by direction.
#[inline]
pub fn mix_column(state: &mut Block, direction: Direction) {
    match direction {
        Direction::Encrypt => mix_columns(state),
        Direction::Decrypt => inv_mix_columns(state),
    }
}
