//! Block representation helpers.

/// Size of one cipher block in bytes.
pub const BLOCK_LEN: usize = 16;

/// AES block of 16 bytes, laid out as a column-major 4x4 state matrix.
pub type Block = [u8; BLOCK_LEN];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
