//! Independent per-block (ECB) processing of whole buffers.
//!
//! Padding is the caller's job: buffers must already be a whole number of
//! blocks.

use tracing::debug;

use crate::block::{Block, BLOCK_LEN};
use crate::cipher::{aes, Direction};
use crate::error::Error;
use crate::key::RoundKeys;

fn check_aligned(data: &[u8]) -> Result<usize, Error> {
    if data.len() % BLOCK_LEN != 0 {
        return Err(Error::UnalignedInput(data.len()));
    }
    Ok(data.len() / BLOCK_LEN)
}

#[inline]
fn apply_chunk(chunk: &mut [u8], round_keys: &RoundKeys, direction: Direction) {
    let mut state: Block = [0u8; BLOCK_LEN];
    state.copy_from_slice(chunk);
    aes(&mut state, round_keys, direction);
    chunk.copy_from_slice(&state);
}

/// Transforms every block of `data` in place and returns the block count.
pub fn apply_blocks(
    data: &mut [u8],
    round_keys: &RoundKeys,
    direction: Direction,
) -> Result<usize, Error> {
    let blocks = check_aligned(data)?;
    debug!(blocks, ?direction, "ecb pass");
    for chunk in data.chunks_exact_mut(BLOCK_LEN) {
        apply_chunk(chunk, round_keys, direction);
    }
    Ok(blocks)
}

/// Parallel form of [`apply_blocks`] on the current rayon pool.
#[cfg(feature = "parallel")]
pub fn par_apply_blocks(
    data: &mut [u8],
    round_keys: &RoundKeys,
    direction: Direction,
) -> Result<usize, Error> {
    use rayon::prelude::*;

    let blocks = check_aligned(data)?;
    debug!(
        blocks,
        ?direction,
        threads = rayon::current_num_threads(),
        "parallel ecb pass"
    );
    data.par_chunks_exact_mut(BLOCK_LEN)
        .for_each(|chunk| apply_chunk(chunk, round_keys, direction));
    Ok(blocks)
}
