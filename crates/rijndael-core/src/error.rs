//! Error type for the cipher core.

use thiserror::Error;

/// Errors surfaced at the boundaries of the cipher core: key validation and
/// multi-block buffer alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The cipher key was not 16, 24 or 32 bytes long.
    #[error("invalid key length of {0} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),
    /// A multi-block buffer was not a whole number of 16-byte blocks.
    #[error("input length {0} is not a multiple of the 16-byte block size")]
    UnalignedInput(usize),
}
