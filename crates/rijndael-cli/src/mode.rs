//! Block cipher modes accepted on the command line.

use anyhow::{bail, Result};
use clap::ValueEnum;

/// Mode of operation. Only ECB is implemented; the chaining and stream
/// modes are recognised so they can be rejected with a clear message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Electronic codebook: every block transformed independently.
    #[default]
    Ecb,
    /// Cipher block chaining.
    Cbc,
    /// Cipher feedback.
    Cfb,
    /// Output feedback.
    Ofb,
    /// Counter.
    Ctr,
}

impl Mode {
    /// Fails for every mode other than ECB.
    pub fn ensure_supported(self) -> Result<()> {
        match self {
            Mode::Ecb => Ok(()),
            other => bail!("mode {other:?} is not implemented; only ECB is supported"),
        }
    }
}
