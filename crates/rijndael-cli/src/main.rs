//! Command-line interface for `rijndael-core`.

#![forbid(unsafe_code)]

mod io;
mod mode;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rijndael_core::{
    decrypt_block, ecb, encrypt_block, expand_key, Block, CipherKey, Direction, KeySize,
    Rijndael, BLOCK_LEN,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::mode::Mode;

/// Rijndael/AES block cipher CLI.
#[derive(Parser)]
#[command(name = "rijndael", version, author, about = "AES-128/192/256 ECB tool")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

/// Where the cipher key comes from.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct KeySource {
    /// Key file holding 32, 48 or 64 hex digits; whitespace is ignored.
    #[arg(long, value_name = "FILE")]
    key_file: Option<PathBuf>,
    /// Key as 32, 48 or 64 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: Option<String>,
}

impl KeySource {
    fn load(&self) -> Result<CipherKey> {
        match (&self.key_file, &self.key_hex) {
            (Some(path), _) => io::read_key_file(path),
            (None, Some(hex)) => io::parse_key_hex(hex),
            (None, None) => unreachable!("clap requires one key source"),
        }
    }
}

/// Shared options of `enc` and `dec`.
#[derive(Args)]
struct TransformArgs {
    #[command(flatten)]
    key: KeySource,
    /// Input file (raw bytes).
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file; hex is printed to stdout when omitted.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Block cipher mode of operation.
    #[arg(short, long, value_enum, default_value_t = Mode::Ecb)]
    mode: Mode,
    /// Skip PKCS#7 padding; input must then be a multiple of 16 bytes.
    #[arg(long, default_value_t = false)]
    no_pad: bool,
    /// Worker threads for block processing (1 disables parallelism).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file block by block.
    Enc(TransformArgs),
    /// Decrypt a file block by block.
    Dec(TransformArgs),
    /// Print the expanded key schedule, one round key per line.
    Schedule {
        #[command(flatten)]
        key: KeySource,
    },
    /// Run FIPS-197 known-answer vectors and random round trips.
    Check {
        /// Random round trips per key size.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key and block, encrypt, decrypt back.
    Demo {
        /// Key size in bits (128, 192 or 256).
        #[arg(long, default_value_t = 128)]
        bits: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Enc(args) => cmd_transform(&args, Direction::Encrypt),
        Commands::Dec(args) => cmd_transform(&args, Direction::Decrypt),
        Commands::Schedule { key } => cmd_schedule(&key),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { bits, seed } => cmd_demo(bits, seed),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_transform(args: &TransformArgs, direction: Direction) -> Result<()> {
    args.mode.ensure_supported()?;
    let key = args.key.load()?;
    let cipher = Rijndael::from_key(&key);
    let mut data = io::read_vector(&args.input)?;
    info!(
        bytes = data.len(),
        key_bits = key.size().bits(),
        ?direction,
        "read input"
    );

    if direction == Direction::Encrypt && !args.no_pad {
        let added = io::pad(&mut data);
        debug!(added, "applied padding");
    }
    ensure!(
        data.len() % BLOCK_LEN == 0,
        "input length {} is not a multiple of {BLOCK_LEN} bytes",
        data.len()
    );

    let blocks = run_blocks(&mut data, &cipher, direction, args.threads)?;

    if direction == Direction::Decrypt && !args.no_pad {
        let removed = io::unpad(&mut data).context("strip padding")?;
        debug!(removed, "removed padding");
    }
    info!(blocks, bytes = data.len(), "transformed input");

    write_output(args.output.as_deref(), &data)
}

fn run_blocks(
    data: &mut [u8],
    cipher: &Rijndael,
    direction: Direction,
    threads: Option<usize>,
) -> Result<usize> {
    let round_keys = cipher.round_keys();
    let blocks = match threads {
        Some(1) => match direction {
            Direction::Encrypt => cipher.encrypt_ecb(data)?,
            Direction::Decrypt => cipher.decrypt_ecb(data)?,
        },
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("build thread pool")?;
            pool.install(|| ecb::par_apply_blocks(data, round_keys, direction))?
        }
        None => ecb::par_apply_blocks(data, round_keys, direction)?,
    };
    Ok(blocks)
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, data).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => println!("{}", io::format_words(data)),
    }
    Ok(())
}

fn cmd_schedule(source: &KeySource) -> Result<()> {
    let key = source.load()?;
    let round_keys = expand_key(&key);
    println!(
        "AES-{} ({} rounds)",
        key.size().bits(),
        round_keys.rounds()
    );
    for (round, block) in round_keys.iter().enumerate() {
        println!("round {round:02}: {}", io::format_words(block));
    }
    Ok(())
}

// FIPS-197 Appendix C: key 000102..., plaintext 00112233...
const KNOWN_ANSWERS: [(KeySize, &str); 3] = [
    (KeySize::Aes128, "69c4e0d86a7b0430d8cdb78070b4c55a"),
    (KeySize::Aes192, "dda97ca4864cdfe06eaf70a0ec0d7191"),
    (KeySize::Aes256, "8ea2b7ca516745bfeafc49904b496089"),
];
const KNOWN_PLAINTEXT: &str = "00112233445566778899aabbccddeeff";

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    let plaintext = parse_block_hex(KNOWN_PLAINTEXT)?;
    for (size, expected_hex) in KNOWN_ANSWERS {
        let key_bytes: Vec<u8> = (0..size.key_bytes() as u8).collect();
        let round_keys = expand_key(&CipherKey::new(&key_bytes)?);
        let expected = parse_block_hex(expected_hex)?;
        if encrypt_block(&plaintext, &round_keys) != expected {
            bail!("AES-{} known-answer encryption mismatch", size.bits());
        }
        if decrypt_block(&expected, &round_keys) != plaintext {
            bail!("AES-{} known-answer decryption mismatch", size.bits());
        }
        info!(key_bits = size.bits(), "known-answer vector passed");
    }

    let mut rng = seeded_rng(seed);
    for size in KeySize::ALL {
        let round_keys = expand_key(&random_key(&mut rng, size)?);
        for _ in 0..samples {
            let mut block = [0u8; BLOCK_LEN];
            rng.fill_bytes(&mut block);
            let ct = encrypt_block(&block, &round_keys);
            if decrypt_block(&ct, &round_keys) != block {
                bail!("AES-{} round trip failed for {}", size.bits(), hex::encode(block));
            }
        }
        info!(key_bits = size.bits(), samples, "random round trips passed");
    }
    println!("check passed");
    Ok(())
}

fn cmd_demo(bits: usize, seed: Option<u64>) -> Result<()> {
    let size = KeySize::from_len(bits / 8)
        .filter(|size| size.bits() == bits)
        .with_context(|| format!("unsupported key size {bits}; use 128, 192 or 256"))?;
    let mut rng = seeded_rng(seed);
    let key = random_key(&mut rng, size)?;
    let round_keys = expand_key(&key);

    let mut block = [0u8; BLOCK_LEN];
    rng.fill_bytes(&mut block);
    let ciphertext = encrypt_block(&block, &round_keys);
    let decrypted = decrypt_block(&ciphertext, &round_keys);

    println!("demo key: {}", hex::encode(key.as_bytes()));
    println!("plaintext: {}", hex::encode(block));
    println!("ciphertext: {}", hex::encode(ciphertext));
    println!("decrypted: {}", hex::encode(decrypted));
    if decrypted != block {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_block_hex(text: &str) -> Result<Block> {
    let mut block = [0u8; BLOCK_LEN];
    hex::decode_to_slice(text, &mut block).context("decode block hex")?;
    Ok(block)
}

fn random_key(rng: &mut impl RngCore, size: KeySize) -> Result<CipherKey> {
    let mut bytes = vec![0u8; size.key_bytes()];
    rng.fill_bytes(&mut bytes);
    Ok(CipherKey::new(&bytes)?)
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f";
    const WRONG_KEY_HEX: &str = "0f0e0d0c0b0a09080706050403020100";
    const PLAINTEXT: &[u8] = b"twenty-one byte input";

    fn transform_args(key_hex: &str, input: &Path, output: Option<&Path>) -> TransformArgs {
        TransformArgs {
            key: KeySource {
                key_file: None,
                key_hex: Some(key_hex.to_string()),
            },
            input: input.to_path_buf(),
            output: output.map(Path::to_path_buf),
            mode: Mode::Ecb,
            no_pad: false,
            threads: None,
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn key_source_is_exclusive_and_required() {
        assert!(Cli::try_parse_from(["rijndael", "schedule"]).is_err());
        assert!(Cli::try_parse_from([
            "rijndael",
            "schedule",
            "--key-file",
            "k",
            "--key-hex",
            "00"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["rijndael", "schedule", "--key-hex", "00"]).is_ok());
    }

    #[test]
    fn enc_defaults_to_ecb_with_padding() {
        let cli = Cli::try_parse_from(["rijndael", "-v", "enc", "--key-hex", "00", "--input", "in"])
            .expect("valid arguments");
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Enc(args) => {
                assert_eq!(args.mode, Mode::Ecb);
                assert!(!args.no_pad);
                assert!(args.output.is_none());
            }
            _ => panic!("expected enc"),
        }
    }

    #[test]
    fn known_answers_hold() {
        cmd_check(4, Some(1)).expect("self check");
    }

    #[test]
    fn run_blocks_round_trips_with_every_thread_setting() {
        let cipher = Rijndael::from_key(&CipherKey::from([9u8; 32]));
        let mut rng = seeded_rng(Some(3));
        let mut data = vec![0u8; BLOCK_LEN * 40];
        rng.fill_bytes(&mut data);
        let original = data.clone();
        for threads in [None, Some(1), Some(2)] {
            run_blocks(&mut data, &cipher, Direction::Encrypt, threads).expect("encrypt");
            assert_ne!(data, original);
            run_blocks(&mut data, &cipher, Direction::Decrypt, threads).expect("decrypt");
            assert_eq!(data, original);
        }
    }

    #[test]
    fn demo_rejects_unknown_sizes() {
        assert!(cmd_demo(160, Some(0)).is_err());
        assert!(cmd_demo(129, Some(0)).is_err());
        assert!(cmd_demo(192, Some(0)).is_ok());
    }

    #[test]
    fn enc_then_dec_restores_unaligned_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let plain = dir.path().join("plain.bin");
        let key_file = dir.path().join("key.txt");
        let sealed = dir.path().join("sealed.bin");
        let opened = dir.path().join("opened.bin");
        fs::write(&plain, PLAINTEXT).expect("write plaintext");
        fs::write(&key_file, "00010203 04050607\n08090a0b 0c0d0e0f\n").expect("write key");

        let mut enc = transform_args(KEY_HEX, &plain, Some(&sealed));
        enc.key = KeySource {
            key_file: Some(key_file),
            key_hex: None,
        };
        cmd_transform(&enc, Direction::Encrypt).expect("encrypt");
        let ciphertext = fs::read(&sealed).expect("read ciphertext");
        assert_eq!(ciphertext.len(), 32);
        assert_ne!(&ciphertext[..16], &PLAINTEXT[..16]);

        let dec = transform_args(KEY_HEX, &sealed, Some(&opened));
        cmd_transform(&dec, Direction::Decrypt).expect("decrypt");
        assert_eq!(fs::read(&opened).expect("read plaintext"), PLAINTEXT);
    }

    #[test]
    fn unaligned_input_without_padding_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let plain = dir.path().join("plain.bin");
        fs::write(&plain, PLAINTEXT).expect("write plaintext");

        let mut enc = transform_args(KEY_HEX, &plain, None);
        enc.no_pad = true;
        let err = cmd_transform(&enc, Direction::Encrypt).expect_err("unaligned no-pad input");
        assert!(err.to_string().contains("not a multiple of 16"));

        let dec = transform_args(KEY_HEX, &plain, None);
        let err = cmd_transform(&dec, Direction::Decrypt).expect_err("unaligned ciphertext");
        assert!(err.to_string().contains("not a multiple of 16"));
    }

    #[test]
    fn chaining_mode_is_rejected_before_reading_input() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut enc = transform_args(KEY_HEX, &dir.path().join("missing.bin"), None);
        enc.mode = Mode::Cbc;
        let err = cmd_transform(&enc, Direction::Encrypt).expect_err("cbc");
        assert!(err.to_string().contains("not implemented"));
    }

    #[test]
    fn wrong_key_fails_padding_check() {
        let dir = tempfile::tempdir().expect("temp dir");
        let plain = dir.path().join("plain.bin");
        let sealed = dir.path().join("sealed.bin");
        let opened = dir.path().join("opened.bin");
        fs::write(&plain, PLAINTEXT).expect("write plaintext");

        cmd_transform(
            &transform_args(KEY_HEX, &plain, Some(&sealed)),
            Direction::Encrypt,
        )
        .expect("encrypt");
        let err = cmd_transform(
            &transform_args(WRONG_KEY_HEX, &sealed, Some(&opened)),
            Direction::Decrypt,
        )
        .expect_err("wrong key");
        assert!(err.to_string().contains("strip padding"));
        assert!(!opened.exists());
    }
}
