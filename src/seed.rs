//! Scenario seeds
//!
//! Seeds are byte strings written in hex on the command line and in output
//! file names. They are zero-padded to 32 bytes to key a ChaCha8 generator and
//! the seed length selects the ChaCha stream, so `ab` and `ab00` differ while
//! the same seed yields the same scenario on every platform.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Length of freshly drawn seeds in bytes
pub const FRESH_SEED_LEN: usize = 16;

/// Longest accepted seed in bytes
pub const MAX_SEED_LEN: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("seed must not be empty")]
    Empty,

    #[error("seed must have an even number of hex digits, got {0}")]
    OddLength(usize),

    #[error("seed contains a non-hex character at position {0}")]
    InvalidDigit(usize),

    #[error("seed is {0} bytes long, at most {MAX_SEED_LEN} are supported")]
    TooLong(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed(Vec<u8>);

impl Seed {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SeedError> {
        if bytes.is_empty() {
            return Err(SeedError::Empty);
        }
        if bytes.len() > MAX_SEED_LEN {
            return Err(SeedError::TooLong(bytes.len()));
        }
        Ok(Self(bytes.to_vec()))
    }

    pub fn from_hex(hex: &str) -> Result<Self, SeedError> {
        let hex = hex.trim();
        if hex.len() % 2 != 0 {
            return Err(SeedError::OddLength(hex.len()));
        }

        let bytes = hex
            .as_bytes()
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let mut byte = 0u8;
                for (j, digit) in pair.iter().enumerate() {
                    let value = (*digit as char)
                        .to_digit(16)
                        .ok_or(SeedError::InvalidDigit(i * 2 + j))?;
                    byte = (byte << 4) | value as u8;
                }
                Ok(byte)
            })
            .collect::<Result<Vec<u8>, SeedError>>()?;

        Self::from_bytes(&bytes)
    }

    /// Draw a new seed from the operating-system seeded thread RNG
    pub fn fresh() -> Self {
        let bytes: [u8; FRESH_SEED_LEN] = rand::rng().random();
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    /// A generator positioned at the start of this seed's stream
    pub fn rng(&self) -> ChaCha8Rng {
        let mut key = [0u8; MAX_SEED_LEN];
        key[..self.0.len()].copy_from_slice(&self.0);
        let mut rng = ChaCha8Rng::from_seed(key);
        rng.set_stream(self.0.len() as u64);
        rng
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
