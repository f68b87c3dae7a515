//! Paste identifier generation and validation.

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::Error;

/// Symbols a paste identifier draws from.
pub const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Identifier length in characters.
pub const ID_LEN: usize = 8;

// Largest multiple of the alphabet size below 256. Bytes at or above this
// are redrawn so every symbol stays equally likely.
const UNBIASED_LIMIT: u8 = 252;

/// An 8-character paste identifier over `a-z0-9`.
///
/// Identifiers are sampled uniformly from the OS randomness source. With
/// 36^8 (~2.8e12) possible values, collisions across realistic paste
/// volumes are negligible; the store overwrites silently on the off chance
/// one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PasteId(String);

impl PasteId {
    /// Generate a fresh random identifier.
    ///
    /// Fails only when the OS randomness source is unavailable.
    pub fn generate() -> Result<Self, Error> {
        let mut id = String::with_capacity(ID_LEN);
        let mut buf = [0u8; 2 * ID_LEN];
        while id.len() < ID_LEN {
            OsRng
                .try_fill_bytes(&mut buf)
                .map_err(|e| Error::IdGeneration(e.to_string()))?;
            for &byte in buf.iter() {
                if id.len() == ID_LEN {
                    break;
                }
                if byte < UNBIASED_LIMIT {
                    id.push(ALPHABET[usize::from(byte % ALPHABET.len() as u8)] as char);
                }
            }
        }
        Ok(Self(id))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PasteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PasteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PasteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == ID_LEN && s.bytes().all(|b| ALPHABET.contains(&b)) {
            Ok(Self(s.to_owned()))
        } else {
            Err(Error::InvalidPasteId(s.to_owned()))
        }
    }
}
