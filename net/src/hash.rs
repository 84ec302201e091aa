//! 32 byte hashes identifying blocks
//!
//! Hashes are stored and sent in wire order; the string form is the
//! byte-reversed hex that explorers display.

use std::fmt::{self, Debug, Display, Formatter};
use std::io::{Read, Write};
use std::str::FromStr;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::{Decode, Encode, Result};

pub const HASH_SIZE: usize = 32;


#[derive(Debug, Error)]
pub enum HashError {
    #[error("invalid hex in hash string: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("hash string decodes to {0} bytes, expected 32")]
    Length(usize),
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    pub const ZERO: Hash = Hash([0; HASH_SIZE]);

    pub fn new(bytes: [u8; HASH_SIZE]) -> Hash {
        Hash(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Hash::ZERO
    }

    /// Hashes the input twice with SHA256
    pub fn double_sha256(input: &[u8]) -> Hash {
        let first = Sha256::digest(input);
        let second = Sha256::digest(&first);

        let mut result = [0; HASH_SIZE];
        result.copy_from_slice(&second);
        Hash(result)
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Hash {
        Hash(bytes)
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> std::result::Result<Hash, HashError> {
        let mut bytes = hex::decode(s)?;
        if bytes.len() != HASH_SIZE {
            return Err(HashError::Length(bytes.len()));
        }
        bytes.reverse();

        let mut result = [0; HASH_SIZE];
        result.copy_from_slice(&bytes);
        Ok(Hash(result))
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Debug for Hash {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}

impl Encode for Hash {
    #[inline]
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.0.encode(w)
    }
}

impl Decode for Hash {
    #[inline]
    fn decode<R: Read>(r: &mut R) -> Result<Hash> {
        Ok(Hash(<[u8; HASH_SIZE]>::decode(r)?))
    }
}
