// RSA Decryption Implementation
// Single-block decryption and the inverse of the ciphertext stream format

use std::io::{BufRead, Write};

use num_bigint::BigUint;

use super::keygen::RsaPrivateKey;
use super::numtheory::pow_mod;
use super::padding::{block_size, unframe_block};
use crate::error::{Result, RsaError};

/// D(c) = c^d mod n
pub fn decrypt(c: &BigUint, d: &BigUint, n: &BigUint) -> BigUint {
    pow_mod(c, d, n)
}

/// Decrypt a stream of hex ciphertext lines into raw bytes.
///
/// Blank lines are skipped. A line that is not hex, or that does not decrypt
/// to a marker-framed block, fails with `MalformedCiphertext`.
///
/// Returns the number of blocks decrypted.
pub fn decrypt_stream<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    n: &BigUint,
    d: &BigUint,
) -> Result<u64> {
    let k = block_size(n);
    let mut blocks = 0u64;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let line_number = index + 1;
        let c = BigUint::parse_bytes(text.as_bytes(), 16)
            .ok_or(RsaError::MalformedCiphertext { line: line_number })?;
        let m = decrypt(&c, d, n);

        let bytes = unframe_block(&m)
            .filter(|bytes| bytes.len() < k)
            .ok_or(RsaError::MalformedCiphertext { line: line_number })?;
        output.write_all(&bytes)?;
        blocks += 1;
        tracing::trace!(block = blocks, bytes = bytes.len(), "decrypted block");
    }

    output.flush()?;
    tracing::debug!(blocks, "decryption finished");
    Ok(blocks)
}

impl RsaPrivateKey {
    /// Decrypt a stream with this key
    pub fn decrypt_stream<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<u64> {
        decrypt_stream(input, output, &self.n, &self.d)
    }
}
