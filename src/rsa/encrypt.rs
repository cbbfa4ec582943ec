// RSA Encryption Implementation
// Single-block encryption and the block-per-line stream format

use std::io::{ErrorKind, Read, Write};

use num_bigint::BigUint;

use super::keygen::RsaPublicKey;
use super::numtheory::pow_mod;
use super::padding::{frame_block, payload_size};
use crate::error::Result;

/// E(m) = m^e mod n, for 0 < m < n
pub fn encrypt(m: &BigUint, e: &BigUint, n: &BigUint) -> BigUint {
    pow_mod(m, e, n)
}

/// Fill `buf` from `input`, stopping early only at end of input
fn read_block<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Encrypt a byte stream block by block.
///
/// Each block carries up to k-1 input bytes behind the marker byte and is
/// written as one line of lowercase hex. Input that ends on a block boundary
/// (including empty input) produces no trailing marker-only block.
///
/// Returns the number of blocks written.
pub fn encrypt_stream<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    n: &BigUint,
    e: &BigUint,
) -> Result<u64> {
    let mut buf = vec![0u8; payload_size(n)?];
    let mut blocks = 0u64;

    loop {
        let read = read_block(input, &mut buf)?;
        if read == 0 {
            break;
        }

        let m = frame_block(&buf[..read]);
        let c = encrypt(&m, e, n);
        writeln!(output, "{}", c.to_str_radix(16))?;
        blocks += 1;
        tracing::trace!(block = blocks, bytes = read, "encrypted block");

        if read < buf.len() {
            break;
        }
    }

    output.flush()?;
    tracing::debug!(blocks, "encryption finished");
    Ok(blocks)
}

impl RsaPublicKey {
    /// Encrypt a stream with this key
    pub fn encrypt_stream<R: Read, W: Write>(&self, input: &mut R, output: &mut W) -> Result<u64> {
        encrypt_stream(input, output, &self.n, &self.e)
    }
}
