// Block framing
// Each plaintext block is prefixed with 0xFF before it becomes an integer

use num_bigint::BigUint;

use crate::error::{Result, RsaError};

/// Leading byte of every framed block
pub const MARKER_BYTE: u8 = 0xFF;

/// Block size k = (bits(n) - 1) / 8, marker byte included.
///
/// A k-byte block occupies at most bits(n) - 1 bits, so its value is below n.
pub fn block_size(n: &BigUint) -> usize {
    (n.bits().saturating_sub(1) / 8) as usize
}

/// Plaintext bytes carried per block (k - 1)
pub fn payload_size(n: &BigUint) -> Result<usize> {
    let k = block_size(n);
    if k < 2 {
        return Err(RsaError::InvalidParameter(format!(
            "a {}-bit modulus cannot hold a framed block",
            n.bits()
        )));
    }
    Ok(k - 1)
}

/// Prepend the marker and read the block as a big-endian integer
pub fn frame_block(data: &[u8]) -> BigUint {
    let mut buf = Vec::with_capacity(data.len() + 1);
    buf.push(MARKER_BYTE);
    buf.extend_from_slice(data);
    BigUint::from_bytes_be(&buf)
}

/// Export a decrypted block and strip its marker.
/// Returns None if the value does not start with the marker byte.
pub fn unframe_block(m: &BigUint) -> Option<Vec<u8>> {
    let bytes = m.to_bytes_be();
    match bytes.split_first() {
        Some((&MARKER_BYTE, rest)) => Some(rest.to_vec()),
        _ => None,
    }
}
