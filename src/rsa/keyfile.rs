// Key file format
//
// Public key:  <n hex>\n<e hex>\n<s hex>\n<username>\n
// Private key: <n hex>\n<d hex>\n
//
// Hex is lowercase. The username is signed as a base-62 integer.

use std::io::{BufRead, Write};

use num_bigint::BigUint;
use num_traits::Zero;

use super::keygen::{RsaPrivateKey, RsaPublicKey};
use crate::error::{Result, RsaError};

const BASE62_DIGITS: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

fn base62_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some((c - b'0') as u32),
        b'A'..=b'Z' => Some((c - b'A') as u32 + 10),
        b'a'..=b'z' => Some((c - b'a') as u32 + 36),
        _ => None,
    }
}

/// Interpret a username as a base-62 number (digits 0-9, A-Z, a-z)
pub fn encode_username(username: &str) -> Result<BigUint> {
    if username.is_empty() {
        return Err(RsaError::InvalidUsername(username.to_string()));
    }

    let mut value = BigUint::zero();
    for c in username.bytes() {
        let digit = base62_value(c).ok_or_else(|| RsaError::InvalidUsername(username.to_string()))?;
        value = value * 62u32 + digit;
    }
    Ok(value)
}

/// Inverse of [`encode_username`]. Leading zero digits do not survive.
pub fn decode_username(value: &BigUint) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    value
        .to_radix_be(62)
        .into_iter()
        .map(|d| BASE62_DIGITS[d as usize] as char)
        .collect()
}

fn to_hex(value: &BigUint) -> String {
    value.to_str_radix(16)
}

fn next_line<R: BufRead>(reader: &mut R, field: &str) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(RsaError::MalformedKeyFile(format!("missing {}", field)));
    }
    Ok(line.trim_end_matches(&['\n', '\r'][..]).to_string())
}

fn parse_hex(line: &str, field: &str) -> Result<BigUint> {
    BigUint::parse_bytes(line.trim().as_bytes(), 16)
        .ok_or_else(|| RsaError::MalformedKeyFile(format!("{} is not a hex integer", field)))
}

/// Write a public key as four lines: n, e, s (hex) and the username
pub fn write_public_key<W: Write>(key: &RsaPublicKey, writer: &mut W) -> Result<()> {
    if key.username.is_empty() || key.username.chars().any(char::is_whitespace) {
        return Err(RsaError::InvalidUsername(key.username.clone()));
    }
    writeln!(writer, "{}", to_hex(&key.n))?;
    writeln!(writer, "{}", to_hex(&key.e))?;
    writeln!(writer, "{}", to_hex(&key.s))?;
    writeln!(writer, "{}", key.username)?;
    writer.flush()?;
    Ok(())
}

/// Read a public key written by [`write_public_key`]
pub fn read_public_key<R: BufRead>(reader: &mut R) -> Result<RsaPublicKey> {
    let n = parse_hex(&next_line(reader, "modulus")?, "modulus")?;
    let e = parse_hex(&next_line(reader, "public exponent")?, "public exponent")?;
    let s = parse_hex(&next_line(reader, "signature")?, "signature")?;
    let username = next_line(reader, "username")?.trim().to_string();
    if username.is_empty() {
        return Err(RsaError::MalformedKeyFile("empty username".to_string()));
    }

    Ok(RsaPublicKey { n, e, s, username })
}

/// Write a private key as two lines: n and d (hex)
pub fn write_private_key<W: Write>(key: &RsaPrivateKey, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", to_hex(&key.n))?;
    writeln!(writer, "{}", to_hex(&key.d))?;
    writer.flush()?;
    Ok(())
}

/// Read a private key written by [`write_private_key`]
pub fn read_private_key<R: BufRead>(reader: &mut R) -> Result<RsaPrivateKey> {
    let n = parse_hex(&next_line(reader, "modulus")?, "modulus")?;
    let d = parse_hex(&next_line(reader, "private exponent")?, "private exponent")?;

    Ok(RsaPrivateKey { n, d })
}
