// RSA Key Generation
// Builds the modulus and exponents from two random primes

use num_bigint::BigUint;
use num_traits::One;

use super::keyfile::encode_username;
use super::numtheory::{gcd, generate_prime, mod_inverse};
use super::signing::sign;
use crate::error::{Result, RsaError};
use crate::random::RandomSource;

/// Smallest modulus size accepted by [`make_public_key`]
pub const MIN_MODULUS_BITS: u64 = 32;

/// RSA Public Key, bound to a username by a self-signature
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPublicKey {
    pub n: BigUint,        // Modulus
    pub e: BigUint,        // Public exponent
    pub s: BigUint,        // Signature of the username
    pub username: String,
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPrivateKey {
    pub n: BigUint,  // Modulus (same as public)
    pub d: BigUint,  // Private exponent
}

/// Output of [`make_public_key`]; `p` and `q` are secret and only needed
/// until the private exponent has been derived.
#[derive(Debug, Clone)]
pub struct PublicKeyMaterial {
    pub p: BigUint,
    pub q: BigUint,
    pub n: BigUint,
    pub e: BigUint,
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

impl RsaPublicKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

/// Check key generation parameters before any file is touched
pub fn check_key_params(bits: u64, iters: u64) -> Result<()> {
    if bits < MIN_MODULUS_BITS {
        return Err(RsaError::InvalidParameter(format!(
            "modulus must be at least {} bits, got {}",
            MIN_MODULUS_BITS, bits
        )));
    }
    if iters == 0 {
        return Err(RsaError::InvalidParameter(
            "at least one Miller-Rabin iteration is required".to_string(),
        ));
    }
    Ok(())
}

/// Generate two primes and a public exponent for a modulus of at least
/// `bits` bits.
///
/// `p` gets a bit length drawn from [bits/4, 3*bits/4), `q` the rest. If the
/// product comes out short both lengths grow by one and the pair is redrawn;
/// a pair with p == q is redrawn at the same lengths.
/// `e` is a random `bits`-bit value coprime to (p-1)(q-1).
pub fn make_public_key(bits: u64, iters: u64, rng: &mut RandomSource) -> Result<PublicKeyMaterial> {
    check_key_params(bits, iters)?;

    let lower = bits / 4;
    let upper = (3 * bits) / 4;
    let mut p_bits = rng.gen_u64_range(lower, upper);
    let mut q_bits = bits - p_bits;

    let (p, q, n) = loop {
        let p = generate_prime(p_bits, iters, rng)?;
        let q = generate_prime(q_bits, iters, rng)?;
        if p == q {
            tracing::debug!(bits = p_bits, "drew the same prime twice, retrying");
            continue;
        }
        let n = &p * &q;
        if n.bits() >= bits {
            break (p, q, n);
        }
        tracing::debug!(n_bits = n.bits(), bits, "modulus too short, retrying");
        p_bits += 1;
        q_bits += 1;
    };

    // φ(n) = n - p - q + 1 = (p-1)(q-1)
    let totient = &n - &p - &q + 1u8;

    let e = loop {
        let candidate = rng.gen_bits(bits);
        if candidate > BigUint::one() && gcd(&candidate, &totient).is_one() {
            break candidate;
        }
    };

    tracing::debug!(
        p_bits = p.bits(),
        q_bits = q.bits(),
        n_bits = n.bits(),
        e_bits = e.bits(),
        "public key generated"
    );

    Ok(PublicKeyMaterial { p, q, n, e })
}

/// Derive the private exponent d = e^(-1) mod (p-1)(q-1)
pub fn make_private_key(e: &BigUint, p: &BigUint, q: &BigUint) -> Result<BigUint> {
    let totient = (p - 1u8) * (q - 1u8);
    mod_inverse(e, &totient).ok_or(RsaError::NoModularInverse)
}

/// Generate a complete key pair whose public half is signed for `username`.
///
/// The primes are discarded before returning.
pub fn generate_keypair(
    bits: u64,
    iters: u64,
    username: &str,
    rng: &mut RandomSource,
) -> Result<RsaKeyPair> {
    let identity = encode_username(username)?;
    let PublicKeyMaterial { p, q, n, e } = make_public_key(bits, iters, rng)?;
    let d = make_private_key(&e, &p, &q)?;
    let s = sign(&(identity % &n), &d, &n);

    Ok(RsaKeyPair {
        public_key: RsaPublicKey {
            n: n.clone(),
            e,
            s,
            username: username.to_string(),
        },
        private_key: RsaPrivateKey { n, d },
    })
}
