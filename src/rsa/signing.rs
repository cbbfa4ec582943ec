// RSA signatures
// Raw s = m^d mod n, checked by s^e mod n == m

use num_bigint::BigUint;

use super::keyfile::encode_username;
use super::keygen::RsaPublicKey;
use super::numtheory::pow_mod;
use crate::error::{Result, RsaError};

/// Sign `m` with the private exponent
pub fn sign(m: &BigUint, d: &BigUint, n: &BigUint) -> BigUint {
    pow_mod(m, d, n)
}

/// Check that `s` is a signature of `m` under (e, n)
pub fn verify(m: &BigUint, s: &BigUint, e: &BigUint, n: &BigUint) -> bool {
    pow_mod(s, e, n) == *m
}

impl RsaPublicKey {
    /// The integer the username signature covers: the base-62 username
    /// reduced modulo n.
    pub fn identity_message(&self) -> Result<BigUint> {
        Ok(encode_username(&self.username)? % &self.n)
    }

    /// Confirm that `s` signs `username` under this key
    pub fn verify_identity(&self) -> Result<()> {
        let m = self.identity_message()?;
        if verify(&m, &self.s, &self.e, &self.n) {
            Ok(())
        } else {
            Err(RsaError::SignatureMismatch {
                username: self.username.clone(),
            })
        }
    }
}
