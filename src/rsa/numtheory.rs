// Number theory for RSA
// gcd, modular inverse, modular exponentiation and Miller-Rabin prime search

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{Result, RsaError};
use crate::random::RandomSource;

/// Greatest common divisor (iterative Euclid)
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Compute modular inverse: a^(-1) mod n
/// Returns None if gcd(a, n) != 1
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Option<BigUint> {
    let modulus = BigInt::from(n.clone());
    let (mut r, mut r1) = (modulus.clone(), BigInt::from(a.clone()));
    let (mut t, mut t1) = (BigInt::zero(), BigInt::one());

    while !r1.is_zero() {
        let q = &r / &r1;

        // (r, r') <- (r', r - q*r')
        let next_r = &r - &q * &r1;
        r = std::mem::replace(&mut r1, next_r);

        // (t, t') <- (t', t - q*t')
        let next_t = &t - &q * &t1;
        t = std::mem::replace(&mut t1, next_t);
    }

    if !r.is_one() {
        return None;
    }
    if t.is_negative() {
        t += &modulus;
    }

    t.to_biguint()
}

/// Modular exponentiation: a^d mod n
/// Uses square-and-multiply
pub fn pow_mod(a: &BigUint, d: &BigUint, n: &BigUint) -> BigUint {
    if n.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = a.clone();
    let mut exp = d.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % n;
        }
        base = (&base * &base) % n;
        exp >>= 1;
    }

    result
}

/// Miller-Rabin witness test.
///
/// Returns true when `a` proves `n` composite. `n` must be odd and > 3.
pub fn is_witness(a: &BigUint, n: &BigUint) -> bool {
    let n_minus_one = n - 1u8;

    // n-1 = u * 2^t with u odd
    let mut u = n_minus_one.clone();
    let mut t = 0u64;
    while u.is_even() {
        u >>= 1;
        t += 1;
    }

    let two = BigUint::from(2u8);
    let mut result = pow_mod(a, &u, n);

    for _ in 0..t {
        let y = pow_mod(&result, &two, n);
        if y.is_one() && !result.is_one() && result != n_minus_one {
            return true;
        }
        result = y;
    }

    !result.is_one()
}

/// Miller-Rabin primality test with `iters` random bases.
/// A composite survives with probability at most 4^-iters.
pub fn is_probable_prime(n: &BigUint, iters: u64, rng: &mut RandomSource) -> bool {
    let two = BigUint::from(2u8);
    if n < &two || (n != &two && n.is_even()) {
        return false;
    }
    if n < &BigUint::from(4u8) {
        return true;
    }

    // bases drawn from [2, n-2]
    let upper = n - 1u8;
    for _ in 0..iters {
        let a = rng.gen_range(&two, &upper);
        if is_witness(&a, n) {
            return false;
        }
    }

    true
}

/// Generate a random probable prime of exactly `bits` bits
pub fn generate_prime(bits: u64, iters: u64, rng: &mut RandomSource) -> Result<BigUint> {
    if bits < 2 {
        return Err(RsaError::InvalidParameter(format!(
            "no prime has {} bits",
            bits
        )));
    }

    let mut attempts = 0u64;
    loop {
        attempts += 1;
        let candidate = rng.gen_exact_bits(bits)?;
        if is_probable_prime(&candidate, iters, rng) {
            tracing::debug!(bits, attempts, "found probable prime");
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    fn sieve(limit: usize) -> Vec<bool> {
        let mut is_prime = vec![true; limit];
        is_prime[0] = false;
        is_prime[1] = false;
        let mut i = 2;
        while i * i < limit {
            if is_prime[i] {
                let mut j = i * i;
                while j < limit {
                    is_prime[j] = false;
                    j += i;
                }
            }
            i += 1;
        }
        is_prime
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(&big(48), &big(18)), big(6));
        assert_eq!(gcd(&big(18), &big(48)), big(6));
        assert_eq!(gcd(&big(17), &big(0)), big(17));
        assert_eq!(gcd(&big(0), &big(17)), big(17));
        assert_eq!(gcd(&big(35), &big(35)), big(35));
        assert_eq!(gcd(&big(13), &big(7)), big(1));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let a = big(3);
        let m = big(7);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!(inv, big(5));
        assert_eq!((a * inv) % m, big(1));
    }

    #[test]
    fn test_mod_inverse_negative_coefficient() {
        // Euclid ends with a negative t here; it must come back in [0, n)
        let inv = mod_inverse(&big(7), &big(40)).unwrap();
        assert_eq!(inv, big(23));
    }

    #[test]
    fn test_mod_inverse_exhaustive_small() {
        for n in 2u64..60 {
            for a in 0..n {
                let result = mod_inverse(&big(a), &big(n));
                if gcd(&big(a), &big(n)) == big(1) {
                    let t = result.expect("coprime values have an inverse");
                    assert!(t < big(n));
                    assert_eq!((big(a) * t) % big(n), big(1), "a={} n={}", a, n);
                } else {
                    assert!(result.is_none(), "a={} n={}", a, n);
                }
            }
        }
    }

    #[test]
    fn test_mod_inverse_larger_than_modulus() {
        let inv = mod_inverse(&big(10), &big(7)).unwrap();
        assert_eq!((big(10) * inv) % big(7), big(1));
    }

    #[test]
    fn test_pow_mod() {
        // 3^5 mod 7 = 243 mod 7 = 5
        assert_eq!(pow_mod(&big(3), &big(5), &big(7)), big(5));
        assert_eq!(pow_mod(&big(4), &big(13), &big(497)), big(445));
    }

    #[test]
    fn test_pow_mod_identities() {
        for n in 2u64..30 {
            for a in 0..40u64 {
                assert_eq!(pow_mod(&big(a), &big(0), &big(n)), big(1));
                assert_eq!(pow_mod(&big(a), &big(1), &big(n)), big(a % n));
            }
        }
        assert_eq!(pow_mod(&big(5), &big(3), &big(1)), big(0));
    }

    #[test]
    fn test_pow_mod_matches_builtin() {
        let mut rng = RandomSource::new(11);
        for _ in 0..20 {
            let a = rng.gen_bits(300);
            let d = rng.gen_bits(200);
            let n = rng.gen_exact_bits(256).unwrap();
            assert_eq!(pow_mod(&a, &d, &n), a.modpow(&d, &n));
        }
    }

    #[test]
    fn test_is_witness() {
        // 2 proves 9 composite; 2 is not a witness for the prime 13
        assert!(is_witness(&big(2), &big(9)));
        assert!(!is_witness(&big(2), &big(13)));
        // 2 is a strong liar for 2047 = 23 * 89
        assert!(!is_witness(&big(2), &big(2047)));
        assert!(is_witness(&big(3), &big(2047)));
    }

    #[test]
    fn test_is_probable_prime_small_range() {
        let mut rng = RandomSource::new(42);
        let table = sieve(1000);
        for (n, &prime) in table.iter().enumerate() {
            assert_eq!(
                is_probable_prime(&big(n as u64), 50, &mut rng),
                prime,
                "n = {}",
                n
            );
        }
    }

    #[test]
    fn test_is_probable_prime_carmichael() {
        let mut rng = RandomSource::new(5);
        for n in [561u64, 1105, 1729, 2465, 2821, 6601, 8911] {
            assert!(!is_probable_prime(&big(n), 50, &mut rng));
        }
    }

    #[test]
    fn test_is_probable_prime_large() {
        let mut rng = RandomSource::new(9);
        // 2^127 - 1 is a Mersenne prime
        let m127 = (BigUint::one() << 127u32) - 1u8;
        assert!(is_probable_prime(&m127, 20, &mut rng));
        assert!(!is_probable_prime(&(&m127 * &m127), 20, &mut rng));
    }

    #[test]
    fn test_generate_prime() {
        let mut rng = RandomSource::new(42);
        for bits in [2u64, 8, 64, 128] {
            let p = generate_prime(bits, 50, &mut rng).unwrap();
            assert_eq!(p.bits(), bits);
            assert!(is_probable_prime(&p, 50, &mut rng));
        }
    }

    #[test]
    fn test_generate_prime_is_reproducible() {
        let p = generate_prime(96, 20, &mut RandomSource::new(1234)).unwrap();
        let q = generate_prime(96, 20, &mut RandomSource::new(1234)).unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn test_generate_prime_rejects_one_bit() {
        let mut rng = RandomSource::new(0);
        assert!(matches!(
            generate_prime(1, 10, &mut rng),
            Err(RsaError::InvalidParameter(_))
        ));
    }
}
