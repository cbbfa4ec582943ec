// RSA over arbitrary-precision integers
// Key generation, identity signatures and block file encryption

pub mod cli;
pub mod error;
pub mod random;
pub mod rsa;
pub mod util;

pub use error::{Result, RsaError};
pub use random::RandomSource;
