// Error types shared by the RSA engine and the file helpers

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by key generation, key files and stream transforms
#[derive(Debug, Error)]
pub enum RsaError {
    /// A key or data file could not be opened or created
    #[error("failed to open {}: {source}", .path.display())]
    FileOpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The public exponent has no inverse modulo the totient
    #[error("public exponent has no inverse modulo the totient")]
    NoModularInverse,

    /// The self-signature in a public key does not match its username
    #[error("signature does not match username {username:?}")]
    SignatureMismatch { username: String },

    #[error("malformed key file: {0}")]
    MalformedKeyFile(String),

    /// A ciphertext line could not be parsed or did not decrypt to a framed block
    #[error("malformed ciphertext block on line {line}")]
    MalformedCiphertext { line: usize },

    #[error("invalid username {0:?}: only 0-9, A-Z and a-z are allowed")]
    InvalidUsername(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for RSA operations
pub type Result<T> = std::result::Result<T, RsaError>;
