// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod numtheory;
pub mod keygen;
pub mod keyfile;
pub mod signing;
pub mod encrypt;
pub mod decrypt;
pub mod padding;

pub use keygen::{
    check_key_params, generate_keypair, make_private_key, make_public_key, PublicKeyMaterial, RsaKeyPair,
    RsaPrivateKey, RsaPublicKey, MIN_MODULUS_BITS,
};
pub use keyfile::{
    decode_username, encode_username, read_private_key, read_public_key, write_private_key,
    write_public_key,
};
pub use signing::{sign, verify};
pub use encrypt::{encrypt, encrypt_stream};
pub use decrypt::{decrypt, decrypt_stream};
