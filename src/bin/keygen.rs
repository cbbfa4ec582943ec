// keygen: generate an RSA key pair and write rsa.pub / rsa.priv

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use rsa_files::cli::{default_seed, init_tracing, report_component};
use rsa_files::rsa::{
    check_key_params, encode_username, make_private_key, make_public_key, sign, write_private_key,
    write_public_key, PublicKeyMaterial, RsaPrivateKey, RsaPublicKey,
};
use rsa_files::util::create_key_file;
use rsa_files::RandomSource;

#[derive(Parser, Debug)]
#[command(name = "keygen", about = "Generates an RSA public/private key pair.")]
struct Args {
    /// Minimum bits needed for public key n
    #[arg(short, long, default_value_t = 256)]
    bits: u64,

    /// Miller-Rabin iterations for testing primes
    #[arg(short, long, default_value_t = 50)]
    iters: u64,

    /// Public key file
    #[arg(short = 'n', long = "pubkey", default_value = "rsa.pub")]
    pubkey: PathBuf,

    /// Private key file
    #[arg(short = 'd', long = "privkey", default_value = "rsa.priv")]
    privkey: PathBuf,

    /// Random seed for testing (default: seconds since the epoch)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Username bound into the public key by signature
    #[arg(short, long, env = "USER")]
    username: String,

    /// Display verbose program output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    check_key_params(args.bits, args.iters)?;
    let identity = encode_username(&args.username)?;
    let mut pbfile = create_key_file(&args.pubkey)?;
    let mut pvfile = create_key_file(&args.privkey)?;
    let mut rng = RandomSource::new(args.seed.unwrap_or_else(default_seed));
    tracing::debug!(seed = rng.seed(), bits = args.bits, iters = args.iters, "generating key pair");

    let PublicKeyMaterial { p, q, n, e } = make_public_key(args.bits, args.iters, &mut rng)
        .context("failed to generate public key")?;
    let d = make_private_key(&e, &p, &q).context("failed to derive private key")?;
    let s = sign(&(identity % &n), &d, &n);
    rng.clear();

    tracing::info!("username: {}", args.username);
    for (name, value) in [("s", &s), ("p", &p), ("q", &q), ("n", &n), ("e", &e), ("d", &d)] {
        report_component(name, value);
    }
    drop((p, q));

    let public_key = RsaPublicKey {
        n: n.clone(),
        e,
        s,
        username: args.username,
    };
    let private_key = RsaPrivateKey { n, d };

    write_public_key(&public_key, &mut pbfile)
        .with_context(|| format!("failed to write {}", args.pubkey.display()))?;
    write_private_key(&private_key, &mut pvfile)
        .with_context(|| format!("failed to write {}", args.privkey.display()))?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("keygen: {:#}", e);
        process::exit(1);
    }
}
