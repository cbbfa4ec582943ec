// encrypt: encrypt a file with a public key after checking its signature

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use rsa_files::cli::{init_tracing, report_component};
use rsa_files::rsa::read_public_key;
use rsa_files::util::{open_input, open_key_file, open_output};

#[derive(Parser, Debug)]
#[command(
    name = "encrypt",
    about = "Encrypts data using RSA encryption.\nEncrypted data is decrypted by the decrypt program."
)]
struct Args {
    /// Input file of data to encrypt (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for encrypted data (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Public key file
    #[arg(short = 'n', long = "pubkey", default_value = "rsa.pub")]
    pubkey: PathBuf,

    /// Display verbose program output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let mut pbfile = open_key_file(&args.pubkey)?;
    let mut infile = open_input(args.input.as_ref())?;

    let public_key = read_public_key(&mut pbfile)
        .with_context(|| format!("failed to read {}", args.pubkey.display()))?;

    tracing::info!("username: {}", public_key.username);
    tracing::debug!(bits = public_key.bit_length(), "public key loaded");
    report_component("s", &public_key.s);
    report_component("n", &public_key.n);
    report_component("e", &public_key.e);

    public_key.verify_identity()?;

    let mut outfile = open_output(args.output.as_ref())?;

    let blocks = public_key.encrypt_stream(&mut infile, &mut outfile)?;
    tracing::debug!(blocks, "wrote ciphertext");
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("encrypt: {:#}", e);
        process::exit(1);
    }
}
