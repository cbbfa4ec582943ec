// decrypt: decrypt a file produced by encrypt with a private key

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use rsa_files::cli::{init_tracing, report_component};
use rsa_files::rsa::read_private_key;
use rsa_files::util::{open_input, open_key_file, open_output};

#[derive(Parser, Debug)]
#[command(
    name = "decrypt",
    about = "Decrypts data using RSA decryption.\nEncrypted data is encrypted by the encrypt program."
)]
struct Args {
    /// Input file of data to decrypt (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for decrypted data (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Private key file
    #[arg(short = 'd', long = "privkey", default_value = "rsa.priv")]
    privkey: PathBuf,

    /// Display verbose program output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let mut pvfile = open_key_file(&args.privkey)?;
    let mut infile = open_input(args.input.as_ref())?;
    let mut outfile = open_output(args.output.as_ref())?;

    let private_key = read_private_key(&mut pvfile)
        .with_context(|| format!("failed to read {}", args.privkey.display()))?;

    report_component("n", &private_key.n);
    report_component("d", &private_key.d);

    let blocks = private_key.decrypt_stream(&mut infile, &mut outfile)?;
    tracing::debug!(blocks, "wrote plaintext");
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("decrypt: {:#}", e);
        process::exit(1);
    }
}
