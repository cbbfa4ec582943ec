// Shared pieces of the keygen/encrypt/decrypt programs

use std::time::{SystemTime, UNIX_EPOCH};

use num_bigint::BigUint;
use tracing_subscriber::EnvFilter;

/// Install the log subscriber. RUST_LOG takes precedence; otherwise
/// `verbose` selects info level and the default is warn.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Seed used when none is given on the command line: seconds since the epoch
pub fn default_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Log one key component with its bit length, as `name (bits) = hex`
pub fn report_component(name: &str, value: &BigUint) {
    tracing::info!("{} ({} bits) = {}", name, value.bits(), value.to_str_radix(16));
}
