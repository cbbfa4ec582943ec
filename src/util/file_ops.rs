// File Operations for RSA key files and data streams
// Opens inputs/outputs with stdin/stdout fallbacks and owner-only key files

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, RsaError};

fn open_failure(path: &Path, source: io::Error) -> RsaError {
    RsaError::FileOpenFailure {
        path: path.to_path_buf(),
        source,
    }
}

/// Open an existing key file for reading
pub fn open_key_file(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| open_failure(path, e))?;
    Ok(BufReader::new(file))
}

/// Create (or truncate) a key file readable and writable by the owner only
pub fn create_key_file(path: &Path) -> Result<BufWriter<File>> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(path).map_err(|e| open_failure(path, e))?;

    // mode() only applies to newly created files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(|e| open_failure(path, e))?;
    }

    Ok(BufWriter::new(file))
}

/// Open a data file for reading, or stdin when no path is given
pub fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|e| open_failure(path, e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Create a data file for writing, or stdout when no path is given
pub fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| open_failure(path, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}
