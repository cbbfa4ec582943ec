// File helpers shared by the command line programs

pub mod file_ops;

pub use file_ops::{create_key_file, open_input, open_output, open_key_file};
