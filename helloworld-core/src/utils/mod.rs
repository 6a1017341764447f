//! General Utilities.
//!
//! - [`fs`]: ensuring directories exist, reading files, moving files.
//! - [`paths`]: XDG and application-specific directory resolution.

pub mod fs;
pub mod paths;

pub use fs::{ensure_dir_exists, move_file, read_to_string};
