//! Filesystem primitives for pgbouncer-hba
//!
//! Safe writes for security-sensitive config files and checksums for
//! drift detection.

pub mod checksum;
pub mod error;
pub mod io;

pub use checksum::{compute_content_checksum, compute_file_checksum};
pub use error::{Error, Result};
pub use io::{read_text, write_atomic};
