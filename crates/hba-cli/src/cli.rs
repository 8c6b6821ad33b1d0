//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pgbouncer-hba - Validate and assemble pgbouncer auth_hba_file rules
#[derive(Parser, Debug)]
#[command(name = "pgbouncer-hba")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate declarations and write the assembled auth file
    ///
    /// Without an output path (from --output or [target].path) the
    /// document is printed to stdout.
    ///
    /// Examples:
    ///   pgbouncer-hba render hba.toml
    ///   pgbouncer-hba render hba.d/ -o /etc/pgbouncer/pgbouncer_hba.conf
    Render {
        /// Declaration file or directory of *.toml files
        declarations: PathBuf,

        /// Output file, overriding [target].path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the document instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate declarations and compare with the file on disk
    Check {
        /// Declaration file or directory of *.toml files
        declarations: PathBuf,

        /// File to compare against, overriding [target].path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a single rule and print its line
    Line {
        /// Connection type: local, host, hostssl or hostnossl
        #[arg(long = "type")]
        connection_type: String,

        /// Database names (comma-separated) or all, sameuser, @file
        #[arg(long, value_delimiter = ',', default_value = "all")]
        database: Vec<String>,

        /// User names (comma-separated) or all, @file
        #[arg(long, value_delimiter = ',', default_value = "all")]
        user: Vec<String>,

        /// Client address range in CIDR form
        #[arg(long)]
        address: Option<String>,

        /// Auth method: trust, reject, md5, password, peer, cert or ident
        #[arg(long)]
        auth_method: String,

        /// Order key
        #[arg(long, default_value = "150")]
        order: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
