//! Clap derive structures for the `o2box` CLI.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// o2box -- list the wireless devices connected to an O2 Box 1421
#[derive(Debug, Parser)]
#[command(
    name = "o2box",
    version,
    about = "List the wireless devices connected to an O2 Box 1421 router",
    long_about = "Lists the wireless devices connected to an O2 Box 1421 router.\n\n\
        Logs in to the router's web interface, reads the LAN overview page,\n\
        logs out again, and prints every associated wireless station together\n\
        with its DHCP hostname and address.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Router host name or address (optionally host:port or a full URL)
    pub host: String,

    /// Router admin password
    #[arg(env = "O2BOX_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Output format
    #[arg(long, short = 'o', env = "O2BOX_OUTPUT", default_value = "plain")]
    pub output: OutputFormat,

    /// Only verify that the password is accepted, then log out
    #[arg(long)]
    pub check: bool,

    /// Request timeout in seconds
    #[arg(long, env = "O2BOX_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Accept self-signed TLS certificates (https URLs only)
    #[arg(long, short = 'k', env = "O2BOX_INSECURE")]
    pub insecure: bool,

    /// PEM CA certificate to trust for https URLs
    #[arg(long, env = "O2BOX_CA_CERT", value_name = "PATH", conflicts_with = "insecure")]
    pub ca_cert: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

// ── Output ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One device record per line (default)
    Plain,
    /// Pretty table
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}
