//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Invalid router address '{host}'")]
    #[diagnostic(
        code(o2box::invalid_host),
        help("Pass a host name or IP address, e.g. 192.168.1.1 or o2.box:8080")
    )]
    InvalidHost {
        host: String,
        #[source]
        source: o2box_api::Error,
    },

    #[error("Error occurred while getting wireless devices from router")]
    #[diagnostic(
        code(o2box::fetch_failed),
        help(
            "Check that {host} is reachable and the password is correct.\n\
             Make sure no one else is logged in to the router's web interface.\n\
             Run with -v for details."
        )
    )]
    FetchFailed { host: String },

    #[error("Login to router at {host} failed")]
    #[diagnostic(
        code(o2box::login_failed),
        help("Verify the admin password. Run with -v for details.")
    )]
    LoginFailed { host: String },

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(o2box::render))]
    Render(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidHost { .. } => exit_code::USAGE,
            Self::LoginFailed { .. } => exit_code::AUTH,
            Self::FetchFailed { .. } | Self::Render(_) => exit_code::GENERAL,
        }
    }
}
