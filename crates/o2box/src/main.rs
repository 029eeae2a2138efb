mod cli;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use o2box_api::directory::base_url_for;
use o2box_api::{DeviceDirectory, TlsMode, TransportConfig};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let directory = build_directory(&cli)?;

    if cli.check {
        if !directory.try_login().await {
            return Err(CliError::LoginFailed { host: cli.host });
        }
        output::print_output("Login successful");
        return Ok(());
    }

    tracing::debug!(host = %cli.host, "fetching wireless devices");
    let devices = directory
        .get_wireless_devices()
        .await
        .ok_or_else(|| CliError::FetchFailed {
            host: cli.host.clone(),
        })?;

    let rendered = output::render_devices(&cli.output, &devices)?;
    output::print_output(&rendered);
    Ok(())
}

/// Build the directory from the positional arguments and transport flags.
fn build_directory(cli: &Cli) -> Result<DeviceDirectory, CliError> {
    let base_url = base_url_for(&cli.host).map_err(|source| CliError::InvalidHost {
        host: cli.host.clone(),
        source,
    })?;

    let tls = match (&cli.ca_cert, cli.insecure) {
        (Some(path), _) => TlsMode::CustomCa(path.clone()),
        (None, true) => TlsMode::DangerAcceptInvalid,
        (None, false) => TlsMode::System,
    };
    let transport = TransportConfig::default()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_tls(tls);

    let password = SecretString::from(cli.password.clone());
    Ok(DeviceDirectory::with_opener(base_url, password, transport))
}
