//! Output formatting: plain, table, JSON, YAML.
//!
//! Plain prints one device record per line in directory order. Table uses
//! `tabled`, structured formats serialize the devices via serde.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use o2box_api::WirelessDevice;

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Link Rate")]
    link_rate: String,
}

impl From<&WirelessDevice> for DeviceRow {
    fn from(d: &WirelessDevice) -> Self {
        Self {
            mac: d.mac.to_string(),
            name: d.name.clone().unwrap_or_default(),
            ip: d.ip.clone().unwrap_or_default(),
            signal: d.signal.map(|s| s.to_string()).unwrap_or_default(),
            link_rate: d.link_rate.map(|r| r.to_string()).unwrap_or_default(),
        }
    }
}

// ── Render dispatch ─────────────────────────────────────────────────

/// Render the device list in the chosen format.
pub fn render_devices(
    format: &OutputFormat,
    devices: &[WirelessDevice],
) -> Result<String, CliError> {
    match format {
        OutputFormat::Plain => Ok(devices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => {
            let rows: Vec<DeviceRow> = devices.iter().map(DeviceRow::from).collect();
            Ok(Table::new(rows).with(Style::rounded()).to_string())
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(devices).map_err(|e| CliError::Render(e.to_string()))
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(devices).map_err(|e| CliError::Render(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(devices).map_err(|e| CliError::Render(e.to_string()))
        }
    }
}

/// Print the rendered output to stdout.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
