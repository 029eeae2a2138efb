//! `dhcpclients` table: the address lease list.

use std::collections::HashMap;

use tracing::debug;

use super::pseudo_array::{self, Cleanup};
use crate::model::{DhcpLease, MacAddress};

/// Variable name of the lease table.
pub const PREFIX: &str = "dhcpclients";

/// Build the MAC -> hostname/IP map.
///
/// The firmware always writes a MAC for a lease; an index without one has
/// nothing to join on and is skipped. Empty names and empty address lists
/// become `None`.
pub fn parse<'a, I>(lines: I) -> HashMap<MacAddress, DhcpLease>
where
    I: IntoIterator<Item = &'a str>,
{
    let records = pseudo_array::extract(lines, PREFIX, None, Cleanup::Compact);

    let mut leases = HashMap::with_capacity(records.len());
    for (index, record) in &records {
        let Some(mac) = record
            .get("mac")
            .map(MacAddress::from_byte_list)
            .filter(|m| !m.is_empty())
        else {
            debug!(index, "lease without MAC, skipping");
            continue;
        };

        let lease = DhcpLease {
            name: record
                .get("name")
                .filter(|n| !n.is_empty())
                .map(str::to_owned),
            ip: record.get("ip").and_then(dotted_ip),
        };
        leases.insert(mac, lease);
    }

    debug!(count = leases.len(), "parsed DHCP leases");
    leases
}

/// `[192,168,1,5]` -> `192.168.1.5`.
fn dotted_ip(raw: &str) -> Option<String> {
    let octets: Vec<&str> = raw
        .split(|c: char| matches!(c, '[' | ']' | ','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if octets.is_empty() {
        None
    } else {
        Some(octets.join("."))
    }
}
