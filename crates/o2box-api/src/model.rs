// ── Domain model ──
//
// MacAddress is the join key between the wireless station table and the
// DHCP lease table; WirelessDevice is what callers receive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scrape::mac;

// ── MacAddress ──────────────────────────────────────────────────────

/// MAC address in colon-separated form (`00:11:22:aa:bb:cc`).
///
/// Case is kept exactly as the firmware emitted it, so the same station
/// compares equal in both tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    /// Build a MAC from the router's byte-list form (`['00','11',...]`).
    pub fn from_byte_list(raw: &str) -> Self {
        Self(mac::normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_byte_list(s))
    }
}

// ── Intermediate records ────────────────────────────────────────────

/// Radio-side view of a station: one row of the `STA_infos` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WirelessInfo {
    /// RSSI as reported by the firmware.
    pub signal: Option<i32>,
    /// Negotiated link rate.
    pub link_rate: Option<u32>,
}

/// One row of the `dhcpclients` lease table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DhcpLease {
    pub name: Option<String>,
    pub ip: Option<String>,
}

// ── WirelessDevice ──────────────────────────────────────────────────

/// A wireless client currently associated with the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirelessDevice {
    pub mac: MacAddress,
    /// Hostname from the DHCP lease table, if the station holds a lease.
    pub name: Option<String>,
    /// Leased IPv4 address, if the station holds a lease.
    pub ip: Option<String>,
    pub signal: Option<i32>,
    pub link_rate: Option<u32>,
}

impl WirelessDevice {
    pub(crate) fn from_parts(
        mac: MacAddress,
        info: WirelessInfo,
        lease: Option<&DhcpLease>,
    ) -> Self {
        let (name, ip) = lease.map_or((None, None), |l| (l.name.clone(), l.ip.clone()));
        Self {
            mac,
            name,
            ip,
            signal: info.signal,
            link_rate: info.link_rate,
        }
    }
}

impl fmt::Display for WirelessDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt<T: fmt::Display>(v: Option<&T>) -> String {
            v.map_or_else(|| "-".into(), ToString::to_string)
        }

        write!(
            f,
            "WirelessDevice(mac={}, name={}, ip={}, signal={}, link_rate={})",
            self.mac,
            opt(self.name.as_ref()),
            opt(self.ip.as_ref()),
            opt(self.signal.as_ref()),
            opt(self.link_rate.as_ref()),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mac_address_keeps_firmware_case() {
        let mac = MacAddress::from_byte_list("['00','1A','2b','33','44','55']");
        assert_eq!(mac.as_str(), "00:1A:2b:33:44:55");
    }

    #[test]
    fn mac_address_from_str() {
        let mac: MacAddress = "['aa','bb','cc','dd','ee','ff']".parse().unwrap();
        assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn device_display_marks_missing_fields() {
        let device = WirelessDevice::from_parts(
            MacAddress::from_byte_list("['aa','bb','cc','dd','ee','ff']"),
            WirelessInfo {
                signal: Some(-61),
                link_rate: None,
            },
            None,
        );
        assert_eq!(
            device.to_string(),
            "WirelessDevice(mac=aa:bb:cc:dd:ee:ff, name=-, ip=-, signal=-61, link_rate=-)"
        );
    }

    #[test]
    fn device_takes_name_and_ip_from_lease() {
        let lease = DhcpLease {
            name: Some("laptop".into()),
            ip: Some("192.168.1.20".into()),
        };
        let device = WirelessDevice::from_parts(
            MacAddress::from_byte_list("['aa','bb','cc','dd','ee','ff']"),
            WirelessInfo::default(),
            Some(&lease),
        );
        assert_eq!(device.name.as_deref(), Some("laptop"));
        assert_eq!(device.ip.as_deref(), Some("192.168.1.20"));
    }
}
