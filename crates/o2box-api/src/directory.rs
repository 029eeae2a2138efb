// Wireless device directory
//
// Orchestrates one fetch: open a session, log in, grab the overview page,
// log out, then scrape and join offline. The router only allows one admin
// session, so logout runs as soon as the page is in hand and is attempted
// on every path that got past a successful login.

use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use secrecy::SecretString;
use tracing::{debug, error, warn};
use url::Url;

use crate::auth::SessionAuthenticator;
use crate::error::Error;
use crate::model::{DhcpLease, MacAddress, WirelessDevice, WirelessInfo};
use crate::scrape::{dhcp, wireless};
use crate::transport::{SessionOpener, TransportConfig};

/// Lists the wireless clients connected to one router.
///
/// Every call opens its own session through the [`SessionOpener`]; nothing
/// is kept between calls.
pub struct DeviceDirectory<O = TransportConfig> {
    auth: SessionAuthenticator,
    opener: O,
}

impl DeviceDirectory<TransportConfig> {
    /// Directory with the default transport configuration.
    pub fn new(base_url: Url, password: SecretString) -> Self {
        Self::with_opener(base_url, password, TransportConfig::default())
    }

    /// Directory for a bare host (`192.168.1.1`, `router:8080`) or full URL.
    pub fn for_host(host: &str, password: SecretString) -> Result<Self, Error> {
        Ok(Self::new(base_url_for(host)?, password))
    }
}

impl<O: SessionOpener> DeviceDirectory<O> {
    /// Directory using a caller-supplied session opener.
    pub fn with_opener(base_url: Url, password: SecretString, opener: O) -> Self {
        Self {
            auth: SessionAuthenticator::new(base_url, password),
            opener,
        }
    }

    /// The router base URL.
    pub fn base_url(&self) -> &Url {
        self.auth.base_url()
    }

    /// List connected wireless devices, or `None` on any failure.
    ///
    /// This is the error boundary: the cause is logged and callers only learn
    /// that the fetch failed. Use [`fetch_wireless_devices`](Self::fetch_wireless_devices)
    /// to get the error itself.
    pub async fn get_wireless_devices(&self) -> Option<Vec<WirelessDevice>> {
        match self.fetch_wireless_devices().await {
            Ok(devices) => Some(devices),
            Err(e) if e.is_auth_failure() => {
                error!("login failed");
                None
            }
            Err(e) => {
                error!(error = ?e, "error occurred while getting wlan devices from router: {e}");
                if e.is_transient() {
                    warn!("router did not answer in time; it may be busy or unreachable");
                } else if e.is_format_change() {
                    warn!("overview page no longer matches the expected layout");
                }
                None
            }
        }
    }

    /// List connected wireless devices.
    ///
    /// A rejected password returns [`Error::Authentication`] without fetching
    /// or logging out. After a successful login, logout is always attempted;
    /// a failed page fetch takes precedence over a failed logout.
    pub async fn fetch_wireless_devices(&self) -> Result<Vec<WirelessDevice>, Error> {
        let session = self.opener.open_session()?;

        if !self.auth.login(&session).await? {
            return Err(Error::Authentication {
                message: "router rejected the password".into(),
            });
        }

        let page = self.auth.fetch_overview(&session).await;
        let logout = self.auth.logout(&session).await;
        let page = page?;
        logout?;

        parse_overview(&page)
    }

    /// Check reachability and credentials: log in, then log straight out.
    ///
    /// Any failure, including a rejected password, yields `false`.
    pub async fn try_login(&self) -> bool {
        let result = async {
            let session = self.opener.open_session()?;
            if !self.auth.login(&session).await? {
                return Ok(false);
            }
            self.auth.logout(&session).await?;
            Ok::<_, Error>(true)
        }
        .await;

        match result {
            Ok(accepted) => {
                debug!(accepted, "login check finished");
                accepted
            }
            Err(e) => {
                error!(error = ?e, "error occurred while checking router login: {e}");
                false
            }
        }
    }
}

/// Base URL for `host`: `http://<host>` unless it already names a scheme.
pub fn base_url_for(host: &str) -> Result<Url, Error> {
    if host.contains("://") {
        Ok(Url::parse(host)?)
    } else {
        Ok(Url::parse(&format!("http://{host}"))?)
    }
}

/// Scrape both tables out of an overview page and join them.
pub fn parse_overview(page: &str) -> Result<Vec<WirelessDevice>, Error> {
    let leases = dhcp::parse(page.lines());
    let stations = wireless::parse(page.lines())?;
    Ok(join(stations, &leases))
}

/// Merge station info with lease info by MAC, in station order.
///
/// Stations without a lease keep `name`/`ip` empty; leases without a
/// station are dropped.
pub fn join<S: BuildHasher>(
    stations: IndexMap<MacAddress, WirelessInfo>,
    leases: &HashMap<MacAddress, DhcpLease, S>,
) -> Vec<WirelessDevice> {
    stations
        .into_iter()
        .map(|(mac, info)| {
            let lease = leases.get(&mac);
            WirelessDevice::from_parts(mac, info, lease)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mac(raw: &str) -> MacAddress {
        MacAddress::from_byte_list(raw)
    }

    #[test]
    fn join_fills_name_and_ip_from_lease() {
        let mut stations = IndexMap::new();
        stations.insert(
            mac("AA:BB:CC:DD:EE:FF"),
            WirelessInfo {
                signal: Some(-50),
                link_rate: Some(144),
            },
        );
        let mut leases = HashMap::new();
        leases.insert(
            mac("AA:BB:CC:DD:EE:FF"),
            DhcpLease {
                name: Some("desktop".into()),
                ip: Some("192.168.1.5".into()),
            },
        );

        let devices = join(stations, &leases);

        assert_eq!(
            devices,
            vec![WirelessDevice {
                mac: mac("AA:BB:CC:DD:EE:FF"),
                name: Some("desktop".into()),
                ip: Some("192.168.1.5".into()),
                signal: Some(-50),
                link_rate: Some(144),
            }]
        );
    }

    #[test]
    fn join_keeps_station_without_lease() {
        let mut stations = IndexMap::new();
        stations.insert(mac("11:22:33:44:55:66"), WirelessInfo::default());

        let devices = join(stations, &HashMap::new());

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, None);
        assert_eq!(devices[0].ip, None);
    }

    #[test]
    fn join_drops_lease_without_station() {
        let mut leases = HashMap::new();
        leases.insert(mac("11:22:33:44:55:66"), DhcpLease::default());

        assert!(join(IndexMap::new(), &leases).is_empty());
    }

    #[test]
    fn join_preserves_station_order() {
        let mut stations = IndexMap::new();
        for last in ["03", "01", "02"] {
            stations.insert(mac(&format!("00:00:00:00:00:{last}")), WirelessInfo::default());
        }

        let order: Vec<String> = join(stations, &HashMap::new())
            .into_iter()
            .map(|d| d.mac.to_string())
            .collect();

        assert_eq!(
            order,
            ["00:00:00:00:00:03", "00:00:00:00:00:01", "00:00:00:00:00:02"]
        );
    }

    #[test]
    fn for_host_builds_http_base_url() {
        let directory =
            DeviceDirectory::for_host("192.168.1.1:8080", "pw".to_string().into()).unwrap();
        assert_eq!(directory.base_url().as_str(), "http://192.168.1.1:8080/");
    }

    #[test]
    fn base_url_keeps_explicit_scheme() {
        let url = base_url_for("https://router.local").unwrap();
        assert_eq!(url.as_str(), "https://router.local/");
    }

    #[test]
    fn for_host_rejects_garbage() {
        let result = DeviceDirectory::for_host("bad host name", "pw".to_string().into());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
