//! `STA_infos` table: stations associated with the radio.

use indexmap::IndexMap;
use tracing::debug;

use super::pseudo_array::{self, Cleanup, PseudoArrayRecord};
use crate::error::Error;
use crate::model::{MacAddress, WirelessInfo};

/// Variable name of the station table.
pub const PREFIX: &str = "STA_infos";

/// Marks the declaration line (`new lan_client_t()`), which is not a data row.
pub const DECLARATION_TOKEN: &str = "lan_client_t";

/// Build the MAC -> signal/link-rate map, in station index order.
///
/// Indices without a MAC are skipped. A non-numeric `RSSI` or `rate`
/// fails the whole parse.
pub fn parse<'a, I>(lines: I) -> Result<IndexMap<MacAddress, WirelessInfo>, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let records = pseudo_array::extract(lines, PREFIX, Some(DECLARATION_TOKEN), Cleanup::Trim);

    let mut stations = IndexMap::with_capacity(records.len());
    for (index, record) in &records {
        let Some(mac) = record
            .get("mac")
            .map(MacAddress::from_byte_list)
            .filter(|m| !m.is_empty())
        else {
            debug!(index, "station without MAC, skipping");
            continue;
        };

        let info = WirelessInfo {
            signal: parse_int(record, "RSSI")?,
            link_rate: parse_int(record, "rate")?,
        };
        stations.insert(mac, info);
    }

    debug!(count = stations.len(), "parsed wireless stations");
    Ok(stations)
}

fn parse_int<T: std::str::FromStr>(
    record: &PseudoArrayRecord,
    field: &str,
) -> Result<Option<T>, Error> {
    record
        .get(field)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| Error::MalformedField {
                field: field.to_owned(),
                value: raw.to_owned(),
            })
        })
        .transpose()
}
