// Scraping of the `lan_overview.htm` status page
//
// The page carries two tables as script pseudo-arrays: radio stations
// (`STA_infos`) and DHCP leases (`dhcpclients`). `pseudo_array` knows the
// statement grammar, the table modules know the fields.

pub mod dhcp;
pub mod mac;
pub mod pseudo_array;
pub mod wireless;

pub use pseudo_array::{Cleanup, FIELDS_PER_RECORD, PseudoArrayRecord};
