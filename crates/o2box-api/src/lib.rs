// o2box-api: Async Rust client for the O2 Box 1421 wireless device directory

pub mod auth;
pub mod directory;
pub mod error;
pub mod model;
pub mod scrape;
pub mod transport;

pub use auth::SessionAuthenticator;
pub use directory::DeviceDirectory;
pub use error::Error;
pub use model::{DhcpLease, MacAddress, WirelessDevice, WirelessInfo};
pub use transport::{HttpSession, SessionOpener, TlsMode, TransportConfig};
