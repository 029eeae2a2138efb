// HTTP capability and session construction.
//
// The scraping and auth logic only talks to `HttpSession`. A session is one
// cookie-holding client; the router ties its admin lock to that cookie, so
// every directory call opens a fresh one through a `SessionOpener`.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;

/// Minimal HTTP capability needed to talk to the router.
///
/// `get` and `post_form` return the response body as text and report
/// non-success statuses as errors. `get_status` hands the status back instead.
pub trait HttpSession {
    /// `GET url`, returning the body.
    fn get(&self, url: Url) -> impl Future<Output = Result<String, Error>> + Send;

    /// `GET url`, discarding the body and returning the HTTP status code.
    ///
    /// Only connection, timeout and similar failures are errors.
    fn get_status(&self, url: Url) -> impl Future<Output = Result<u16, Error>> + Send;

    /// `POST url` with an urlencoded form, returning the body.
    fn post_form(
        &self,
        url: Url,
        form: &[(&str, &str)],
    ) -> impl Future<Output = Result<String, Error>> + Send;
}

/// Produces a fresh [`HttpSession`] per directory call.
pub trait SessionOpener {
    type Session: HttpSession;

    fn open_session(&self) -> Result<Self::Session, Error>;
}

impl HttpSession for reqwest::Client {
    async fn get(&self, url: Url) -> Result<String, Error> {
        debug!("GET {}", url);

        let resp = self
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(Error::Transport)?;

        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(bytes = body.len(), "response body received");
        Ok(body)
    }

    async fn get_status(&self, url: Url) -> Result<u16, Error> {
        debug!("GET {}", url);

        let resp = self.get(url).send().await.map_err(Error::Transport)?;
        Ok(resp.status().as_u16())
    }

    async fn post_form(&self, url: Url, form: &[(&str, &str)]) -> Result<String, Error> {
        debug!("POST {}", url);

        let resp = self
            .post(url)
            .form(form)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(Error::Transport)?;

        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(bytes = body.len(), "response body received");
        Ok(body)
    }
}

/// TLS verification mode.
///
/// The router serves its admin UI over plain HTTP by default; these only
/// matter when the base URL is `https://`.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed admin UIs).
    DangerAcceptInvalid,
}

/// Transport configuration for building per-call HTTP sessions.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            user_agent: concat!("o2box/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the TLS verification mode.
    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    /// Build a `reqwest::Client` with its own empty cookie jar.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .cookie_provider(Arc::new(Jar::default()));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

impl SessionOpener for TransportConfig {
    type Session = reqwest::Client;

    fn open_session(&self) -> Result<reqwest::Client, Error> {
        self.build_client()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_thirty_second_timeout() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("o2box/"));
    }

    #[test]
    fn builder_overrides_apply() {
        let config = TransportConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_tls(TlsMode::DangerAcceptInvalid);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(matches!(config.tls, TlsMode::DangerAcceptInvalid));
        config.open_session().unwrap();
    }

    #[test]
    fn missing_ca_file_is_tls_error() {
        let config = TransportConfig::default()
            .with_tls(TlsMode::CustomCa(PathBuf::from("/nonexistent/ca.pem")));
        let err = config.open_session().unwrap_err();
        assert!(matches!(err, Error::Tls(ref msg) if msg.contains("CA cert")));
    }
}
