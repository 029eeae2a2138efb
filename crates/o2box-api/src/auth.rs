// Router session login/logout
//
// The admin UI runs a single-session lock keyed on the session cookie.
// Login posts the password as form data; the firmware answers 200 either
// way and signals a wrong password by embedding `msgLoginPwd_err` in the
// returned page. Logout must follow every successful login or the router
// keeps refusing other admin sessions.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::HttpSession;

/// Login form endpoint.
pub const LOGIN_PATH: &str = "/cgi-bin/Hn_login.cgi";
/// Logout endpoint.
pub const LOGOUT_PATH: &str = "/cgi-bin/Hn_logout.cgi";
/// Status page holding the station and lease tables.
pub const OVERVIEW_PATH: &str = "/lan_overview.htm";
/// Present in the login response when the password was rejected.
pub const LOGIN_ERROR_MARKER: &str = "msgLoginPwd_err";

/// Performs login, logout, and the overview fetch against one router.
pub struct SessionAuthenticator {
    base_url: Url,
    password: SecretString,
}

impl SessionAuthenticator {
    pub fn new(base_url: Url, password: SecretString) -> Self {
        Self { base_url, password }
    }

    /// The router base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Submit the password on `session`.
    ///
    /// Returns `Ok(false)` when the router rejected the password and
    /// `Ok(true)` otherwise. On success the session cookie lives in the
    /// session's jar.
    pub async fn login<S: HttpSession>(&self, session: &S) -> Result<bool, Error> {
        let url = self.base_url.join(LOGIN_PATH)?;
        debug!("logging in at {}", url);

        let form = [
            ("controller", "Overview"),
            ("action", "Login"),
            ("id", "0"),
            ("idTextPassword", self.password.expose_secret()),
        ];
        let body = session.post_form(url, &form).await?;

        if body.contains(LOGIN_ERROR_MARKER) {
            debug!("router rejected the password");
            return Ok(false);
        }

        debug!("logged in");
        Ok(true)
    }

    /// End the session, releasing the router's admin lock.
    ///
    /// The response status is not checked: some firmware answers the logout
    /// request with an error page after dropping the session. Only a request
    /// that never completed is an error.
    pub async fn logout<S: HttpSession>(&self, session: &S) -> Result<(), Error> {
        let url = self.base_url.join(LOGOUT_PATH)?;
        debug!("logging out at {}", url);

        let status = session.get_status(url).await?;
        if (200..300).contains(&status) {
            debug!("logged out");
        } else {
            warn!(status, "logout answered with a non-success status");
        }
        Ok(())
    }

    /// Fetch the LAN overview page. Requires a logged-in session.
    pub async fn fetch_overview<S: HttpSession>(&self, session: &S) -> Result<String, Error> {
        let url = self.base_url.join(OVERVIEW_PATH)?;
        let page = session.get(url).await?;
        debug!(bytes = page.len(), "fetched lan overview");
        Ok(page)
    }
}
