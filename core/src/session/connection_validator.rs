use serde::Deserialize;

/// Policy applied to every session the client manager builds.
///
/// Comes from the application configuration; the manager only forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionValidator {
    /// Drop the session cookies whenever the connection is revalidated.
    pub clear_cookies_on_validation: bool,
    /// Accept certificates that don't chain to a trusted root.
    pub accept_self_signed: bool,
}

impl Default for ConnectionValidator {
    fn default() -> Self {
        Self {
            clear_cookies_on_validation: true,
            accept_self_signed: false,
        }
    }
}

impl ConnectionValidator {
    pub(crate) fn apply(&self, builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        builder.danger_accept_invalid_certs(self.accept_self_signed)
    }
}
