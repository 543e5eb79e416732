use std::sync::Arc;

use crate::api::{
    execute_remote_operation_async, DefaultSender, Error, HttpSender, OcServerInfoService,
    RemoteServerInfo, ServerInfoService,
};
use crate::session::ClientManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationMethod {
    None,
    BasicHttpAuth,
    BearerToken,
}

impl AuthenticationMethod {
    /// Method announced by the `WWW-Authenticate` challenges of a server.
    ///
    /// Bearer wins over basic when the server offers both.
    pub fn from_challenges(challenges: &[String]) -> Self {
        let offers = |scheme: &str| {
            challenges
                .iter()
                .any(|challenge| challenge.trim_start().to_ascii_lowercase().starts_with(scheme))
        };

        if offers("bearer") {
            AuthenticationMethod::BearerToken
        } else if offers("basic") {
            AuthenticationMethod::BasicHttpAuth
        } else {
            AuthenticationMethod::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub owncloud_version: String,
    pub base_url: String,
    pub authentication_method: AuthenticationMethod,
    pub is_secure_connection: bool,
}

/// What a server offers, checked before an account is created for it.
///
/// Every call goes through the anonymous session, so cookies the server sets
/// here are sent again when logging in.
pub struct RemoteServerInfoDataSource<S: HttpSender = DefaultSender> {
    client_manager: Arc<ClientManager<S>>,
}

impl<S: HttpSender> RemoteServerInfoDataSource<S> {
    pub fn new(client_manager: Arc<ClientManager<S>>) -> Self {
        Self { client_manager }
    }

    pub async fn get_remote_status(&self, path: &str) -> Result<RemoteServerInfo, Error> {
        let service = self.service(path)?;
        execute_remote_operation_async(|| service.get_remote_status()).await
    }

    pub async fn get_authentication_method(
        &self,
        path: &str,
    ) -> Result<AuthenticationMethod, Error> {
        let service = self.service(path)?;
        let challenges =
            execute_remote_operation_async(|| service.get_authentication_challenges()).await?;
        Ok(AuthenticationMethod::from_challenges(&challenges))
    }

    /// Status first, then the authentication method at the URL the status was read from.
    pub async fn get_server_info(&self, path: &str) -> Result<ServerInfo, Error> {
        let status = self.get_remote_status(path).await?;
        let authentication_method = self.get_authentication_method(&status.base_url).await?;

        Ok(ServerInfo {
            owncloud_version: status.version.as_str().to_string(),
            base_url: status.base_url,
            authentication_method,
            is_secure_connection: status.is_secure_connection,
        })
    }

    fn service(&self, path: &str) -> Result<OcServerInfoService<S>, Error> {
        let session = self.client_manager.get_anonymous_client(path, false, None)?;
        Ok(OcServerInfoService::new(session, Arc::clone(self.client_manager.sender())))
    }
}
