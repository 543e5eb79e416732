use std::sync::Arc;

use log::debug;

use crate::api::{
    execute_remote_operation_async, DefaultSender, Error, HttpSender, OcUserService, UserService,
};
use crate::datasource::user::UserInfo;
use crate::session::{ClientManager, Credentials};

/// Login against a server that has no account on the device yet.
pub struct RemoteAuthenticationDataSource<S: HttpSender = DefaultSender> {
    client_manager: Arc<ClientManager<S>>,
}

impl<S: HttpSender> RemoteAuthenticationDataSource<S> {
    pub fn new(client_manager: Arc<ClientManager<S>>) -> Self {
        Self { client_manager }
    }

    /// Logs in with user name and password.
    ///
    /// Returns the user of the credentials and the base URL to store with the
    /// new account.
    pub async fn login_basic(
        &self,
        server_path: &str,
        username: &str,
        password: &str,
    ) -> Result<(UserInfo, Option<String>), Error> {
        self.login(server_path, Credentials::basic(username, password)).await
    }

    /// Logs in with an access token obtained through OAuth.
    pub async fn login_oauth(
        &self,
        server_path: &str,
        username: &str,
        access_token: &str,
    ) -> Result<(UserInfo, Option<String>), Error> {
        self.login(server_path, Credentials::bearer(username, access_token)).await
    }

    async fn login(
        &self,
        server_path: &str,
        credentials: Credentials,
    ) -> Result<(UserInfo, Option<String>), Error> {
        // Same session as the server checks, so their cookies are sent along
        let session = self
            .client_manager
            .get_anonymous_client(server_path, false, Some(credentials))?;
        debug!("Logging in to {:?}", session.base_uri().map(|url| url.as_str()));

        let sender = Arc::clone(self.client_manager.sender());
        let service = OcUserService::new(Arc::clone(&session), sender);
        let user_info = execute_remote_operation_async(|| service.get_user_info()).await?;

        let base_url = session
            .base_uri()
            .map(|url| url.as_str().trim_end_matches('/').to_string());
        Ok((UserInfo::from(user_info), base_url))
    }
}
