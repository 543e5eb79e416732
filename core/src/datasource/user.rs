use std::sync::Arc;

use crate::api::{
    execute_remote_operation_async, DefaultSender, Error, HttpSender, RemoteAvatarData, RemoteQuota,
    RemoteUserInfo, UserService,
};
use crate::session::ClientManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
}

impl From<RemoteUserInfo> for UserInfo {
    fn from(remote: RemoteUserInfo) -> Self {
        Self {
            id: remote.id,
            display_name: remote.display_name,
            email: remote.email,
        }
    }
}

/// Storage figures of an account, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserQuota {
    pub available: i64,
    pub used: i64,
}

impl From<RemoteQuota> for UserQuota {
    fn from(remote: RemoteQuota) -> Self {
        Self {
            available: remote.free,
            used: remote.used,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAvatar {
    pub avatar_data: Vec<u8>,
    pub e_tag: String,
    pub mime_type: String,
}

impl From<RemoteAvatarData> for UserAvatar {
    fn from(remote: RemoteAvatarData) -> Self {
        Self {
            avatar_data: remote.avatar_data,
            e_tag: remote.e_tag,
            mime_type: remote.mime_type,
        }
    }
}

/// User data of the accounts registered on the device.
pub struct RemoteUserDataSource<S: HttpSender = DefaultSender> {
    client_manager: Arc<ClientManager<S>>,
    avatar_dimension: u32,
}

impl<S: HttpSender> RemoteUserDataSource<S> {
    pub fn new(client_manager: Arc<ClientManager<S>>, avatar_dimension: u32) -> Self {
        Self {
            client_manager,
            avatar_dimension,
        }
    }

    pub async fn get_user_info(&self, account_name: &str) -> Result<UserInfo, Error> {
        let service = self.client_manager.get_user_service(Some(account_name))?;
        execute_remote_operation_async(|| service.get_user_info())
            .await
            .map(UserInfo::from)
    }

    pub async fn get_user_quota(&self, account_name: &str) -> Result<UserQuota, Error> {
        let service = self.client_manager.get_user_service(Some(account_name))?;
        execute_remote_operation_async(|| service.get_user_quota())
            .await
            .map(UserQuota::from)
    }

    /// Avatar scaled by the server to the configured dimension.
    pub async fn get_user_avatar(&self, account_name: &str) -> Result<UserAvatar, Error> {
        let service = self.client_manager.get_user_service(Some(account_name))?;
        execute_remote_operation_async(|| service.get_user_avatar(self.avatar_dimension))
            .await
            .map(UserAvatar::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{create_error_response, create_json_response, create_response, MockSender};
    use crate::config::ClientConfig;
    use crate::session::{Account, Credentials, MemoryAccountStore};
    use crate::storage::MemoryPreferences;
    use http::StatusCode;
    use reqwest::{Response, Url};
    use serde_json::json;

    const ACCOUNT: &str = "admin@cloud.example.com";

    fn create_data_source(
        responses: Vec<crate::api::RemoteResult<Response>>,
    ) -> RemoteUserDataSource<MockSender> {
        let store = MemoryAccountStore::new();
        store.add_account(
            Account::new(ACCOUNT, "owncloud"),
            Url::parse("https://cloud.example.com").unwrap(),
            Credentials::basic("admin", "secret"),
        );
        let manager = ClientManager::with_sender(
            Arc::new(store),
            Arc::new(MemoryPreferences::new()),
            ClientConfig::default(),
            MockSender::new(responses),
        );

        RemoteUserDataSource::new(Arc::new(manager), 96)
    }

    #[tokio::test]
    async fn get_user_info_maps_to_domain_model() {
        // Arrange
        let data_source = create_data_source(vec![create_json_response(json!({
            "ocs": { "meta": {}, "data": { "id": "admin", "display-name": "Admin", "email": null } }
        }))]);

        // Act
        let info = data_source.get_user_info(ACCOUNT).await.unwrap();

        // Assert
        assert_eq!(
            info,
            UserInfo { id: "admin".to_string(), display_name: "Admin".to_string(), email: None }
        );
    }

    #[tokio::test]
    async fn get_user_quota_maps_free_space_to_available() {
        // Arrange
        let data_source = create_data_source(vec![create_json_response(json!({
            "ocs": {
                "meta": {},
                "data": { "quota": { "free": 800, "used": 200, "total": 1000, "relative": 20.0 } }
            }
        }))]);

        // Act
        let quota = data_source.get_user_quota(ACCOUNT).await.unwrap();

        // Assert
        assert_eq!(quota, UserQuota { available: 800, used: 200 });
    }

    #[tokio::test]
    async fn get_user_avatar_requests_configured_dimension() {
        // Arrange
        let data_source = create_data_source(vec![create_response(
            StatusCode::OK,
            &[("Content-Type", "image/jpeg"), ("ETag", "\"abc\"")],
            vec![1, 2, 3],
        )]);

        // Act
        let avatar = data_source.get_user_avatar(ACCOUNT).await.unwrap();

        // Assert
        assert_eq!(avatar.mime_type, "image/jpeg");
        let captured_requests = data_source.client_manager.sender().get_captured_requests();
        assert!(captured_requests[0].url().path().ends_with("/avatar/admin/96"));
    }

    #[tokio::test]
    async fn failed_call_surfaces_typed_error() {
        // Arrange
        let not_found = create_error_response(StatusCode::NOT_FOUND, "");
        let data_source = create_data_source(vec![not_found]);

        // Act
        let result = data_source.get_user_info(ACCOUNT).await;

        // Assert
        assert_eq!(result, Err(Error::FileNotFound));
    }

    #[tokio::test]
    async fn unknown_account_surfaces_account_not_found() {
        // Arrange
        let data_source = create_data_source(vec![]);

        // Act
        let result = data_source.get_user_quota("ghost@cloud.example.com").await;

        // Assert
        assert_eq!(result, Err(Error::AccountNotFound));
    }
}
