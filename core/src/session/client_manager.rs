use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, warn};
use reqwest::Url;

use crate::api::{DefaultSender, Error, HttpSender, OcUserService};
use crate::config::ClientConfig;
use crate::session::account::{Account, AccountStore};
use crate::session::credentials::Credentials;
use crate::session::remote_session::Session;
use crate::storage::{PreferencesProvider, SELECTED_ACCOUNT};

/// Hands out the sessions every remote data source works with.
///
/// Two kinds of sessions are managed:
/// - one anonymous session used through a whole login flow, so the cookies set
///   by the status check are still there when logging in and fetching user info;
/// - one session per account, built on first use and reused afterwards.
///
/// Both caches are behind locks held while a session is built, so concurrent
/// callers asking for the same account always get the same session.
pub struct ClientManager<S: HttpSender = DefaultSender> {
    account_store: Arc<dyn AccountStore>,
    preferences: Arc<dyn PreferencesProvider>,
    config: ClientConfig,
    sender: Arc<S>,
    anonymous_client: Mutex<Option<Arc<Session>>>,
    account_clients: Mutex<HashMap<Account, Arc<Session>>>,
}

impl ClientManager<DefaultSender> {
    pub fn new(
        account_store: Arc<dyn AccountStore>,
        preferences: Arc<dyn PreferencesProvider>,
        config: ClientConfig,
    ) -> ClientManager<DefaultSender> {
        Self::with_sender(account_store, preferences, config, DefaultSender)
    }
}

impl<S: HttpSender> ClientManager<S> {
    pub fn with_sender(
        account_store: Arc<dyn AccountStore>,
        preferences: Arc<dyn PreferencesProvider>,
        config: ClientConfig,
        sender: S,
    ) -> ClientManager<S> {
        Self {
            account_store,
            preferences,
            config,
            sender: Arc::new(sender),
            anonymous_client: Mutex::new(None),
            account_clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sender shared by every service this manager builds.
    pub fn sender(&self) -> &Arc<S> {
        &self.sender
    }

    /// Returns the session used during the login process.
    ///
    /// The cached session is reused unless `requires_new_client` is set, in which
    /// case a fresh one bound to `path` replaces it. On reuse, `credentials`
    /// replace the session's credentials when given; a new session starts with
    /// `credentials` or anonymous ones. For regular use see
    /// [`get_client_for_account`](Self::get_client_for_account).
    pub fn get_anonymous_client(
        &self,
        path: &str,
        requires_new_client: bool,
        credentials: Option<Credentials>,
    ) -> Result<Arc<Session>, Error> {
        let mut slot = self.anonymous_client.lock().unwrap_or_else(PoisonError::into_inner);

        if !requires_new_client {
            if let Some(session) = slot.as_ref() {
                if let Some(credentials) = credentials {
                    session.set_credentials(credentials);
                }
                return Ok(Arc::clone(session));
            }
        }

        let base_uri = Url::parse(path).map_err(|_| Error::IncorrectAddress)?;
        debug!("Creating anonymous session for {}", base_uri);
        let session = Arc::new(Session::build(
            None,
            Some(base_uri),
            credentials.unwrap_or_default(),
            &self.config,
        )?);
        *slot = Some(Arc::clone(&session));

        Ok(session)
    }

    /// Returns the session of `account_name`, or of the current account when the
    /// name is missing or blank.
    ///
    /// When no account can be resolved the returned session has no account and
    /// no base URI; requests made through it fail with
    /// [`ResultCode::AccountNotFound`](crate::ResultCode::AccountNotFound).
    pub fn get_client_for_account(
        &self,
        account_name: Option<&str>,
    ) -> Result<Arc<Session>, Error> {
        let Some(account) = self.resolve_account(account_name) else {
            debug!("No account resolved for {:?}, using a detached session", account_name);
            return Ok(Arc::new(Session::build(
                None,
                None,
                Credentials::Anonymous,
                &self.config,
            )?));
        };

        let mut clients = self.account_clients.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(session) = clients.get(&account) {
            return Ok(Arc::clone(session));
        }

        debug!("Creating session for account {}", account.name);
        let base_uri = self.account_store.base_url(&account);
        let credentials = self.account_store.credentials(&account);
        let session = Arc::new(Session::build(
            Some(account.clone()),
            base_uri,
            credentials,
            &self.config,
        )?);
        clients.insert(account, Arc::clone(&session));

        Ok(session)
    }

    /// User service bound to the session of `account_name`.
    pub fn get_user_service(&self, account_name: Option<&str>) -> Result<OcUserService<S>, Error> {
        let session = self.get_client_for_account(account_name)?;
        Ok(OcUserService::new(session, Arc::clone(&self.sender)))
    }

    /// Drops the cached session of `account_name`; the next lookup builds a new one.
    pub fn remove_client_for_account(&self, account_name: &str) -> bool {
        let mut clients = self.account_clients.lock().unwrap_or_else(PoisonError::into_inner);
        let before = clients.len();
        clients.retain(|account, _| account.name != account_name);

        let removed = clients.len() != before;
        if removed {
            debug!("Removed session for account {}", account_name);
        }
        removed
    }

    /// Reloads the credentials of a cached session from the account store.
    pub fn refresh_credentials_for_account(&self, account_name: &str) -> bool {
        let clients = self.account_clients.lock().unwrap_or_else(PoisonError::into_inner);

        match clients.iter().find(|(account, _)| account.name == account_name) {
            Some((account, session)) => {
                session.set_credentials(self.account_store.credentials(account));
                true
            }
            None => false,
        }
    }

    /// Picks the account to use.
    ///
    /// 1. an explicit, non blank name, when it belongs to a known account;
    /// 2. the selected account preference, only while that account still exists;
    /// 3. the first account of the configured type, in account store order.
    ///
    /// The last step is best effort: which account comes first is up to the store.
    pub fn resolve_account(&self, account_name: Option<&str>) -> Option<Account> {
        let accounts = self.account_store.accounts_by_type(&self.config.account_type);

        if let Some(name) = account_name.filter(|name| !name.trim().is_empty()) {
            let account = accounts.into_iter().find(|account| account.name == name);
            if account.is_none() {
                warn!("Account {} is not known", name);
            }
            return account;
        }

        self.current_account(accounts)
    }

    fn current_account(&self, accounts: Vec<Account>) -> Option<Account> {
        let selected = match self.preferences.get_string(SELECTED_ACCOUNT) {
            Ok(selected) => selected,
            Err(e) => {
                warn!("Failed to read selected account: {}", e);
                None
            }
        };

        // The saved account must still be one of the accounts in the store
        if let Some(selected) = selected {
            if let Some(account) = accounts.iter().find(|account| account.name == selected) {
                return Some(account.clone());
            }
            warn!("Selected account {} no longer exists, falling back", selected);
        }

        accounts.into_iter().next()
    }
}
