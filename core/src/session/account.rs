use std::fmt::Debug;
use std::sync::{PoisonError, RwLock};

use reqwest::Url;

use crate::session::credentials::Credentials;

/// Identity of an account known to the device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Account {
    pub name: String,
    pub account_type: String,
}

impl Account {
    pub fn new(name: &str, account_type: &str) -> Self {
        Self {
            name: name.to_string(),
            account_type: account_type.to_string(),
        }
    }
}

/// Source of the accounts registered on the device.
///
/// The order returned by [`accounts_by_type`](AccountStore::accounts_by_type) is the
/// store's own and is used as is when a fallback account has to be picked.
pub trait AccountStore: Send + Sync + Debug {
    fn accounts_by_type(&self, account_type: &str) -> Vec<Account>;

    fn base_url(&self, account: &Account) -> Option<Url>;

    fn credentials(&self, account: &Account) -> Credentials;
}

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    base_url: Url,
    credentials: Credentials,
}

/// In-memory account store keeping accounts in insertion order.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<StoredAccount>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the account, or replaces its data when it is already present.
    pub fn add_account(&self, account: Account, base_url: Url, credentials: Credentials) {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        let stored = StoredAccount { account, base_url, credentials };

        match accounts.iter_mut().find(|existing| existing.account == stored.account) {
            Some(existing) => *existing = stored,
            None => accounts.push(stored),
        }
    }

    pub fn remove_account(&self, account: &Account) {
        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|stored| &stored.account != account);
    }

    pub fn set_credentials(&self, account: &Account, credentials: Credentials) {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(stored) = accounts.iter_mut().find(|stored| &stored.account == account) {
            stored.credentials = credentials;
        }
    }

    fn find<R>(&self, account: &Account, f: impl FnOnce(&StoredAccount) -> R) -> Option<R> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts.iter().find(|stored| &stored.account == account).map(f)
    }
}

impl AccountStore for MemoryAccountStore {
    fn accounts_by_type(&self, account_type: &str) -> Vec<Account> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts
            .iter()
            .filter(|stored| stored.account.account_type == account_type)
            .map(|stored| stored.account.clone())
            .collect()
    }

    fn base_url(&self, account: &Account) -> Option<Url> {
        self.find(account, |stored| stored.base_url.clone())
    }

    fn credentials(&self, account: &Account) -> Credentials {
        self.find(account, |stored| stored.credentials.clone())
            .unwrap_or_default()
    }
}
