use crate::error::Result;
use crate::models::{Account, UserSnapshot};
use crate::session::Namespace;
use crate::storage::Storage;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminView {
    pub accounts: Vec<Account>,
    /// Account id and its pretty-printed data, once "view" is used.
    pub inspected: Option<(String, String)>,
}

pub async fn load(storage: &Storage) -> Result<AdminView> {
    Ok(AdminView {
        accounts: storage.read_users().await?,
        inspected: None,
    })
}

/// Everything stored for one account, read from its namespace directly.
pub async fn snapshot(storage: &Storage, account: &Account) -> Result<UserSnapshot> {
    storage.snapshot(&Namespace::user(&account.id)).await
}

pub async fn inspect(storage: &Storage, account: &Account) -> Result<String> {
    let json = snapshot(storage, account).await?.to_pretty_json()?;
    tracing::debug!("Inspected {}", account.id);
    Ok(json)
}
