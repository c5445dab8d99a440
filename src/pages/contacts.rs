use chrono::Utc;

use crate::error::Result;
use crate::models::{Account, ContactMessage};
use crate::session::{Namespace, Session};
use crate::storage::{self, Storage};

use super::FormError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub msg: String,
}

impl ContactForm {
    pub fn validate(&self) -> std::result::Result<ContactMessage, FormError> {
        let (name, email, msg) = (self.name.trim(), self.email.trim(), self.msg.trim());
        if name.is_empty() {
            return Err(FormError::Required("Name"));
        }
        if email.is_empty() {
            return Err(FormError::Required("Email"));
        }
        if msg.is_empty() {
            return Err(FormError::Required("Message"));
        }

        Ok(ContactMessage {
            id: storage::new_id::<ContactMessage>(),
            name: name.to_string(),
            email: email.to_string(),
            msg: msg.to_string(),
            date: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactsView {
    /// The signed-in user's own messages.
    Own(Vec<ContactMessage>),
    /// Every account that has sent at least one message.
    All(Vec<(Account, Vec<ContactMessage>)>),
}

pub async fn submit(storage: &Storage, namespace: &Namespace, message: ContactMessage) -> Result<()> {
    let mut messages: Vec<ContactMessage> = storage.read(namespace).await?;
    messages.push(message);
    storage.write(namespace, &messages).await
}

/// Reads each account's namespace directly; the session is never switched.
pub async fn all_messages(storage: &Storage) -> Result<Vec<(Account, Vec<ContactMessage>)>> {
    let mut grouped = Vec::new();
    for account in storage.read_users().await? {
        let messages: Vec<ContactMessage> = storage.read(&Namespace::user(&account.id)).await?;
        if !messages.is_empty() {
            grouped.push((account, messages));
        }
    }
    Ok(grouped)
}

pub async fn load(storage: &Storage, session: &Session) -> Result<ContactsView> {
    if session.is_admin() {
        return Ok(ContactsView::All(all_messages(storage).await?));
    }
    Ok(ContactsView::Own(storage.read(&session.namespace()).await?))
}
