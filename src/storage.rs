//! Per-user persistence on top of the key/value [`Repository`].
//!
//! Every collection lives under `<namespace>_<collection>` as a JSON array.
//! The account directory is shared and lives under [`USERS_KEY`].

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::db::Repository;
use crate::error::Result;
use crate::models::{Account, Appointment, Article, ContactMessage, MoodLog, Reminder, UserSnapshot};
use crate::session::Namespace;

pub const USERS_KEY: &str = "reva_users";

const UID_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Logs,
    Reminders,
    Appointments,
    Articles,
    Contacts,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Logs,
        Collection::Reminders,
        Collection::Appointments,
        Collection::Articles,
        Collection::Contacts,
    ];

    pub fn base(&self) -> &'static str {
        match self {
            Collection::Logs => "logs",
            Collection::Reminders => "reminders",
            Collection::Appointments => "appointments",
            Collection::Articles => "articles",
            Collection::Contacts => "contacts",
        }
    }

    pub fn key(&self, namespace: &Namespace) -> String {
        format!("{}_{}", namespace, self.base())
    }
}

/// A record type stored as one per-user collection.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;
}

impl Record for MoodLog {
    const COLLECTION: Collection = Collection::Logs;
    const ID_PREFIX: &'static str = "log";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Reminder {
    const COLLECTION: Collection = Collection::Reminders;
    const ID_PREFIX: &'static str = "rem";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Appointment {
    const COLLECTION: Collection = Collection::Appointments;
    const ID_PREFIX: &'static str = "a";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Article {
    const COLLECTION: Collection = Collection::Articles;
    const ID_PREFIX: &'static str = "art";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for ContactMessage {
    const COLLECTION: Collection = Collection::Contacts;
    const ID_PREFIX: &'static str = "c";

    fn id(&self) -> &str {
        &self.id
    }
}

pub struct Storage {
    repository: Repository,
}

impl Storage {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Reads a whole collection. Unparseable content reads as empty.
    pub async fn read<T: Record>(&self, namespace: &Namespace) -> Result<Vec<T>> {
        let key = T::COLLECTION.key(namespace);
        self.read_key(&key).await
    }

    /// Replaces a whole collection.
    pub async fn write<T: Record>(&self, namespace: &Namespace, records: &[T]) -> Result<()> {
        let key = T::COLLECTION.key(namespace);
        self.write_key(&key, records).await
    }

    pub async fn clear(&self, namespace: &Namespace, collection: Collection) -> Result<()> {
        let key = collection.key(namespace);
        tracing::debug!("Clearing {}", key);
        self.repository.set(&key, "[]".to_string()).await
    }

    pub async fn read_users(&self) -> Result<Vec<Account>> {
        self.read_key(USERS_KEY).await
    }

    pub async fn write_users(&self, users: &[Account]) -> Result<()> {
        self.write_key(USERS_KEY, users).await
    }

    pub async fn snapshot(&self, namespace: &Namespace) -> Result<UserSnapshot> {
        Ok(UserSnapshot {
            logs: self.read(namespace).await?,
            reminders: self.read(namespace).await?,
            appointments: self.read(namespace).await?,
            articles: self.read(namespace).await?,
            contacts: self.read(namespace).await?,
        })
    }

    async fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(raw) = self.repository.get(key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!("Discarding unreadable collection {}: {}", key, e);
                Ok(Vec::new())
            }
        }
    }

    async fn write_key<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        tracing::debug!("Writing {} records to {}", records.len(), key);
        self.repository.set(key, raw).await
    }

    #[cfg(test)]
    pub(crate) fn repository(&self) -> &Repository {
        &self.repository
    }
}

/// `<prefix>_<7 base36 chars>`. Not cryptographic; collisions are ignored.
pub fn uid(prefix: &str) -> String {
    const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut n = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(UID_LEN);
    for _ in 0..UID_LEN {
        suffix.push(ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    format!("{prefix}_{suffix}")
}

pub fn new_id<T: Record>() -> String {
    uid(T::ID_PREFIX)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Removes the record with `id`, keeping the others in their original order.
pub fn remove_by_id<T: Record>(records: &mut Vec<T>, id: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn log(id: &str, date: &str, mood: u8) -> MoodLog {
        MoodLog {
            id: id.to_string(),
            date: date.parse().unwrap(),
            mood,
            symptoms: vec!["fatigue".to_string()],
            med_taken: false,
            notes: String::new(),
        }
    }

    async fn storage() -> Storage {
        Storage::new(Repository::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_write_then_read_round_trips() {
        let storage = storage().await;
        let ns = Namespace::user("ada@example.com");
        let logs = vec![log("log_1", "2024-01-02", 6), log("log_2", "2024-01-01", 8)];
        storage.write(&ns, &logs).await.unwrap();
        assert_eq!(storage.read::<MoodLog>(&ns).await.unwrap(), logs);

        let appts = vec![Appointment {
            id: "a_1".to_string(),
            title: "GP".to_string(),
            date: "2024-02-01".parse().unwrap(),
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            duration: 30,
        }];
        storage.write(&ns, &appts).await.unwrap();
        assert_eq!(storage.read::<Appointment>(&ns).await.unwrap(), appts);
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let storage = storage().await;
        let a = Namespace::user("a@example.com");
        let b = Namespace::user("b@example.com");
        storage.write(&a, &[log("log_1", "2024-01-01", 5)]).await.unwrap();

        assert!(storage.read::<MoodLog>(&b).await.unwrap().is_empty());
        assert!(storage.read::<MoodLog>(&Namespace::guest()).await.unwrap().is_empty());
        assert_eq!(storage.read::<MoodLog>(&a).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_collection_reads_empty() {
        let storage = storage().await;
        let ns = Namespace::guest();
        storage
            .repository()
            .set(&Collection::Logs.key(&ns), "{not json".to_string())
            .await
            .unwrap();
        assert!(storage.read::<MoodLog>(&ns).await.unwrap().is_empty());

        storage.repository().set(USERS_KEY, "42".to_string()).await.unwrap();
        assert!(storage.read_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_empties_collection() {
        let storage = storage().await;
        let ns = Namespace::user("a@example.com");
        storage.write(&ns, &[log("log_1", "2024-01-01", 5)]).await.unwrap();
        storage.clear(&ns, Collection::Logs).await.unwrap();
        assert!(storage.read::<MoodLog>(&ns).await.unwrap().is_empty());
    }

    #[test]
    fn test_keys_combine_namespace_and_collection() {
        assert_eq!(Collection::Reminders.key(&Namespace::guest()), "guest_reminders");
        assert_eq!(
            Collection::Contacts.key(&Namespace::user("a@b.c")),
            "a@b.c_contacts"
        );
    }

    #[test]
    fn test_uid_shape() {
        let id = uid("log");
        let (prefix, suffix) = id.split_once('_').unwrap();
        assert_eq!(prefix, "log");
        assert_eq!(suffix.len(), UID_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(uid("log"), uid("log"));
    }

    #[test]
    fn test_remove_by_id_keeps_order() {
        let mut logs = vec![
            log("log_1", "2024-01-01", 1),
            log("log_2", "2024-01-02", 2),
            log("log_3", "2024-01-03", 3),
            log("log_4", "2024-01-04", 4),
        ];
        assert!(remove_by_id(&mut logs, "log_2"));
        let ids: Vec<_> = logs.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["log_1", "log_3", "log_4"]);

        assert!(!remove_by_id(&mut logs, "missing"));
        assert_eq!(logs.len(), 3);
    }
}
