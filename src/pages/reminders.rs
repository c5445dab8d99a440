use chrono::Local;

use crate::error::Result;
use crate::models::serde_helpers::minute_datetime;
use crate::models::Reminder;
use crate::session::Namespace;
use crate::storage::{self, Storage};

use super::FormError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderForm {
    pub title: String,
    pub dt: String,
    pub note: String,
}

impl Default for ReminderForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            dt: Local::now().naive_local().format("%Y-%m-%d %H:%M").to_string(),
            note: String::new(),
        }
    }
}

impl ReminderForm {
    pub fn validate(&self) -> std::result::Result<Reminder, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::Required("Title"));
        }
        let dt = minute_datetime::parse(&self.dt)
            .ok_or_else(|| FormError::InvalidDateTime(self.dt.trim().to_string()))?;

        Ok(Reminder {
            id: storage::new_id::<Reminder>(),
            title: title.to_string(),
            dt,
            note: self.note.trim().to_string(),
        })
    }
}

/// Soonest first.
pub async fn list(storage: &Storage, namespace: &Namespace) -> Result<Vec<Reminder>> {
    let mut reminders: Vec<Reminder> = storage.read(namespace).await?;
    reminders.sort_by(|a, b| a.dt.cmp(&b.dt));
    Ok(reminders)
}

pub async fn add(storage: &Storage, namespace: &Namespace, reminder: Reminder) -> Result<()> {
    let mut reminders: Vec<Reminder> = storage.read(namespace).await?;
    reminders.push(reminder);
    storage.write(namespace, &reminders).await
}

pub async fn delete(storage: &Storage, namespace: &Namespace, id: &str) -> Result<bool> {
    let mut reminders: Vec<Reminder> = storage.read(namespace).await?;
    let removed = storage::remove_by_id(&mut reminders, id);
    if removed {
        storage.write(namespace, &reminders).await?;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Repository;

    fn form(title: &str, dt: &str) -> ReminderForm {
        ReminderForm {
            title: title.to_string(),
            dt: dt.to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn test_validation() {
        assert_eq!(form(" ", "2024-01-01 09:00").validate(), Err(FormError::Required("Title")));
        assert!(matches!(
            form("Pills", "tomorrow").validate(),
            Err(FormError::InvalidDateTime(_))
        ));
        let reminder = form("Pills", "2024-01-01T09:00").validate().unwrap();
        assert!(reminder.id.starts_with("rem_"));
    }

    #[tokio::test]
    async fn test_list_sorted_ascending_and_delete() {
        let storage = Storage::new(Repository::in_memory().await.unwrap());
        let ns = Namespace::user("ada@example.com");

        for (title, dt) in [("b", "2024-03-02 10:00"), ("a", "2024-03-01 10:00"), ("c", "2024-03-02 08:00")] {
            add(&storage, &ns, form(title, dt).validate().unwrap()).await.unwrap();
        }

        let titles: Vec<_> = list(&storage, &ns)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, ["a", "c", "b"]);

        let first = list(&storage, &ns).await.unwrap().remove(0);
        assert!(delete(&storage, &ns, &first.id).await.unwrap());
        assert_eq!(list(&storage, &ns).await.unwrap().len(), 2);
    }
}
