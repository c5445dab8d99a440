use chrono::NaiveDate;

use crate::error::Result;
use crate::models::serde_helpers::hm_time;
use crate::models::Appointment;
use crate::session::Namespace;
use crate::storage::{self, Storage};

use super::FormError;

const DEFAULT_TIME: &str = "09:00";
const DEFAULT_DURATION: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentForm {
    pub title: String,
    pub date: String,
    pub time: String,
    /// Minutes; empty means the default.
    pub duration: String,
}

impl Default for AppointmentForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: storage::today().format("%Y-%m-%d").to_string(),
            time: DEFAULT_TIME.to_string(),
            duration: DEFAULT_DURATION.to_string(),
        }
    }
}

impl AppointmentForm {
    pub fn validate(&self) -> std::result::Result<Appointment, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::Required("Title"));
        }

        let date = self.date.trim();
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(date.to_string()))?;

        let time = self.time.trim();
        let time = hm_time::parse(time).ok_or_else(|| FormError::InvalidTime(time.to_string()))?;

        let duration = match self.duration.trim() {
            "" => DEFAULT_DURATION,
            raw => raw
                .parse()
                .map_err(|_| FormError::InvalidDuration(raw.to_string()))?,
        };

        Ok(Appointment {
            id: storage::new_id::<Appointment>(),
            title: title.to_string(),
            date,
            time,
            duration,
        })
    }
}

/// Soonest first, by date then time.
pub async fn list(storage: &Storage, namespace: &Namespace) -> Result<Vec<Appointment>> {
    let mut appointments: Vec<Appointment> = storage.read(namespace).await?;
    appointments.sort_by_key(Appointment::starts_at);
    Ok(appointments)
}

pub async fn add(storage: &Storage, namespace: &Namespace, appointment: Appointment) -> Result<()> {
    let mut appointments: Vec<Appointment> = storage.read(namespace).await?;
    appointments.push(appointment);
    storage.write(namespace, &appointments).await
}

pub async fn delete(storage: &Storage, namespace: &Namespace, id: &str) -> Result<bool> {
    let mut appointments: Vec<Appointment> = storage.read(namespace).await?;
    let removed = storage::remove_by_id(&mut appointments, id);
    if removed {
        storage.write(namespace, &appointments).await?;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Repository;

    fn form(title: &str, date: &str, time: &str, duration: &str) -> AppointmentForm {
        AppointmentForm {
            title: title.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            duration: duration.to_string(),
        }
    }

    #[test]
    fn test_empty_duration_defaults_to_thirty() {
        let appt = form("GP", "2024-01-01", "09:00", "").validate().unwrap();
        assert_eq!(appt.duration, 30);
        assert!(appt.id.starts_with("a_"));
    }

    #[test]
    fn test_invalid_fields() {
        assert_eq!(
            form("", "2024-01-01", "09:00", "30").validate(),
            Err(FormError::Required("Title"))
        );
        assert!(matches!(
            form("GP", "2024-01-01", "25:00", "30").validate(),
            Err(FormError::InvalidTime(_))
        ));
        assert!(matches!(
            form("GP", "2024-01-01", "09:00", "half an hour").validate(),
            Err(FormError::InvalidDuration(_))
        ));
    }

    #[tokio::test]
    async fn test_sorted_by_date_and_time() {
        let storage = Storage::new(Repository::in_memory().await.unwrap());
        let ns = Namespace::user("ada@example.com");

        for (title, date, time) in [
            ("late", "2024-02-01", "15:00"),
            ("next-day", "2024-02-02", "08:00"),
            ("early", "2024-02-01", "09:30"),
        ] {
            let appt = form(title, date, time, "45").validate().unwrap();
            add(&storage, &ns, appt).await.unwrap();
        }

        let titles: Vec<_> = list(&storage, &ns)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, ["early", "late", "next-day"]);
    }
}
