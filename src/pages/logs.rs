use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::MoodLog;
use crate::session::Namespace;
use crate::storage::{self, Storage};

use super::FormError;

const DEFAULT_MOOD: &str = "7";

/// Raw daily-log form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogForm {
    pub date: String,
    pub mood: String,
    /// Comma separated.
    pub symptoms: String,
    pub med_taken: bool,
    pub notes: String,
}

impl Default for LogForm {
    fn default() -> Self {
        Self {
            date: storage::today().format("%Y-%m-%d").to_string(),
            mood: DEFAULT_MOOD.to_string(),
            symptoms: String::new(),
            med_taken: false,
            notes: String::new(),
        }
    }
}

impl LogForm {
    pub fn from_log(log: &MoodLog) -> Self {
        Self {
            date: log.date.format("%Y-%m-%d").to_string(),
            mood: log.mood.to_string(),
            symptoms: log.symptoms.join(", "),
            med_taken: log.med_taken,
            notes: log.notes.clone(),
        }
    }

    pub fn validate(&self) -> std::result::Result<LogEntry, FormError> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(FormError::Required("Date"));
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(date.to_string()))?;

        let mood = self.mood.trim();
        let mood = mood
            .parse::<u8>()
            .ok()
            .filter(|m| (1..=10).contains(m))
            .ok_or_else(|| FormError::InvalidMood(mood.to_string()))?;

        let symptoms = self
            .symptoms
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(LogEntry {
            date,
            mood,
            symptoms,
            med_taken: self.med_taken,
            notes: self.notes.clone(),
        })
    }
}

/// A validated log, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub mood: u8,
    pub symptoms: Vec<String>,
    pub med_taken: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

/// Newest first.
pub async fn list(storage: &Storage, namespace: &Namespace) -> Result<Vec<MoodLog>> {
    let mut logs: Vec<MoodLog> = storage.read(namespace).await?;
    logs.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(logs)
}

/// Overwrites the log sharing the entry's date, or appends a new one.
/// An overwritten log keeps its identifier.
pub fn upsert(logs: &mut Vec<MoodLog>, entry: LogEntry) -> SaveOutcome {
    if let Some(existing) = logs.iter_mut().find(|l| l.date == entry.date) {
        existing.mood = entry.mood;
        existing.symptoms = entry.symptoms;
        existing.med_taken = entry.med_taken;
        existing.notes = entry.notes;
        return SaveOutcome::Updated;
    }

    logs.push(MoodLog {
        id: storage::new_id::<MoodLog>(),
        date: entry.date,
        mood: entry.mood,
        symptoms: entry.symptoms,
        med_taken: entry.med_taken,
        notes: entry.notes,
    });
    SaveOutcome::Inserted
}

pub async fn save(storage: &Storage, namespace: &Namespace, entry: LogEntry) -> Result<SaveOutcome> {
    let mut logs: Vec<MoodLog> = storage.read(namespace).await?;
    let outcome = upsert(&mut logs, entry);
    storage.write(namespace, &logs).await?;
    Ok(outcome)
}

pub async fn find(storage: &Storage, namespace: &Namespace, id: &str) -> Result<Option<MoodLog>> {
    let logs: Vec<MoodLog> = storage.read(namespace).await?;
    Ok(logs.into_iter().find(|l| l.id == id))
}

pub async fn delete(storage: &Storage, namespace: &Namespace, id: &str) -> Result<bool> {
    let mut logs: Vec<MoodLog> = storage.read(namespace).await?;
    let removed = storage::remove_by_id(&mut logs, id);
    if removed {
        storage.write(namespace, &logs).await?;
    }
    Ok(removed)
}

pub async fn clear(storage: &Storage, namespace: &Namespace) -> Result<()> {
    storage.write::<MoodLog>(namespace, &[]).await
}

pub fn to_csv(logs: &[MoodLog]) -> String {
    std::iter::once(MoodLog::CSV_HEADER.to_string())
        .chain(logs.iter().map(MoodLog::csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the namespace's logs, in stored order, as CSV. Returns the row count.
pub async fn export_csv(storage: &Storage, namespace: &Namespace, path: &Path) -> Result<usize> {
    let logs: Vec<MoodLog> = storage.read(namespace).await?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_csv(&logs))?;
    tracing::info!("Exported {} logs to {:?}", logs.len(), path);
    Ok(logs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Repository;
    use tempfile::TempDir;

    fn entry(date: &str, mood: u8) -> LogEntry {
        LogEntry {
            date: date.parse().unwrap(),
            mood,
            symptoms: Vec::new(),
            med_taken: false,
            notes: String::new(),
        }
    }

    fn form(date: &str, mood: &str, symptoms: &str) -> LogForm {
        LogForm {
            date: date.to_string(),
            mood: mood.to_string(),
            symptoms: symptoms.to_string(),
            med_taken: true,
            notes: "ok".to_string(),
        }
    }

    #[test]
    fn test_csv_row_format() {
        let log = MoodLog {
            id: "log_1".to_string(),
            date: "2024-01-01".parse().unwrap(),
            mood: 7,
            symptoms: vec!["fatigue".to_string(), "headache".to_string()],
            med_taken: true,
            notes: "ok".to_string(),
        };
        assert_eq!(log.csv_row(), r#"2024-01-01,7,"fatigue;headache",yes,"ok""#);
        assert_eq!(
            to_csv(&[log]),
            "date,mood,symptoms,medTaken,notes\n2024-01-01,7,\"fatigue;headache\",yes,\"ok\""
        );
    }

    #[test]
    fn test_csv_of_no_logs_is_header_only() {
        assert_eq!(to_csv(&[]), "date,mood,symptoms,medTaken,notes");
    }

    #[test]
    fn test_upsert_overwrites_same_date() {
        let mut logs = Vec::new();
        assert_eq!(upsert(&mut logs, entry("2024-01-01", 3)), SaveOutcome::Inserted);
        let id = logs[0].id.clone();

        assert_eq!(upsert(&mut logs, entry("2024-01-01", 9)), SaveOutcome::Updated);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].mood, 9);
        assert_eq!(logs[0].id, id);

        assert_eq!(upsert(&mut logs, entry("2024-01-02", 5)), SaveOutcome::Inserted);
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn test_form_validation() {
        let parsed = form("2024-01-01", " 7 ", "fatigue, , headache ,").validate().unwrap();
        assert_eq!(parsed.mood, 7);
        assert_eq!(parsed.symptoms, ["fatigue", "headache"]);
        assert!(parsed.med_taken);

        assert_eq!(
            form("", "7", "").validate(),
            Err(FormError::Required("Date"))
        );
        assert_eq!(
            form("01/02/2024", "7", "").validate(),
            Err(FormError::InvalidDate("01/02/2024".to_string()))
        );
        assert_eq!(
            form("2024-01-01", "11", "").validate(),
            Err(FormError::InvalidMood("11".to_string()))
        );
        assert!(form("2024-01-01", "0", "").validate().is_err());
    }

    #[test]
    fn test_form_prefill_round_trips_through_validation() {
        let log = MoodLog {
            id: "log_1".to_string(),
            date: "2024-05-05".parse().unwrap(),
            mood: 4,
            symptoms: vec!["nausea".to_string(), "dizzy".to_string()],
            med_taken: false,
            notes: "rough day".to_string(),
        };
        let parsed = LogForm::from_log(&log).validate().unwrap();
        assert_eq!(parsed.symptoms, log.symptoms);
        assert_eq!(parsed.notes, log.notes);
    }

    #[tokio::test]
    async fn test_save_list_delete() {
        let storage = Storage::new(Repository::in_memory().await.unwrap());
        let ns = Namespace::user("ada@example.com");

        save(&storage, &ns, entry("2024-01-01", 5)).await.unwrap();
        save(&storage, &ns, entry("2024-01-03", 6)).await.unwrap();
        save(&storage, &ns, entry("2024-01-02", 7)).await.unwrap();
        assert_eq!(
            save(&storage, &ns, entry("2024-01-03", 8)).await.unwrap(),
            SaveOutcome::Updated
        );

        let listed = list(&storage, &ns).await.unwrap();
        let dates: Vec<_> = listed.iter().map(|l| l.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-02", "2024-01-01"]);
        assert_eq!(listed[0].mood, 8);

        let target = listed[1].id.clone();
        assert!(delete(&storage, &ns, &target).await.unwrap());
        assert!(find(&storage, &ns, &target).await.unwrap().is_none());

        let stored: Vec<MoodLog> = storage.read(&ns).await.unwrap();
        let dates: Vec<_> = stored.iter().map(|l| l.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-03"]);

        clear(&storage, &ns).await.unwrap();
        assert!(list(&storage, &ns).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let storage = Storage::new(Repository::in_memory().await.unwrap());
        let ns = Namespace::user("ada@example.com");
        save(&storage, &ns, entry("2024-01-01", 5)).await.unwrap();

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("reva_logs.csv");
        assert_eq!(export_csv(&storage, &ns, &path).await.unwrap(), 1);

        let csv = std::fs::read_to_string(&path).unwrap();
        assert_eq!(csv, "date,mood,symptoms,medTaken,notes\n2024-01-01,5,\"\",no,\"\"");
    }
}
