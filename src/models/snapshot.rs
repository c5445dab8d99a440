use serde::Serialize;

use super::{Appointment, Article, ContactMessage, MoodLog, Reminder};

/// Everything stored under one user's namespace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserSnapshot {
    pub logs: Vec<MoodLog>,
    pub reminders: Vec<Reminder>,
    pub appointments: Vec<Appointment>,
    pub articles: Vec<Article>,
    pub contacts: Vec<ContactMessage>,
}

impl UserSnapshot {
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
