use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::serde_helpers::minute_datetime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    #[serde(with = "minute_datetime")]
    pub dt: NaiveDateTime,
    #[serde(default)]
    pub note: String,
}
