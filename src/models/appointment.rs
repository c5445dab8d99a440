use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::serde_helpers::hm_time;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hm_time")]
    pub time: NaiveTime,
    /// Minutes.
    pub duration: u32,
}

impl Appointment {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}
