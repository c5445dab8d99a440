use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodLog {
    pub id: String,
    pub date: NaiveDate,
    pub mood: u8,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub med_taken: bool,
    #[serde(default)]
    pub notes: String,
}

impl MoodLog {
    pub const CSV_HEADER: &'static str = "date,mood,symptoms,medTaken,notes";

    /// One CSV row. Symptoms are `;`-joined and both text columns are quoted.
    pub fn csv_row(&self) -> String {
        [
            self.date.format("%Y-%m-%d").to_string(),
            self.mood.to_string(),
            quoted(&self.symptoms.join(";")),
            if self.med_taken { "yes" } else { "no" }.to_string(),
            quoted(&self.notes),
        ]
        .join(",")
    }
}

/// Wraps a CSV field in quotes, doubling any quotes inside it.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
