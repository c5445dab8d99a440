use crate::error::Result;
use crate::models::MoodLog;
use crate::session::Namespace;
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Mean mood across every stored log.
    pub average: Option<f64>,
    pub log_count: usize,
    /// Dates of the plotted logs, oldest first.
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl DashboardView {
    pub fn average_label(&self) -> String {
        self.average
            .map(|avg| format!("{avg:.2}"))
            .unwrap_or_else(|| "—".to_string())
    }
}

pub fn summarize(mut logs: Vec<MoodLog>, trend_points: usize) -> DashboardView {
    logs.sort_by(|a, b| a.date.cmp(&b.date));

    let average = if logs.is_empty() {
        None
    } else {
        let total: u64 = logs.iter().map(|l| u64::from(l.mood)).sum();
        Some(total as f64 / logs.len() as f64)
    };

    let recent = &logs[logs.len().saturating_sub(trend_points)..];

    DashboardView {
        average,
        log_count: logs.len(),
        labels: recent.iter().map(|l| l.date.format("%Y-%m-%d").to_string()).collect(),
        values: recent.iter().map(|l| u64::from(l.mood)).collect(),
    }
}

pub async fn load(storage: &Storage, namespace: &Namespace, trend_points: usize) -> Result<DashboardView> {
    let logs: Vec<MoodLog> = storage.read(namespace).await?;
    Ok(summarize(logs, trend_points))
}
