use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// HTML fragment.
    #[serde(default)]
    pub body: String,
}

impl Article {
    pub fn body_text(&self, width: usize) -> String {
        html2text::from_read(self.body.as_bytes(), width.max(10))
            .unwrap_or_else(|_| self.body.clone())
    }
}
