use crate::error::Result;
use crate::models::Article;
use crate::session::Namespace;
use crate::storage::{self, Storage};

fn default_articles() -> Vec<Article> {
    vec![
        Article {
            id: storage::uid("art"),
            title: "Healthy Sleep Tips".to_string(),
            summary: "Improve sleep hygiene".to_string(),
            body: "<p>Keep a regular sleep schedule, avoid screens 1 hour before bed, and maintain a cool, dark environment.</p>".to_string(),
        },
        Article {
            id: storage::uid("art2"),
            title: "Stress Breaks".to_string(),
            summary: "Short practices".to_string(),
            body: "<p>Try breathing exercises (4-4-4), short walks, and hydration breaks.</p>".to_string(),
        },
    ]
}

/// Writes the default articles when the namespace has none.
pub async fn seed_if_empty(storage: &Storage, namespace: &Namespace) -> Result<bool> {
    let articles: Vec<Article> = storage.read(namespace).await?;
    if !articles.is_empty() {
        return Ok(false);
    }
    tracing::debug!("Seeding articles for {}", namespace);
    storage.write(namespace, &default_articles()).await?;
    Ok(true)
}

pub async fn load(storage: &Storage, namespace: &Namespace) -> Result<Vec<Article>> {
    seed_if_empty(storage, namespace).await?;
    storage.read(namespace).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Repository;

    #[tokio::test]
    async fn test_seeds_each_namespace_once() {
        let storage = Storage::new(Repository::in_memory().await.unwrap());
        let ns = Namespace::guest();

        assert!(seed_if_empty(&storage, &ns).await.unwrap());
        assert!(!seed_if_empty(&storage, &ns).await.unwrap());

        let articles = load(&storage, &ns).await.unwrap();
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Healthy Sleep Tips", "Stress Breaks"]);

        let other = load(&storage, &Namespace::user("ada@example.com")).await.unwrap();
        assert_eq!(other.len(), 2);
        assert_ne!(other[0].id, articles[0].id);
    }

    #[test]
    fn test_body_renders_as_text() {
        let text = default_articles()[1].body_text(80);
        assert!(text.contains("breathing exercises"));
        assert!(!text.contains("<p>"));
    }
}
