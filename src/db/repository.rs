use rusqlite::{params, OptionalExtension};
use tokio_rusqlite::Connection;

use crate::error::Result;

use super::schema::SCHEMA;

/// String-keyed local store. Values are opaque text; callers decide the format.
pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;
        Self::init(conn).await
    }

    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        let value = self
            .conn
            .call(move |conn| {
                let value = conn
                    .query_row(
                        "SELECT value FROM kv_store WHERE key = ?1",
                        params![key],
                        |row| row.get::<_, String>(0),
                    )
                    .optional()?;
                Ok(value)
            })
            .await?;
        Ok(value)
    }

    pub async fn set(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.conn
            .call(move |conn| {
                conn.execute(
                    r#"INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                       ON CONFLICT(key) DO UPDATE SET
                           value = excluded.value,
                           updated_at = datetime('now')"#,
                    params![key, value],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    #[cfg(test)]
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.conn
            .call(move |conn| {
                conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let repo = Repository::in_memory().await.unwrap();
        assert_eq!(repo.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let repo = Repository::in_memory().await.unwrap();
        repo.set("guest_logs", "[1]".to_string()).await.unwrap();
        repo.set("guest_logs", "[2]".to_string()).await.unwrap();
        assert_eq!(repo.get("guest_logs").await.unwrap().as_deref(), Some("[2]"));

        repo.remove("guest_logs").await.unwrap();
        assert_eq!(repo.get("guest_logs").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_path = db_path.to_string_lossy().to_string();

        {
            let repo = Repository::new(&db_path).await.unwrap();
            repo.set("reva_users", "[]".to_string()).await.unwrap();
        }

        let repo = Repository::new(&db_path).await.unwrap();
        assert_eq!(repo.get("reva_users").await.unwrap().as_deref(), Some("[]"));
    }
}
