use crate::domain::{Blog, DomainError};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Blog>, DomainError>;
    /// Case-insensitive substring match on title or content, in listing
    /// order. Folding happens in Rust: SQLite's LIKE only folds ASCII.
    async fn search(&self, query: &str) -> Result<Vec<Blog>, DomainError> {
        let needle = query.to_lowercase();

        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|blog| blog.matches(&needle))
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Blog, DomainError>;
    /// Returns the new id and, when the database filled it in, the timestamp.
    async fn create(
        &self,
        title: &str,
        content: &str,
        created_at: Option<&str>,
    ) -> Result<(i64, Option<String>), DomainError>;
    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<u64, DomainError>;
    async fn delete(&self, id: i64) -> Result<u64, DomainError>;
    async fn delete_all(&self) -> Result<u64, DomainError>;
}

pub struct SqliteBlogRepository {
    pool: SqlitePool,
}

impl SqliteBlogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn blog_from_row(row: &SqliteRow) -> Result<Blog, DomainError> {
    Ok(Blog {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl BlogRepository for SqliteBlogRepository {
    async fn list(&self) -> Result<Vec<Blog>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, created_at
            FROM blogs
            ORDER BY DATETIME(created_at) DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.iter().map(blog_from_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Blog, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, created_at
            FROM blogs
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => blog_from_row(&row),
            None => Err(DomainError::BlogNotFound),
        }
    }

    async fn create(
        &self,
        title: &str,
        content: &str,
        created_at: Option<&str>,
    ) -> Result<(i64, Option<String>), DomainError> {
        let row = match created_at {
            Some(date) => sqlx::query(
                r#"
                INSERT INTO blogs (title, content, created_at)
                VALUES (?, ?, ?)
                RETURNING id, created_at
                "#,
            )
            .bind(title)
            .bind(content)
            .bind(date),
            None => sqlx::query(
                r#"
                INSERT INTO blogs (title, content)
                VALUES (?, ?)
                RETURNING id, created_at
                "#,
            )
            .bind(title)
            .bind(content),
        }
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create blog: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let id: i64 = row.try_get("id")?;
        let generated = match created_at {
            Some(_) => None,
            None => Some(row.try_get("created_at")?),
        };

        Ok((id, generated))
    }

    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET
                title = COALESCE(?, title),
                content = COALESCE(?, content)
            WHERE id = ?
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM blogs")
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?
            .rows_affected();

        // sqlite_sequence has no row for `blogs` until the first insert.
        sqlx::query("UPDATE sqlite_sequence SET seq = 0 WHERE name = 'blogs'")
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        tx.commit().await?;

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_pool;

    async fn repo() -> SqliteBlogRepository {
        SqliteBlogRepository::new(test_pool().await)
    }

    #[tokio::test]
    async fn create_without_date_returns_generated_timestamp() {
        let repo = repo().await;

        let (id, created_at) = repo.create("Hello", "World", None).await.unwrap();

        assert_eq!(id, 1);
        let created_at = created_at.expect("server timestamp");
        // CURRENT_TIMESTAMP format: YYYY-MM-DD HH:MM:SS
        assert_eq!(created_at.len(), 19);
        assert_eq!(&created_at[4..5], "-");
        assert_eq!(&created_at[10..11], " ");
    }

    #[tokio::test]
    async fn create_with_date_keeps_client_value() {
        let repo = repo().await;

        let (id, generated) = repo
            .create("Dated", "Body", Some("2022-12-18 10:00:00"))
            .await
            .unwrap();

        assert!(generated.is_none());
        assert_eq!(
            repo.find_by_id(id).await.unwrap().created_at,
            "2022-12-18 10:00:00"
        );
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = repo().await;
        repo.create("old", "a", Some("2021-01-01 00:00:00"))
            .await
            .unwrap();
        repo.create("new", "b", Some("2023-01-01 00:00:00"))
            .await
            .unwrap();
        repo.create("mid", "c", Some("2022-01-01 00:00:00"))
            .await
            .unwrap();

        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();

        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn search_matches_title_or_content_once() {
        let repo = repo().await;
        repo.create("Rust notes", "ownership", None).await.unwrap();
        repo.create("Groceries", "buy RUST remover", None)
            .await
            .unwrap();
        repo.create("rusty rust", "rust everywhere", None)
            .await
            .unwrap();
        repo.create("Unrelated", "nothing here", None).await.unwrap();

        let mut ids: Vec<_> = repo
            .search("rust")
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        ids.sort();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let repo = repo().await;
        repo.create("100% done", "x", None).await.unwrap();
        repo.create("1000 done", "x", None).await.unwrap();

        let found = repo.search("0%").await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "100% done");
        assert!(repo.search("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let repo = repo().await;
        repo.create("Éclair", "ÜBER gut", None).await.unwrap();
        repo.create("Eclair", "uber", None).await.unwrap();

        let by_title = repo.search("éclair").await.unwrap();
        let by_content = repo.search("über").await.unwrap();

        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Éclair");
        assert_eq!(by_content.len(), 1);
        assert_eq!(by_content[0].id, by_title[0].id);
    }

    #[tokio::test]
    async fn update_leaves_missing_fields_alone() {
        let repo = repo().await;
        let (id, _) = repo.create("Title", "Old content", None).await.unwrap();

        let affected = repo.update(id, None, Some("New content")).await.unwrap();
        let blog = repo.find_by_id(id).await.unwrap();

        assert_eq!(affected, 1);
        assert_eq!(blog.title, "Title");
        assert_eq!(blog.content, "New content");
    }

    #[tokio::test]
    async fn find_missing_blog_is_not_found() {
        let repo = repo().await;

        let err = repo.find_by_id(42).await.unwrap_err();

        assert!(matches!(err, DomainError::BlogNotFound));
    }

    #[tokio::test]
    async fn delete_all_resets_the_sequence() {
        let repo = repo().await;
        repo.create("a", "a", None).await.unwrap();
        repo.create("b", "b", None).await.unwrap();
        repo.delete(2).await.unwrap();

        let removed = repo.delete_all().await.unwrap();
        let (id, _) = repo.create("fresh", "start", None).await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn delete_all_on_empty_table_succeeds() {
        let repo = repo().await;

        assert_eq!(repo.delete_all().await.unwrap(), 0);
    }
}
