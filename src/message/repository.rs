//! Contact message repository for folio.
//!
//! This module provides CRUD operations for contact messages, including
//! the bulk variants used by the dashboard inbox.

use sqlx::QueryBuilder;

use super::types::{ContactMessage, NewContactMessage};
use crate::db::DbPool;
use crate::{FolioError, Result};

/// Repository for contact message operations.
pub struct ContactMessageRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ContactMessageRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new message.
    ///
    /// The id, unread state and creation timestamp are assigned by the
    /// database.
    pub async fn create(&self, new_message: &NewContactMessage) -> Result<ContactMessage> {
        let message = sqlx::query_as::<_, ContactMessage>(
            "INSERT INTO contact_messages (name, email, subject, message)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, subject, message, is_read, created_at",
        )
        .bind(&new_message.name)
        .bind(&new_message.email)
        .bind(&new_message.subject)
        .bind(&new_message.message)
        .fetch_one(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(message)
    }

    /// Get a message by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<ContactMessage>> {
        let result = sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, email, subject, message, is_read, created_at
             FROM contact_messages WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List one page of messages, newest first.
    ///
    /// Ordering ties on created_at are broken by id so the order is a total
    /// order and pages never shuffle as new messages arrive.
    pub async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<ContactMessage>> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, email, subject, message, is_read, created_at
             FROM contact_messages
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(messages)
    }

    /// Count all messages.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;
        Ok(count)
    }

    /// Count unread messages.
    pub async fn count_unread(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE is_read = 0")
                .fetch_one(self.pool)
                .await
                .map_err(|e| FolioError::Database(e.to_string()))?;
        Ok(count)
    }

    /// Set the read state of a message.
    ///
    /// Returns true if the message exists. Setting the same state again
    /// still counts as an update, so re-marking is a harmless no-op.
    pub async fn set_read(&self, id: i64, read: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE contact_messages SET is_read = $1 WHERE id = $2")
            .bind(read)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a message.
    ///
    /// Returns true if a message was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Set the read state for every listed message that exists.
    ///
    /// Ids with no matching row are skipped. Returns the number of rows
    /// actually updated.
    pub async fn set_read_many(&self, ids: &[i64], read: bool) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("UPDATE contact_messages SET is_read = ");
        query.push_bind(read);
        query.push(" WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        query.push(")");

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Delete every listed message that exists.
    ///
    /// Ids with no matching row are skipped. Returns the number of rows
    /// actually deleted.
    pub async fn delete_many(&self, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("DELETE FROM contact_messages WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        query.push(")");

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn sample(n: u32) -> NewContactMessage {
        NewContactMessage::new(
            format!("Visitor {n}"),
            format!("visitor{n}@example.com"),
            format!("Subject {n}"),
            format!("Message body {n}"),
        )
    }

    #[tokio::test]
    async fn test_create_message() {
        let db = setup_db().await;
        let repo = ContactMessageRepository::new(db.pool());

        let message = repo.create(&sample(1)).await.unwrap();

        assert_eq!(message.id, 1);
        assert_eq!(message.name, "Visitor 1");
        assert_eq!(message.email, "visitor1@example.com");
        assert!(!message.is_read);
        assert!(!message.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = setup_db().await;
        let repo = ContactMessageRepository::new(db.pool());

        let created = repo.create(&sample(1)).await.unwrap();

        let found = repo.get_by_id(created.id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().subject, "Subject 1");

        let not_found = repo.get_by_id(999).await.unwrap();
        assert!(not_found.is_none());
    }

    #[tokio::test]
    async fn test_list_page_newest_first() {
        let db = setup_db().await;
        let repo = ContactMessageRepository::new(db.pool());

        for n in 1..=3 {
            repo.create(&sample(n)).await.unwrap();
        }

        let page = repo.list_page(0, 10).await.unwrap();
        assert_eq!(page.len(), 3);
        // Same-second inserts fall back to id ordering
        assert_eq!(page[0].id, 3);
        assert_eq!(page[1].id, 2);
        assert_eq!(page[2].id, 1);
    }

    #[tokio::test]
    async fn test_list_page_offset_and_limit() {
        let db = setup_db().await;
        let repo = ContactMessageRepository::new(db.pool());

        for n in 1..=5 {
            repo.create(&sample(n)).await.unwrap();
        }

        let page = repo.list_page(2, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, 3);
        assert_eq!(page[1].id, 2);

        let beyond = repo.list_page(10, 2).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_counts() {
        let db = setup_db().await;
        let repo = ContactMessageRepository::new(db.pool());

        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(repo.count_unread().await.unwrap(), 0);

        let first = repo.create(&sample(1)).await.unwrap();
        repo.create(&sample(2)).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.count_unread().await.unwrap(), 2);

        repo.set_read(first.id, true).await.unwrap();
        assert_eq!(repo.count_unread().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_set_read_idempotent() {
        let db = setup_db().await;
        let repo = ContactMessageRepository::new(db.pool());

        let message = repo.create(&sample(1)).await.unwrap();

        assert!(repo.set_read(message.id, true).await.unwrap());
        assert!(repo.set_read(message.id, true).await.unwrap());

        let reloaded = repo.get_by_id(message.id).await.unwrap().unwrap();
        assert!(reloaded.is_read);

        // Unknown id reports no update
        assert!(!repo.set_read(999, true).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup_db().await;
        let repo = ContactMessageRepository::new(db.pool());

        let message = repo.create(&sample(1)).await.unwrap();

        assert!(repo.delete(message.id).await.unwrap());
        assert!(repo.get_by_id(message.id).await.unwrap().is_none());
        assert!(!repo.delete(message.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_read_many_skips_missing() {
        let db = setup_db().await;
        let repo = ContactMessageRepository::new(db.pool());

        let a = repo.create(&sample(1)).await.unwrap();
        let b = repo.create(&sample(2)).await.unwrap();

        let updated = repo.set_read_many(&[a.id, 999, b.id], true).await.unwrap();
        assert_eq!(updated, 2);

        assert!(repo.get_by_id(a.id).await.unwrap().unwrap().is_read);
        assert!(repo.get_by_id(b.id).await.unwrap().unwrap().is_read);
    }

    #[tokio::test]
    async fn test_set_read_many_empty() {
        let db = setup_db().await;
        let repo = ContactMessageRepository::new(db.pool());

        let updated = repo.set_read_many(&[], true).await.unwrap();
        assert_eq!(updated, 0);
    }

    #[tokio::test]
    async fn test_delete_many_skips_missing() {
        let db = setup_db().await;
        let repo = ContactMessageRepository::new(db.pool());

        let a = repo.create(&sample(1)).await.unwrap();
        let b = repo.create(&sample(2)).await.unwrap();
        let c = repo.create(&sample(3)).await.unwrap();

        let deleted = repo.delete_many(&[a.id, 999, c.id]).await.unwrap();
        assert_eq!(deleted, 2);

        assert!(repo.get_by_id(a.id).await.unwrap().is_none());
        assert!(repo.get_by_id(b.id).await.unwrap().is_some());
        assert!(repo.get_by_id(c.id).await.unwrap().is_none());
    }
}
