//! Book catalog operations.
//!
//! Each operation is a single SQL statement against the shared connection, so
//! it is atomic on its own. Concurrent writers to the same id resolve as last
//! commit wins.

use anyhow::Result;
use libsql::Connection;
use uuid::Uuid;

use crate::model::{Book, BookInput};

const BOOK_COLUMNS: &str = "title, author, genre, year, description, id";

pub struct Catalog<'a> {
    conn: &'a Connection,
}

impl<'a> Catalog<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn create_book(&self, input: BookInput) -> Result<Book> {
        let id = Uuid::new_v4();
        let query = format!(
            r#"
            INSERT INTO books (id, title, author, genre, year, description)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {BOOK_COLUMNS}
        "#
        );

        let mut rows = self
            .conn
            .query(
                &query,
                libsql::params![
                    id.to_string(),
                    input.title,
                    input.author,
                    input.genre,
                    input.year,
                    input.description
                ],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Self::row_to_book(&row)?)
        } else {
            anyhow::bail!("Failed to create book")
        }
    }

    /// Every stored book, in storage order.
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM books");
        let mut rows = self.conn.query(&query, ()).await?;
        let mut books = Vec::new();

        while let Some(row) = rows.next().await? {
            books.push(Self::row_to_book(&row)?);
        }

        Ok(books)
    }

    pub async fn get_book(&self, id: Uuid) -> Result<Option<Book>> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?");
        let mut rows = self.conn.query(&query, libsql::params![id.to_string()]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_book(&row)?))
        } else {
            Ok(None)
        }
    }

    /// Replaces every field except the id. `None` when no book has `id`.
    pub async fn update_book(&self, id: Uuid, input: BookInput) -> Result<Option<Book>> {
        let query = format!(
            r#"
            UPDATE books
            SET title = ?, author = ?, genre = ?, year = ?, description = ?
            WHERE id = ?
            RETURNING {BOOK_COLUMNS}
        "#
        );

        let mut rows = self
            .conn
            .query(
                &query,
                libsql::params![
                    input.title,
                    input.author,
                    input.genre,
                    input.year,
                    input.description,
                    id.to_string()
                ],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_book(&row)?))
        } else {
            Ok(None)
        }
    }

    /// Returns false when there was nothing to delete.
    pub async fn delete_book(&self, id: Uuid) -> Result<bool> {
        let result = self
            .conn
            .execute("DELETE FROM books WHERE id = ?", libsql::params![id.to_string()])
            .await?;
        Ok(result > 0)
    }

    fn row_to_book(row: &libsql::Row) -> Result<Book> {
        let id: String = row.get(5)?;
        let id = Uuid::parse_str(&id).map_err(|e| anyhow::anyhow!("Invalid book id {}: {}", id, e))?;

        Ok(Book {
            title: row.get(0)?,
            author: row.get(1)?,
            genre: row.get(2)?,
            year: row.get(3)?,
            description: row.get(4)?,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{App, Config};
    use crate::db::Database;
    use tempfile::TempDir;

    async fn open() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config {
            app: App::new("library.db", "127.0.0.1", 0),
        };
        let db = Database::new(&cfg, dir.path()).await.unwrap();
        (dir, db)
    }

    fn dune() -> BookInput {
        BookInput {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            genre: "SciFi".to_string(),
            year: 1965,
            description: "desert planet".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_dir, db) = open().await;
        let catalog = Catalog::new(db.connection());

        let created = catalog.create_book(dune()).await.unwrap();
        assert_eq!(created, dune().into_book(created.id));

        let fetched = catalog.get_book(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let (_dir, db) = open().await;
        let catalog = Catalog::new(db.connection());

        let a = catalog.create_book(dune()).await.unwrap();
        let b = catalog.create_book(dune()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_list_empty_and_populated() {
        let (_dir, db) = open().await;
        let catalog = Catalog::new(db.connection());
        assert!(catalog.list_books().await.unwrap().is_empty());

        let mut created = Vec::new();
        for _ in 0..3 {
            created.push(catalog.create_book(dune()).await.unwrap().id);
        }

        let mut listed: Vec<Uuid> = catalog.list_books().await.unwrap().into_iter().map(|b| b.id).collect();
        listed.sort();
        created.sort();
        assert_eq!(listed, created);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let (_dir, db) = open().await;
        let catalog = Catalog::new(db.connection());
        let created = catalog.create_book(dune()).await.unwrap();

        let replacement = BookInput {
            title: "Dune Messiah".to_string(),
            author: "F. Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            year: 1969,
            description: "sequel".to_string(),
        };
        let updated = catalog
            .update_book(created.id, replacement.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, replacement.into_book(created.id));
        assert_eq!(catalog.get_book(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (_dir, db) = open().await;
        let catalog = Catalog::new(db.connection());
        let created = catalog.create_book(dune()).await.unwrap();

        assert!(catalog.delete_book(created.id).await.unwrap());
        assert_eq!(catalog.get_book(created.id).await.unwrap(), None);
        assert!(!catalog.delete_book(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_id_yields_none() {
        let (_dir, db) = open().await;
        let catalog = Catalog::new(db.connection());
        let id = Uuid::new_v4();

        assert_eq!(catalog.get_book(id).await.unwrap(), None);
        assert_eq!(catalog.update_book(id, dune()).await.unwrap(), None);
        assert!(!catalog.delete_book(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_stored_id_is_an_error() {
        let (_dir, db) = open().await;
        db.connection()
            .execute(
                "INSERT INTO books (id, title, author, genre, year, description) VALUES ('not-a-uuid', 't', 'a', 'g', 1, 'd')",
                (),
            )
            .await
            .unwrap();

        let catalog = Catalog::new(db.connection());
        assert!(catalog.list_books().await.is_err());
    }
}
