//! SQLite-backed storage.

mod models;
mod schema;

use super::{Serializer, Storage, StorageError, StorageErrorKind};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use models::{GameRow, NewGameRow};
use std::marker::PhantomData;
use tracing::{debug, info, instrument};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Stores records in the `games` table, encoded by `S`.
#[derive(Debug)]
pub struct SqliteStorage<T, S> {
    db_path: String,
    serializer: S,
    _record: PhantomData<fn() -> T>,
}

impl<T, S: Serializer<T>> SqliteStorage<T, S> {
    /// Opens the database at `db_path` and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path, serializer), fields(db_path = %db_path))]
    pub fn open(db_path: String, serializer: S) -> Result<Self, StorageError> {
        info!(path = %db_path, "Opening SqliteStorage");
        let storage = Self {
            db_path,
            serializer,
            _record: PhantomData,
        };
        let mut conn = storage.connection()?;
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            StorageError::new(StorageErrorKind::Backend, format!("Migrations failed: {}", e))
        })?;
        Ok(storage)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StorageError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StorageError::new(
                StorageErrorKind::Backend,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

impl<K, T, S> Storage<K, T> for SqliteStorage<T, S>
where
    K: std::fmt::Display + std::fmt::Debug,
    T: std::fmt::Debug,
    S: Serializer<T>,
{
    #[instrument(skip(self, value))]
    fn create(&self, key: &K, value: &T) -> Result<(), StorageError> {
        let row = NewGameRow::new(key.to_string(), self.serializer.serialize(value)?, now());
        let mut conn = self.connection()?;

        match diesel::insert_into(schema::games::table)
            .values(&row)
            .execute(&mut conn)
        {
            Ok(_) => {
                debug!(%key, "Row inserted");
                Ok(())
            }
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(StorageError::already_exists(key))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    fn read(&self, key: &K) -> Result<Option<T>, StorageError> {
        let mut conn = self.connection()?;

        let row = schema::games::table
            .find(key.to_string())
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()?;

        match row {
            Some(row) => {
                debug!(%key, updated_at = %row.updated_at(), "Row loaded");
                self.serializer.deserialize(row.record()).map(Some)
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self, value))]
    fn update(&self, key: &K, value: &T) -> Result<(), StorageError> {
        let text = self.serializer.serialize(value)?;
        let mut conn = self.connection()?;

        let changed = diesel::update(schema::games::table.find(key.to_string()))
            .set((
                schema::games::record.eq(text),
                schema::games::updated_at.eq(now()),
            ))
            .execute(&mut conn)?;

        if changed == 0 {
            return Err(StorageError::not_found(key));
        }
        debug!(%key, "Row updated");
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete(&self, key: &K) -> Result<(), StorageError> {
        let mut conn = self.connection()?;

        let removed =
            diesel::delete(schema::games::table.find(key.to_string())).execute(&mut conn)?;

        if removed == 0 {
            return Err(StorageError::not_found(key));
        }
        debug!(%key, "Row deleted");
        Ok(())
    }
}
