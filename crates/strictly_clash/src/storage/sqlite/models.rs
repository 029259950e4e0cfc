//! Database models for stored games.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use super::schema;

/// The columns `read` loads; rows are found by primary key.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    record: String,
    updated_at: NaiveDateTime,
}

/// Insertable row for `create`.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    name: String,
    record: String,
    updated_at: NaiveDateTime,
}
