//! Database model for key-value entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;

/// One row of the key-value table
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::key_value_store)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct KeyValueEntryDB {
    pub entry_key: String,
    pub entry_value: String,
    pub updated_at: NaiveDateTime,
}
