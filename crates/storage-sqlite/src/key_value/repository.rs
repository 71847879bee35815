use chrono::Utc;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::KeyValueEntryDB;
use crate::db::{get_connection, DbPool};
use crate::errors::{IntoCore, StorageError};
use crate::schema::key_value_store::dsl::*;
use budget_ledger_core::errors::Result;
use budget_ledger_core::storage::KeyValueStoreTrait;

/// Key-value port over the `key_value_store` table.
pub struct SqliteKeyValueStore {
    pool: Arc<DbPool>,
}

impl SqliteKeyValueStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        SqliteKeyValueStore { pool }
    }
}

impl KeyValueStoreTrait for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        key_value_store
            .filter(entry_key.eq(key))
            .select(entry_value)
            .first::<String>(&mut conn)
            .optional()
            .into_core()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        let entry = KeyValueEntryDB {
            entry_key: key.to_string(),
            entry_value: value.to_string(),
            updated_at: Utc::now().naive_utc(),
        };

        conn.immediate_transaction::<_, StorageError, _>(|c| {
            diesel::replace_into(key_value_store)
                .values(&entry)
                .execute(c)?;
            Ok(())
        })
        .into_core()?;

        debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations};
    use budget_ledger_core::budgets::{
        BudgetService, BudgetServiceTrait, KeyValueBudgetRepository, NewBudget,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Arc<DbPool>) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = init(dir.path().join("ledger.db").to_str().unwrap()).unwrap();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        (dir, pool)
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let (_dir, pool) = setup();
        let store = SqliteKeyValueStore::new(pool);
        assert_eq!(store.get("budgets").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let (_dir, pool) = setup();
        let store = SqliteKeyValueStore::new(pool.clone());

        store.set("budgets", "[]").unwrap();
        store.set("budgets", r#"[{"budget_id":1}]"#).unwrap();
        assert_eq!(
            store.get("budgets").unwrap().as_deref(),
            Some(r#"[{"budget_id":1}]"#)
        );

        let mut conn = get_connection(&pool).unwrap();
        let rows: i64 = key_value_store.count().get_result(&mut conn).unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_budgets_survive_reopening_the_database() {
        let (_dir, pool) = setup();

        let first = BudgetService::new(Arc::new(KeyValueBudgetRepository::new(Arc::new(
            SqliteKeyValueStore::new(pool.clone()),
        ))));
        let added = first
            .add(NewBudget {
                user_id: None,
                category_id: 6,
                limit_amount: dec!(250),
                from_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                to_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            })
            .unwrap()
            .applied()
            .unwrap();
        assert_eq!(added.budget_id, 3);

        let second_store = Arc::new(SqliteKeyValueStore::new(pool));
        let second = BudgetService::new(Arc::new(KeyValueBudgetRepository::new(
            second_store.clone(),
        )));
        let budgets = second.list().unwrap();
        assert_eq!(budgets.len(), 3);
        assert_eq!(budgets[2].category_name, "Shopping");

        let raw = second_store.get("budgets").unwrap().unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(snapshot.as_array().map(Vec::len), Some(3));
    }
}
