//! Tests for the budget store: seeding, persistence and mutation outcomes.

#[cfg(test)]
mod tests {
    use crate::budgets::{
        seed_budgets, Budget, BudgetRepositoryTrait, BudgetService, BudgetServiceTrait,
        KeyValueBudgetRepository, NewBudget, StoredBudget,
    };
    use crate::errors::{DatabaseError, Error, Result, ValidationError};
    use crate::outcome::MutationOutcome;
    use crate::storage::{InMemoryKeyValueStore, KeyValueStoreTrait};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    // ============== Helpers ==============

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_budget(category_id: i32, limit_amount: Decimal) -> NewBudget {
        NewBudget {
            user_id: None,
            category_id,
            limit_amount,
            from_date: date(2025, 2, 1),
            to_date: date(2025, 2, 28),
        }
    }

    fn service_over(store: Arc<dyn KeyValueStoreTrait>) -> BudgetService {
        BudgetService::new(Arc::new(KeyValueBudgetRepository::new(store)))
    }

    fn stored_snapshot(store: &InMemoryKeyValueStore) -> Vec<Budget> {
        let raw = store.get("budgets").unwrap().expect("snapshot should exist");
        let stored: Vec<StoredBudget> = serde_json::from_str(&raw).unwrap();
        stored.into_iter().map(StoredBudget::into_budget).collect()
    }

    /// Key-value store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryKeyValueStore,
        fail_writes: AtomicBool,
        writes: AtomicUsize,
    }

    impl KeyValueStoreTrait for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(Error::Database(DatabaseError::QueryFailed(
                    "disk is full".to_string(),
                )));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }
    }

    /// Repository that counts snapshot writes without a backing store.
    struct CountingRepository {
        snapshot: Option<Vec<StoredBudget>>,
        saves: AtomicUsize,
    }

    impl BudgetRepositoryTrait for CountingRepository {
        fn load_snapshot(&self) -> Result<Option<Vec<StoredBudget>>> {
            Ok(self.snapshot.clone())
        }

        fn save_snapshot(&self, _budgets: &[Budget]) -> Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    // ============== load ==============

    #[test]
    fn test_first_load_seeds_and_persists_examples() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let service = service_over(store.clone());

        let budgets = service.load().unwrap();
        assert_eq!(budgets, seed_budgets());
        assert_eq!(budgets[0].category_name, "Food & Dining");
        assert_eq!(budgets[1].category_name, "Transportation");
        assert_eq!(stored_snapshot(&store), budgets);

        // Reloading reads the persisted seed back instead of seeding again
        assert_eq!(service.load().unwrap(), budgets);
    }

    #[test]
    fn test_blank_snapshot_is_seeded() {
        let store = Arc::new(InMemoryKeyValueStore::with_entry("budgets", ""));
        let service = service_over(store.clone());
        assert_eq!(service.list().unwrap().len(), 2);
        assert_eq!(stored_snapshot(&store).len(), 2);
    }

    #[test]
    fn test_empty_array_snapshot_is_not_reseeded() {
        let store = Arc::new(InMemoryKeyValueStore::with_entry("budgets", "[]"));
        let service = service_over(store);
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_load_normalizes_legacy_snapshot_and_rewrites_it() {
        let store = Arc::new(InMemoryKeyValueStore::with_entry(
            "budgets",
            r#"[
                {"budget_id":1,"user_id":1,"category_id":"3","limit_amount":90,
                 "from_date":"2025-01-01","to_date":"2025-01-31"},
                {"budget_id":2,"user_id":1,"category_id":"oops","limit_amount":40,
                 "from_date":"2025-01-01","to_date":"2025-01-31","category_name":""}
            ]"#,
        ));
        let service = service_over(store.clone());

        let budgets = service.load().unwrap();
        assert_eq!(budgets[0].category_id, 3);
        assert_eq!(budgets[0].category_name, "Entertainment");
        assert_eq!(budgets[1].category_id, 0);
        assert_eq!(budgets[1].category_name, "Unknown");

        // The rewritten snapshot carries numeric ids and names
        let raw = store.get("budgets").unwrap().unwrap();
        assert!(raw.contains(r#""category_id":3"#));
        assert!(raw.contains("Entertainment"));
    }

    #[test]
    fn test_load_of_clean_snapshot_does_not_write() {
        let snapshot: Vec<StoredBudget> =
            serde_json::from_str(&serde_json::to_string(&seed_budgets()).unwrap()).unwrap();
        let repository = Arc::new(CountingRepository {
            snapshot: Some(snapshot),
            saves: AtomicUsize::new(0),
        });
        let service = BudgetService::new(repository.clone());

        assert_eq!(service.load().unwrap().len(), 2);
        assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_state_survives_a_new_service_over_the_same_store() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let first = service_over(store.clone());
        first.add(new_budget(5, dec!(75))).unwrap();

        let second = service_over(store);
        assert_eq!(second.list().unwrap(), first.list().unwrap());
    }

    // ============== add ==============

    #[test]
    fn test_add_assigns_next_id_and_resolves_name() {
        let store = Arc::new(InMemoryKeyValueStore::with_entry("budgets", "[]"));
        let service = service_over(store.clone());

        let first = service
            .add(new_budget(3, dec!(150)))
            .unwrap()
            .applied()
            .expect("add should apply");
        let second = service
            .add(new_budget(7, dec!(60)))
            .unwrap()
            .applied()
            .expect("add should apply");

        assert_eq!(first.budget_id, 1);
        assert_eq!(first.category_name, "Entertainment");
        assert_eq!(second.budget_id, 2);
        assert_eq!(second.category_name, "Education");
        assert_eq!(stored_snapshot(&store), vec![first, second]);
    }

    #[test]
    fn test_add_after_seed_continues_numbering() {
        let service = service_over(Arc::new(InMemoryKeyValueStore::new()));
        let added = service.add(new_budget(4, dec!(90))).unwrap().applied().unwrap();
        assert_eq!(added.budget_id, 3);
    }

    #[test]
    fn test_add_unknown_category_is_stored_as_unknown() {
        let service = service_over(Arc::new(InMemoryKeyValueStore::new()));
        let added = service.add(new_budget(42, dec!(10))).unwrap().applied().unwrap();
        assert_eq!(added.category_name, "Unknown");
    }

    #[test]
    fn test_add_rejects_invalid_candidate_without_write() {
        let store = Arc::new(FlakyStore::default());
        let service = service_over(store.clone());
        service.load().unwrap();
        let writes_after_seed = store.writes.load(Ordering::SeqCst);

        let outcome = service.add(new_budget(1, dec!(-5))).unwrap();
        assert_eq!(
            outcome,
            MutationOutcome::Rejected(ValidationError::NonPositiveAmount(dec!(-5)))
        );

        let mut inverted = new_budget(1, dec!(50));
        inverted.to_date = date(2025, 1, 1);
        assert!(matches!(
            service.add(inverted).unwrap(),
            MutationOutcome::Rejected(ValidationError::InvalidDateRange { .. })
        ));

        assert_eq!(store.writes.load(Ordering::SeqCst), writes_after_seed);
        assert_eq!(service.list().unwrap().len(), 2);
    }

    // ============== edit ==============

    #[test]
    fn test_edit_recomputes_category_name() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let service = service_over(store.clone());

        let edited = service
            .edit(1, new_budget(8, dec!(1200)))
            .unwrap()
            .applied()
            .expect("edit should apply");

        assert_eq!(edited.budget_id, 1);
        assert_eq!(edited.category_id, 8);
        assert_eq!(edited.category_name, "Travel");
        assert_eq!(edited.user_id, 1);
        assert_eq!(edited.from_date, date(2025, 2, 1));
        assert_eq!(service.get(1).unwrap(), Some(edited.clone()));
        assert_eq!(stored_snapshot(&store)[0], edited);
    }

    #[test]
    fn test_edit_unknown_id_is_not_found() {
        let store = Arc::new(FlakyStore::default());
        let service = service_over(store.clone());
        let before = service.list().unwrap();
        let writes = store.writes.load(Ordering::SeqCst);

        assert_eq!(
            service.edit(99, new_budget(1, dec!(10))).unwrap(),
            MutationOutcome::NotFound(99)
        );
        assert_eq!(service.list().unwrap(), before);
        assert_eq!(store.writes.load(Ordering::SeqCst), writes);
    }

    // ============== delete ==============

    #[test]
    fn test_delete_removes_and_persists() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let service = service_over(store.clone());

        let removed = service.delete(1).unwrap().applied().expect("delete should apply");
        assert_eq!(removed.category_name, "Food & Dining");
        assert_eq!(service.get(1).unwrap(), None);
        assert_eq!(stored_snapshot(&store).len(), 1);

        assert_eq!(service.delete(1).unwrap(), MutationOutcome::NotFound(1));
    }

    #[test]
    fn test_ids_are_not_reused_while_a_higher_id_exists() {
        let service = service_over(Arc::new(InMemoryKeyValueStore::new()));
        service.delete(1).unwrap();
        let added = service.add(new_budget(6, dec!(30))).unwrap().applied().unwrap();
        assert_eq!(added.budget_id, 3);
    }

    #[test]
    fn test_add_after_largest_possible_id_is_rejected_without_write() {
        let store = Arc::new(FlakyStore::default());
        store
            .inner
            .set(
                "budgets",
                r#"[{"budget_id":9223372036854775807,"user_id":1,"category_id":1,
                    "limit_amount":300,"from_date":"2025-01-01","to_date":"2025-01-31",
                    "category_name":"Food & Dining"}]"#,
            )
            .unwrap();
        let service = service_over(store.clone());

        let outcome = service.add(new_budget(2, dec!(50))).unwrap();
        assert!(matches!(
            outcome,
            MutationOutcome::Rejected(ValidationError::InvalidInput(_))
        ));
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_add_rejects_limit_above_cap() {
        let service = service_over(Arc::new(InMemoryKeyValueStore::new()));
        let outcome = service
            .add(new_budget(1, dec!(50000000000000000000000000000)))
            .unwrap();
        assert!(matches!(
            outcome,
            MutationOutcome::Rejected(ValidationError::AmountTooLarge(_, _))
        ));
        assert_eq!(service.list().unwrap().len(), 2);
    }

    // ============== storage failures ==============

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let store = Arc::new(FlakyStore::default());
        let service = service_over(store.clone());
        let before = service.list().unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        assert!(service.add(new_budget(3, dec!(20))).is_err());
        assert!(service.delete(1).is_err());
        assert_eq!(service.list().unwrap(), before);

        store.fail_writes.store(false, Ordering::SeqCst);
        let added = service.add(new_budget(3, dec!(20))).unwrap().applied().unwrap();
        assert_eq!(added.budget_id, 3);
    }

    #[test]
    fn test_seed_write_failure_is_reported() {
        let store = Arc::new(FlakyStore::default());
        store.fail_writes.store(true, Ordering::SeqCst);
        let service = service_over(store);
        assert!(matches!(
            service.load(),
            Err(Error::Database(DatabaseError::QueryFailed(_)))
        ));
    }

    #[test]
    fn test_default_resolve_category_name() {
        let service = service_over(Arc::new(InMemoryKeyValueStore::new()));
        assert_eq!(service.resolve_category_name(6), "Shopping");
        assert_eq!(service.resolve_category_name(-1), "Unknown");
    }
}
