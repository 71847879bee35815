use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::budgets_model::Budget;
use crate::categories::resolve_category_name;
use crate::constants::DEFAULT_USER_ID;

/// Example budgets written on first start, when storage holds no snapshot.
pub fn seed_budgets() -> Vec<Budget> {
    let from_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    let to_date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap_or_default();

    vec![
        Budget {
            budget_id: 1,
            user_id: DEFAULT_USER_ID,
            category_id: 1,
            limit_amount: dec!(500),
            from_date,
            to_date,
            category_name: resolve_category_name(1),
        },
        Budget {
            budget_id: 2,
            user_id: DEFAULT_USER_ID,
            category_id: 2,
            limit_amount: dec!(200),
            from_date,
            to_date,
            category_name: resolve_category_name(2),
        },
    ]
}
