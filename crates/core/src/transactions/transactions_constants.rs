use chrono::{DateTime, Duration, Utc};
use rust_decimal_macros::dec;

use super::transactions_model::{Transaction, TransactionType};

/// Demo transactions, newest first, dated relative to `now`.
///
/// Category ids are left unset; the store resolves them when seeded.
pub fn sample_transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1,
            date: now,
            description: "Salary Deposit".to_string(),
            category: "Income".to_string(),
            category_id: None,
            transaction_type: TransactionType::Income,
            amount: dec!(3500.00),
        },
        Transaction {
            id: 2,
            date: now - Duration::days(1),
            description: "Grocery Shopping".to_string(),
            category: "Food".to_string(),
            category_id: None,
            transaction_type: TransactionType::Expense,
            amount: dec!(125.50),
        },
        Transaction {
            id: 3,
            date: now - Duration::days(2),
            description: "Freelance Payment".to_string(),
            category: "Income".to_string(),
            category_id: None,
            transaction_type: TransactionType::Income,
            amount: dec!(800.00),
        },
        Transaction {
            id: 4,
            date: now - Duration::days(3),
            description: "Electricity Bill".to_string(),
            category: "Utilities".to_string(),
            category_id: None,
            transaction_type: TransactionType::Expense,
            amount: dec!(85.20),
        },
    ]
}
