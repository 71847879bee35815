//! Transaction domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::resolve_category_id;
use crate::constants::MAX_AMOUNT;
use crate::errors::ValidationError;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

/// Domain model representing a single income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub description: String,
    /// Free-text category label as entered
    pub category: String,
    /// Category table id resolved from `category`; `None` when the label has no match
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// Input model for adding a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Defaults to the current time when absent
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub category: String,
    #[serde(rename = "type", default)]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
}

impl NewTransaction {
    /// Validates the candidate; the store rejects it unchanged when this fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_entry(&self.description, &self.category, self.amount)
    }

    pub(crate) fn into_transaction(self, id: i64, now: DateTime<Utc>) -> Transaction {
        let category_id = resolve_category_id(&self.category);
        Transaction {
            id,
            date: self.date.unwrap_or(now),
            description: self.description,
            category: self.category,
            category_id,
            transaction_type: self.transaction_type,
            amount: self.amount,
        }
    }
}

/// Input model for replacing every field of an existing transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub date: DateTime<Utc>,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
}

impl TransactionUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_entry(&self.description, &self.category, self.amount)
    }

    pub(crate) fn apply_to(self, transaction: &mut Transaction) {
        transaction.category_id = resolve_category_id(&self.category);
        transaction.date = self.date;
        transaction.description = self.description;
        transaction.category = self.category;
        transaction.transaction_type = self.transaction_type;
        transaction.amount = self.amount;
    }
}

impl From<Transaction> for TransactionUpdate {
    fn from(t: Transaction) -> Self {
        Self {
            date: t.date,
            description: t.description,
            category: t.category,
            transaction_type: t.transaction_type,
            amount: t.amount,
        }
    }
}

fn validate_entry(description: &str, category: &str, amount: Decimal) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::MissingField("description".to_string()));
    }
    if category.trim().is_empty() {
        return Err(ValidationError::MissingField("category".to_string()));
    }
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(amount, MAX_AMOUNT));
    }
    Ok(())
}

/// Income, expense and net sums over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

impl TransactionTotals {
    /// Sums saturate at `Decimal::MAX` instead of overflowing.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expense) = transactions.into_iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), t| match t.transaction_type {
                TransactionType::Income => (income.saturating_add(t.amount), expense),
                TransactionType::Expense => (income, expense.saturating_add(t.amount)),
            },
        );

        TransactionTotals {
            income,
            expense,
            net: income.saturating_sub(expense),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn candidate(description: &str, category: &str, amount: Decimal) -> NewTransaction {
        NewTransaction {
            date: None,
            description: description.to_string(),
            category: category.to_string(),
            transaction_type: TransactionType::Expense,
            amount,
        }
    }

    #[test]
    fn test_validate_accepts_complete_candidate() {
        assert!(candidate("Groceries", "Food", dec!(12.30)).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert_eq!(
            candidate("  ", "Food", dec!(1)).validate(),
            Err(ValidationError::MissingField("description".to_string()))
        );
        assert_eq!(
            candidate("Groceries", "", dec!(1)).validate(),
            Err(ValidationError::MissingField("category".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        assert_eq!(
            candidate("Groceries", "Food", Decimal::ZERO).validate(),
            Err(ValidationError::NonPositiveAmount(Decimal::ZERO))
        );
        assert!(candidate("Groceries", "Food", dec!(-5)).validate().is_err());
    }

    #[test]
    fn test_validate_caps_amount() {
        assert!(candidate("Salary", "Income", MAX_AMOUNT).validate().is_ok());
        let huge = dec!(50000000000000000000000000000);
        assert_eq!(
            candidate("Salary", "Income", huge).validate(),
            Err(ValidationError::AmountTooLarge(huge, MAX_AMOUNT))
        );
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let income = Transaction {
            id: 1,
            date: Utc::now(),
            description: "Windfall".to_string(),
            category: "Income".to_string(),
            category_id: None,
            transaction_type: TransactionType::Income,
            amount: dec!(50000000000000000000000000000),
        };
        let mut expense = income.clone();
        expense.id = 2;
        expense.transaction_type = TransactionType::Expense;

        let totals = TransactionTotals::from_transactions(&[income.clone(), income, expense]);
        assert_eq!(totals.income, Decimal::MAX);
        assert_eq!(totals.expense, dec!(50000000000000000000000000000));
        assert_eq!(totals.net, Decimal::MAX - dec!(50000000000000000000000000000));
    }

    #[test]
    fn test_type_serializes_under_type_key() {
        let json = serde_json::to_value(TransactionType::Income).unwrap();
        assert_eq!(json, "income");

        let parsed: NewTransaction = serde_json::from_str(
            r#"{"description":"Rent","category":"Utilities","type":"expense","amount":850}"#,
        )
        .unwrap();
        assert_eq!(parsed.transaction_type, TransactionType::Expense);
        assert_eq!(parsed.amount, dec!(850));
        assert!(parsed.date.is_none());
    }
}
