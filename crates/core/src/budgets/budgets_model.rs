//! Budget domain models.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::categories::resolve_category_name;
use crate::constants::{DEFAULT_USER_ID, MAX_AMOUNT};
use crate::errors::ValidationError;

/// A spending cap for one category over a date range.
///
/// Serialized with snake_case keys; this is also the layout of the
/// persisted snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub budget_id: i64,
    pub user_id: i64,
    pub category_id: i32,
    pub limit_amount: Decimal,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    /// Cached name of `category_id`, refreshed on every add and edit
    pub category_name: String,
}

/// Input model for creating a budget or replacing an existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    /// Defaults to the current user on add and to the existing owner on edit
    #[serde(default)]
    pub user_id: Option<i64>,
    pub category_id: i32,
    pub limit_amount: Decimal,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl NewBudget {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.limit_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.limit_amount));
        }
        if self.limit_amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge(self.limit_amount, MAX_AMOUNT));
        }
        if self.from_date > self.to_date {
            return Err(ValidationError::InvalidDateRange {
                from: self.from_date,
                to: self.to_date,
            });
        }
        Ok(())
    }

    pub(crate) fn into_budget(self, budget_id: i64) -> Budget {
        Budget {
            budget_id,
            user_id: self.user_id.unwrap_or(DEFAULT_USER_ID),
            category_id: self.category_id,
            limit_amount: self.limit_amount,
            from_date: self.from_date,
            to_date: self.to_date,
            category_name: resolve_category_name(self.category_id),
        }
    }

    pub(crate) fn apply_to(self, budget: &mut Budget) {
        if let Some(user_id) = self.user_id {
            budget.user_id = user_id;
        }
        budget.category_id = self.category_id;
        budget.limit_amount = self.limit_amount;
        budget.from_date = self.from_date;
        budget.to_date = self.to_date;
        budget.category_name = resolve_category_name(self.category_id);
    }
}

impl From<&Budget> for NewBudget {
    fn from(budget: &Budget) -> Self {
        NewBudget {
            user_id: Some(budget.user_id),
            category_id: budget.category_id,
            limit_amount: budget.limit_amount,
            from_date: budget.from_date,
            to_date: budget.to_date,
        }
    }
}

/// A budget as read back from storage.
///
/// Snapshots written by older versions may carry `category_id` as a string
/// and may lack `category_name` or `user_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredBudget {
    pub budget_id: i64,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    #[serde(default, deserialize_with = "deserialize_category_id")]
    pub category_id: i32,
    pub limit_amount: Decimal,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default)]
    pub category_name: Option<String>,
}

impl StoredBudget {
    /// True when the cached category name has to be backfilled.
    pub fn needs_migration(&self) -> bool {
        match self.category_name.as_deref() {
            Some(name) => name.trim().is_empty(),
            None => true,
        }
    }

    /// Converts to the domain model, backfilling a missing category name.
    ///
    /// A non-blank stored name is kept as is, even when it no longer matches
    /// `category_id` (older snapshots wrote their own labels). Such a budget
    /// only gets the resolved name on its next edit.
    pub fn into_budget(self) -> Budget {
        let category_name = match self.category_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => resolve_category_name(self.category_id),
        };

        Budget {
            budget_id: self.budget_id,
            user_id: self.user_id,
            category_id: self.category_id,
            limit_amount: self.limit_amount,
            from_date: self.from_date,
            to_date: self.to_date,
            category_name,
        }
    }
}

fn default_user_id() -> i64 {
    DEFAULT_USER_ID
}

/// Accepts a category id written as a JSON number or a numeric string.
///
/// Anything that is not a whole number becomes 0, which resolves to the
/// "Unknown" category.
fn deserialize_category_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let parsed = match &raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    };

    match parsed.and_then(|id| i32::try_from(id).ok()) {
        Some(id) => Ok(id),
        None => {
            warn!("Stored budget has unusable category_id {}, treating as unknown", raw);
            Ok(0)
        }
    }
}
