use rust_decimal::Decimal;

/// Storage slot holding the budget snapshot
pub const BUDGETS_STORAGE_KEY: &str = "budgets";

/// User that owns budgets created without an explicit owner
pub const DEFAULT_USER_ID: i64 = 1;

/// Name reported for a category id missing from the category table
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Icon reported for a category id missing from the category table
pub const UNKNOWN_CATEGORY_ICON: &str = "tag";

/// Number of transactions shown on the dashboard when the caller does not ask for more
pub const DEFAULT_RECENT_TRANSACTIONS: usize = 5;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Largest amount accepted for a transaction or a budget limit (10^12)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);
