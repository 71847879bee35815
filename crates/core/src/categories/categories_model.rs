//! Category domain model.

use serde::Serialize;

/// A fixed classification label shared by budgets and transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: &'static str,
    /// Display icon slug
    pub icon: &'static str,
}
